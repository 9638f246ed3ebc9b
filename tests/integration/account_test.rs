//! Integration tests for account management.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use warden_core::config::AppConfig;

use crate::helpers::{ADMIN_PASSWORD, ADMIN_USERNAME, TestApp};

#[tokio::test]
async fn test_admin_creates_and_reads_account() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/accounts",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "wonderland",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.data()["id"].as_str().expect("id").to_string();

    let fetched = app
        .request("GET", &format!("/api/accounts/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["id"], id.as_str());
    assert_eq!(fetched.data()["username"], "alice");
    assert_eq!(fetched.data()["email"], "alice@example.com");
    assert_eq!(fetched.data()["isAdmin"], false);
    assert!(fetched.data().get("passwordHash").is_none());
    assert!(fetched.data().get("password_hash").is_none());

    let (login_id, _) = app.login("alice", "wonderland").await;
    assert_eq!(login_id, id);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_account(&token, "bob", "builder", false).await;

    let response = app
        .request(
            "POST",
            "/api/accounts",
            Some(json!({ "username": "bob", "password": "other" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "DUPLICATE_USERNAME");

    let listed = app.request("GET", "/api/accounts", None, Some(&token)).await;
    let names: Vec<&str> = listed
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|a| a["username"].as_str())
        .collect();
    assert_eq!(names.iter().filter(|n| **n == "bob").count(), 1);
}

#[tokio::test]
async fn test_anonymous_callers_are_denied() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let id = app.create_account(&token, "carol", "secret", false).await;

    let create = app
        .request(
            "POST",
            "/api/accounts",
            Some(json!({ "username": "mallory", "password": "x" })),
            None,
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
    assert_eq!(create.error_code(), "NO_PERMISSION");

    let get = app
        .request("GET", &format!("/api/accounts/{id}"), None, None)
        .await;
    assert_eq!(get.status, StatusCode::FORBIDDEN);

    let list = app.request("GET", "/api/accounts", None, Some("garbage")).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let update = app
        .request(
            "PATCH",
            &format!("/api/accounts/{id}"),
            Some(json!({ "email": "x@example.com" })),
            None,
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_policy_is_configurable() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_account(&admin, "dave", "pw", false).await;
    let (_, dave) = app.login("dave", "pw").await;
    app.create_account(&dave, "erin", "pw", false).await;

    let mut config = AppConfig::default();
    config.auth.create_requires_admin = true;
    let strict = TestApp::with_config(config).await;
    let admin = strict.admin_token().await;
    strict.create_account(&admin, "dave", "pw", false).await;
    let (_, dave) = strict.login("dave", "pw").await;

    let response = strict
        .request(
            "POST",
            "/api/accounts",
            Some(json!({ "username": "erin", "password": "pw" })),
            Some(&dave),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let unknown = app
        .request(
            "GET",
            &format!("/api/accounts/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error_code(), "NOT_FOUND");

    let malformed = app
        .request("GET", "/api/accounts/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.error_code(), "VALIDATION");

    let update_unknown = app
        .request(
            "PATCH",
            &format!("/api/accounts/{}", Uuid::new_v4()),
            Some(json!({ "email": "ghost@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(update_unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_admin_update_rules() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let frank_id = app.create_account(&admin, "frank", "pw", false).await;
    let grace_id = app.create_account(&admin, "grace", "pw", false).await;
    let (_, frank) = app.login("frank", "pw").await;

    let own = app
        .request(
            "PATCH",
            &format!("/api/accounts/{frank_id}"),
            Some(json!({ "email": "frank@example.com" })),
            Some(&frank),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["email"], "frank@example.com");

    let other = app
        .request(
            "PATCH",
            &format!("/api/accounts/{grace_id}"),
            Some(json!({ "email": "hijack@example.com" })),
            Some(&frank),
        )
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let escalate = app
        .request(
            "PATCH",
            &format!("/api/accounts/{frank_id}"),
            Some(json!({ "isAdmin": true })),
            Some(&frank),
        )
        .await;
    assert_eq!(escalate.status, StatusCode::FORBIDDEN);

    let grace = app
        .request("GET", &format!("/api/accounts/{grace_id}"), None, Some(&admin))
        .await;
    assert!(grace.data()["email"].is_null());
    let frank_now = app
        .request("GET", &format!("/api/accounts/{frank_id}"), None, Some(&admin))
        .await;
    assert_eq!(frank_now.data()["isAdmin"], false);
}

#[tokio::test]
async fn test_promotion_shows_in_next_token() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_account(&admin, "heidi", "pw", false).await;
    let (_, before) = app.login("heidi", "pw").await;

    let promoted = app
        .request(
            "PATCH",
            &format!("/api/accounts/{id}"),
            Some(json!({ "isAdmin": true })),
            Some(&admin),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.data()["isAdmin"], true);

    let old_claims = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": before })), None)
        .await;
    assert_eq!(old_claims.data()["isAdmin"], false);

    let (_, after) = app.login("heidi", "pw").await;
    let new_claims = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": after })), None)
        .await;
    assert_eq!(new_claims.data()["isAdmin"], true);
}

#[tokio::test]
async fn test_password_change() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_account(&admin, "ivan", "old-password", false).await;
    let (_, ivan) = app.login("ivan", "old-password").await;

    let empty = app
        .request(
            "PATCH",
            &format!("/api/accounts/{id}"),
            Some(json!({ "password": "" })),
            Some(&ivan),
        )
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    app.login("ivan", "old-password").await;

    let changed = app
        .request(
            "PATCH",
            &format!("/api/accounts/{id}"),
            Some(json!({ "password": "new-password" })),
            Some(&ivan),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/token",
            Some(json!({ "username": "ivan", "password": "old-password" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("ivan", "new-password").await;
}

#[tokio::test]
async fn test_rename_to_taken_username_conflicts() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_account(&admin, "judy", "pw", false).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/accounts/{id}"),
            Some(json!({ "username": ADMIN_USERNAME })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    app.login("judy", "pw").await;
    app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
}

#[tokio::test]
async fn test_list_includes_bootstrap_admin() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_account(&admin, "kim", "pw", true).await;

    let listed = app.request("GET", "/api/accounts", None, Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let accounts = listed.data().as_array().expect("array");
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().any(|a| a["username"] == ADMIN_USERNAME && a["isAdmin"] == true));
    assert!(accounts.iter().any(|a| a["username"] == "kim" && a["isAdmin"] == true));
}
