//! Integration tests for token issuance and validation.

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use warden_core::traits::Clock;
use warden_database::AccountRepository;

use crate::helpers::{ADMIN_PASSWORD, ADMIN_USERNAME, TestApp};

#[tokio::test]
async fn test_bootstrap_admin_can_log_in() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/token",
            Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.data()["id"].is_string());
    assert!(response.data()["token"].is_string());
}

#[tokio::test]
async fn test_failed_logins_are_indistinguishable() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/token",
            Some(json!({ "username": ADMIN_USERNAME, "password": "nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/token",
            Some(json!({ "username": "nobody", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_validate_returns_claims() {
    let app = TestApp::new().await;
    let (id, token) = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": token })), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["userId"], id.as_str());
    assert_eq!(response.data()["isAdmin"], true);

    let expected = (app.clock.now() + Duration::minutes(15)).timestamp();
    assert_eq!(response.data()["expires"], expected);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.clock.advance(Duration::minutes(15));
    let at_expiry = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": token })), None)
        .await;
    assert_eq!(at_expiry.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let after_expiry = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": token })), None)
        .await;
    assert_eq!(after_expiry.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after_expiry.error_code(), "TOKEN_EXPIRED");

    // Expired bearer tokens carry no claims, so the policy denies.
    let listed = app.request("GET", "/api/accounts", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let signature = parts[2].clone();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    parts[2] = format!("{flipped}{}", &signature[1..]);
    let tampered = parts.join(".");

    let response = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": tampered })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "SIGNATURE_INVALID");

    let garbage = app
        .request("POST", "/api/auth/validate", Some(json!({ "token": "not-a-jwt" })), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reflects_store() {
    let app = TestApp::new().await;

    let healthy = app.request("GET", "/health", None, None).await;
    assert_eq!(healthy.status, StatusCode::OK);
    assert_eq!(healthy.data()["status"], "ok");

    app.repo.close().await;
    let down = app.request("GET", "/health", None, None).await;
    assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(down.error_code(), "STORAGE_UNAVAILABLE");
}
