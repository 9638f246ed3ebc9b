//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use warden_api::AppState;
use warden_auth::{AccessPolicy, CredentialHasher, JwtAuthenticator};
use warden_core::config::{AppConfig, StorageBackend};
use warden_core::traits::ManualClock;
use warden_database::MemoryAccountRepository;
use warden_service::AccountService;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection and failure injection
    pub repo: MemoryAccountRepository,
    /// Clock shared with the token authenticator
    pub clock: Arc<ManualClock>,
}

/// Status and decoded JSON body of a test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The error code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application from the given configuration, backed by
    /// the in-memory store and with the bootstrap admin provisioned
    pub async fn with_config(mut config: AppConfig) -> Self {
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.database.backend = StorageBackend::Memory;

        let repo = MemoryAccountRepository::new();
        let clock = Arc::new(ManualClock::starting_now());
        let authenticator = JwtAuthenticator::from_config(&config.auth, clock.clone())
            .expect("Failed to build authenticator");

        let service = AccountService::new(
            Arc::new(repo.clone()),
            Arc::new(authenticator),
            Arc::new(CredentialHasher::new()),
            AccessPolicy::from_config(&config.auth),
        );
        service
            .ensure_bootstrap_admin(&config.bootstrap)
            .await
            .expect("Failed to bootstrap admin");

        let router = warden_api::build_router(AppState::new(Arc::new(config), Arc::new(service)));

        Self {
            router,
            repo,
            clock,
        }
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Log in and return `(id, token)`
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/token",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let id = response.data()["id"].as_str().expect("id").to_string();
        let token = response.data()["token"].as_str().expect("token").to_string();
        (id, token)
    }

    /// Log in as the bootstrap admin and return the token
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.1
    }

    /// Create an account as `token` and return its id
    pub async fn create_account(
        &self,
        token: &str,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> String {
        let response = self
            .request(
                "POST",
                "/api/accounts",
                Some(json!({
                    "isAdmin": is_admin,
                    "username": username,
                    "password": password,
                })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.body
        );
        response.data()["id"].as_str().expect("id").to_string()
    }
}
