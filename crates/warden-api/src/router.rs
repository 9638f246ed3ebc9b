//! Route definitions for the Warden HTTP API.
//!
//! Account and auth routes are mounted under `/api`; the health probe sits
//! at the root.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(account_routes())
        .merge(auth_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Account CRUD
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            post(handlers::account::create_account).get(handlers::account::list_accounts),
        )
        .route(
            "/accounts/{id}",
            get(handlers::account::get_account).patch(handlers::account::update_account),
        )
}

/// Token issuance and validation
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(handlers::auth::issue_token))
        .route("/auth/validate", post(handlers::auth::validate_token))
}
