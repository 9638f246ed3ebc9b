//! Application state shared across all handlers.

use std::sync::Arc;

use warden_core::config::AppConfig;
use warden_service::AccountService;

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The account service.
    pub accounts: Arc<AccountService>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(config: Arc<AppConfig>, accounts: Arc<AccountService>) -> Self {
        Self { config, accounts }
    }
}
