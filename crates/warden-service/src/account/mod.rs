//! Account operations and bootstrap.

pub mod bootstrap;
pub mod service;

pub use bootstrap::BootstrapOutcome;
pub use service::{AccountService, AuthToken, CreateAccountRequest, UpdateAccountRequest};
