//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token signing and access policy configuration.
///
/// Token lifetime and the password hashing cost are deliberately absent:
/// both are compiled into `warden-auth`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for HS256 token signing. Must be non-empty at startup.
    #[serde(default)]
    pub jwt_secret: String,
    /// Require admin claims for account creation. Off by default, which
    /// accepts any authenticated caller.
    #[serde(default)]
    pub create_requires_admin: bool,
}

impl AuthConfig {
    /// Rejects configurations the service must refuse to start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("empty secret"));
        }
        Ok(())
    }
}
