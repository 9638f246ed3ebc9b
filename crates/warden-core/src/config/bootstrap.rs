//! Bootstrap administrator configuration.

use serde::{Deserialize, Serialize};

/// The privileged account guaranteed to exist after startup.
///
/// The password only applies when the account is first created; an
/// existing administrator is never reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_username")]
    pub admin_username: String,
    #[serde(default = "default_password")]
    pub admin_password: String,
    #[serde(default = "default_email")]
    pub admin_email: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: default_username(),
            admin_password: default_password(),
            admin_email: default_email(),
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

fn default_email() -> String {
    "admin@no-mail.com".to_string()
}
