//! Bootstrap administrator provisioning.

use tracing::{info, warn};

use warden_core::config::BootstrapConfig;
use warden_core::error::ErrorKind;
use warden_core::result::AppResult;
use warden_core::types::AccountId;
use warden_entity::account::NewAccount;

use super::service::AccountService;

/// What [`AccountService::ensure_bootstrap_admin`] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The administrator was created by this call.
    Created(AccountId),
    /// An account with the bootstrap username already existed and was left
    /// untouched.
    AlreadyPresent,
}

impl AccountService {
    /// Makes sure the bootstrap administrator exists.
    ///
    /// Idempotent: an existing account is never recreated and its password
    /// never reset. Losing a creation race to another instance
    /// (`DuplicateUsername`) counts as success.
    pub async fn ensure_bootstrap_admin(
        &self,
        config: &BootstrapConfig,
    ) -> AppResult<BootstrapOutcome> {
        match self.repository().get_by_username(&config.admin_username).await {
            Ok(existing) => {
                if !existing.is_admin {
                    warn!(
                        account_id = %existing.id,
                        username = %existing.username,
                        "Bootstrap account exists without admin privilege"
                    );
                }
                return Ok(BootstrapOutcome::AlreadyPresent);
            }
            Err(e) if e.is(ErrorKind::NotFound) => {}
            Err(e) => return Err(e),
        }

        let password_hash = self.hash_password(config.admin_password.clone()).await?;
        let created = self
            .repository()
            .create(NewAccount {
                is_admin: true,
                username: config.admin_username.clone(),
                email: Some(config.admin_email.clone()).filter(|e| !e.is_empty()),
                password_hash,
            })
            .await;

        match created {
            Ok(id) => {
                info!(account_id = %id, username = %config.admin_username, "Bootstrap admin created");
                Ok(BootstrapOutcome::Created(id))
            }
            Err(e) if e.is(ErrorKind::DuplicateUsername) => {
                info!(username = %config.admin_username, "Bootstrap admin created concurrently");
                Ok(BootstrapOutcome::AlreadyPresent)
            }
            Err(e) => Err(e),
        }
    }
}
