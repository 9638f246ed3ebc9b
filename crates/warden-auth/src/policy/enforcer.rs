//! Allow/deny decisions for account operations.

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

use crate::jwt::Claims;

use super::rules::Operation;

/// Pure decision rules evaluated before any gated repository access.
///
/// | Operation | Allowed when |
/// |---|---|
/// | Create | any claims (admin claims with `create_requires_admin`) |
/// | Update | admin, or the caller is the target; changing `isAdmin` needs admin |
/// | Get / GetAll | any claims |
///
/// Every denial is the same `NoPermission` error: a missing caller and an
/// under-privileged caller cannot be told apart.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    create_requires_admin: bool,
}

impl AccessPolicy {
    /// Creates the default policy, where any authenticated caller may create
    /// accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the policy described by the auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            create_requires_admin: config.create_requires_admin,
        }
    }

    /// Restricts account creation to admin callers.
    pub fn with_create_requires_admin(mut self, required: bool) -> Self {
        self.create_requires_admin = required;
        self
    }

    /// Returns whether `caller` may perform `operation`.
    pub fn is_allowed(&self, caller: Option<&Claims>, operation: &Operation) -> bool {
        let Some(caller) = caller else {
            return false;
        };

        match operation {
            Operation::Create => caller.is_admin || !self.create_requires_admin,
            Operation::Update {
                target,
                changes_admin,
            } => {
                if *changes_admin {
                    caller.is_admin
                } else {
                    caller.is_admin || caller.user_id == *target
                }
            }
            Operation::Get | Operation::GetAll => true,
        }
    }

    /// Like [`is_allowed`](Self::is_allowed), but returns `NoPermission` on
    /// denial.
    pub fn authorize(&self, caller: Option<&Claims>, operation: &Operation) -> Result<(), AppError> {
        if self.is_allowed(caller, operation) {
            Ok(())
        } else {
            Err(AppError::no_permission(format!("{operation}: no permission")))
        }
    }
}
