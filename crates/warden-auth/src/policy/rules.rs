//! Operations gated by the access policy.

use std::fmt;

use warden_core::types::AccountId;

/// An account operation as seen by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a new account.
    Create,
    /// Update `target`. `changes_admin` is set when the request carries an
    /// `isAdmin` value, whatever that value is.
    Update {
        target: AccountId,
        changes_admin: bool,
    },
    /// Read one account.
    Get,
    /// Read all accounts.
    GetAll,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "creating an account"),
            Self::Update { .. } => write!(f, "updating an account"),
            Self::Get => write!(f, "getting an account"),
            Self::GetAll => write!(f, "getting all accounts"),
        }
    }
}
