//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use warden_core::types::AccountId;

/// A stored account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Immutable unique identifier.
    pub id: AccountId,
    /// Administrative privilege flag.
    pub is_admin: bool,
    /// Unique, case-sensitive login name.
    pub username: String,
    /// Contact email (optional).
    pub email: Option<String>,
    /// Argon2 password digest.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub is_admin: bool,
    pub username: String,
    pub email: Option<String>,
    /// Already-hashed password.
    pub password_hash: String,
}

/// Partial update of an account. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub is_admin: Option<bool>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Already-hashed password.
    pub password_hash: Option<String>,
}

impl AccountChanges {
    /// Applies the provided fields to `account` in place.
    pub fn apply_to(&self, account: &mut Account, now: DateTime<Utc>) {
        if let Some(is_admin) = self.is_admin {
            account.is_admin = is_admin;
        }
        if let Some(username) = &self.username {
            account.username = username.clone();
        }
        if let Some(email) = &self.email {
            account.email = Some(email.clone());
        }
        if let Some(hash) = &self.password_hash {
            account.password_hash = hash.clone();
        }
        account.updated_at = now;
    }
}

/// Account as returned to callers: everything except the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub is_admin: bool,
    pub username: String,
    pub email: Option<String>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            is_admin: account.is_admin,
            username: account.username,
            email: account.email,
        }
    }
}
