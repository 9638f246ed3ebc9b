//! Claims carried inside every issued token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::types::AccountId;

/// Verified token payload.
///
/// `is_admin` is a snapshot taken at issuance and is not re-checked against
/// the account until a new token is issued. Serialized with the wire names
/// `isAdmin`, `userId` and `expires` (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Privilege flag at issuance time.
    pub is_admin: bool,
    /// The account this token was issued to.
    pub user_id: AccountId,
    /// Expiry as unix seconds.
    pub expires: i64,
}

impl Claims {
    /// A token is expired once `now` is strictly past its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires
    }
}
