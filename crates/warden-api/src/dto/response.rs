//! Response bodies.

use serde::{Deserialize, Serialize};

use warden_auth::Claims;
use warden_core::types::AccountId;
use warden_service::AuthToken;

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for success responses.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps data in a success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Id of a newly created account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: AccountId,
}

/// Token issued by a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub id: AccountId,
    pub token: String,
}

impl From<AuthToken> for TokenResponse {
    fn from(auth: AuthToken) -> Self {
        Self {
            id: auth.id,
            token: auth.token,
        }
    }
}

/// Claims carried by a validated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsResponse {
    pub is_admin: bool,
    pub user_id: AccountId,
    /// Expiry as Unix seconds.
    pub expires: i64,
}

impl From<Claims> for ClaimsResponse {
    fn from(claims: Claims) -> Self {
        Self {
            is_admin: claims.is_admin,
            user_id: claims.user_id,
            expires: claims.expires,
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
