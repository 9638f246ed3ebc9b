//! JWT token creation.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use warden_core::error::AppError;
use warden_core::traits::Clock;
use warden_core::types::AccountId;

use super::claims::Claims;

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Signs claims with the process-wide HS256 key.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header pinned to HS256.
    header: Header,
    /// Time source for `expires`.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.header.alg)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates an encoder for the given secret.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            clock,
        }
    }

    /// Builds claims expiring [`TOKEN_TTL_SECONDS`] from now.
    pub fn claims_for(&self, user_id: AccountId, is_admin: bool) -> Claims {
        let expires = self.clock.now() + Duration::seconds(TOKEN_TTL_SECONDS);
        Claims {
            is_admin,
            user_id,
            expires: expires.timestamp(),
        }
    }

    /// Signs the given claims into a compact token.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Issues a fresh token for the account.
    pub fn issue(&self, user_id: AccountId, is_admin: bool) -> Result<String, AppError> {
        self.encode(&self.claims_for(user_id, is_admin))
    }
}
