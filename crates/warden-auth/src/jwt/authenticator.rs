//! The token authenticator seam consumed by the account service.

use std::sync::Arc;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::Clock;
use warden_core::types::AccountId;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;

/// Issues and validates bearer tokens.
///
/// Both operations are pure CPU work and never block.
pub trait TokenAuthenticator: Send + Sync + 'static {
    /// Issues a signed token for the account, expiring in 15 minutes.
    fn issue(&self, user_id: AccountId, is_admin: bool) -> AppResult<String>;

    /// Returns the embedded claims of a valid token.
    ///
    /// Fails with `SignatureInvalid` for a bad signature, foreign algorithm
    /// or malformed token, and with `TokenExpired` once `now > expires`.
    fn validate(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 JWT implementation of [`TokenAuthenticator`].
#[derive(Debug, Clone)]
pub struct JwtAuthenticator {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl JwtAuthenticator {
    /// Creates an authenticator; an empty secret is rejected.
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::configuration("empty secret"));
        }

        Ok(Self {
            encoder: JwtEncoder::new(secret.as_bytes(), Arc::clone(&clock)),
            decoder: JwtDecoder::new(secret.as_bytes(), clock),
        })
    }

    /// Creates an authenticator from auth configuration.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        Self::new(&config.jwt_secret, clock)
    }
}

impl TokenAuthenticator for JwtAuthenticator {
    fn issue(&self, user_id: AccountId, is_admin: bool) -> AppResult<String> {
        self.encoder.issue(user_id, is_admin)
    }

    fn validate(&self, token: &str) -> AppResult<Claims> {
        self.decoder.decode(token)
    }
}
