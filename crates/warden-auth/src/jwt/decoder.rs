//! JWT token validation.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use warden_core::error::AppError;
use warden_core::traits::Clock;

use super::claims::Claims;

/// Verifies token signatures and expiry.
///
/// Only HS256 is accepted. Expiry is checked against the injected clock
/// rather than by `jsonwebtoken`, since the payload carries `expires`
/// instead of the registered `exp` claim.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature-only validation pinned to HS256.
    validation: Validation,
    /// Time source for expiry.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder for the given secret.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Verifies the signature and algorithm, then checks expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                        AppError::signature_invalid("Unexpected signing algorithm")
                    }
                    JwtErrorKind::InvalidSignature => {
                        AppError::signature_invalid("Invalid token signature")
                    }
                    _ => AppError::signature_invalid("Malformed token"),
                }
            })?
            .claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err(AppError::token_expired("Token has expired"));
        }

        Ok(claims)
    }
}
