//! `Caller` extractor: optional claims from the `Authorization` header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use warden_auth::Claims;

use crate::state::AppState;

/// The validated claims of the caller, if any.
///
/// A missing header, a non-bearer scheme, and a token that fails validation
/// all yield `None`. The service then decides whether an anonymous caller
/// may proceed.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<Claims>);

impl Caller {
    /// Borrowed claims, in the shape the service expects.
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }
}

/// Returns the token of a `Bearer` authorization value.
pub(crate) fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
        else {
            return Ok(Caller(None));
        };

        match state.accounts.validate_token(token) {
            Ok(claims) => Ok(Caller(Some(claims))),
            Err(e) => {
                debug!(kind = %e.kind, "Ignoring invalid bearer token");
                Ok(Caller(None))
            }
        }
    }
}
