//! Unified application error types for Warden.
//!
//! Every crate maps its internal errors into [`AppError`] so callers can
//! branch on [`ErrorKind`] instead of matching on message strings.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The caller is not allowed to perform the operation. Covers both
    /// missing claims and insufficient privilege.
    NoPermission,
    /// The requested account does not exist.
    NotFound,
    /// The username is already taken by another account.
    DuplicateUsername,
    /// Username or password did not match.
    InvalidCredentials,
    /// The token was well-formed and signed but its expiry has passed.
    TokenExpired,
    /// The token signature, algorithm, or structure is invalid.
    SignatureInvalid,
    /// Password hashing or digest parsing failed.
    CredentialError,
    /// The account store could not be reached or failed.
    StorageUnavailable,
    /// Malformed input rejected before reaching the service.
    Validation,
    /// Invalid or missing configuration.
    Configuration,
    /// Unexpected internal failure (token signing, serialization).
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPermission => write!(f, "NO_PERMISSION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::DuplicateUsername => write!(f, "DUPLICATE_USERNAME"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::SignatureInvalid => write!(f, "SIGNATURE_INVALID"),
            Self::CredentialError => write!(f, "CREDENTIAL_ERROR"),
            Self::StorageUnavailable => write!(f, "STORAGE_UNAVAILABLE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Warden.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Create a no-permission error.
    pub fn no_permission(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoPermission, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a duplicate-username error.
    pub fn duplicate_username(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateUsername, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a signature-invalid error.
    pub fn signature_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureInvalid, message)
    }

    /// Create a credential (hashing) error.
    pub fn credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialError, message)
    }

    /// Create a storage-unavailable error.
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageUnavailable, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_kind_code() {
        let err = AppError::duplicate_username("username 'alice' is taken");
        assert_eq!(
            err.to_string(),
            "DUPLICATE_USERNAME: username 'alice' is taken"
        );
    }

    #[test]
    fn test_is_matches_kind() {
        let err = AppError::no_permission("denied");
        assert!(err.is(ErrorKind::NoPermission));
        assert!(!err.is(ErrorKind::NotFound));
    }

    #[test]
    fn test_with_source_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::with_source(ErrorKind::StorageUnavailable, "db down", io);
        assert!(err.source().is_some());
        // Clones drop the boxed cause.
        assert!(err.clone().source().is_none());
    }
}
