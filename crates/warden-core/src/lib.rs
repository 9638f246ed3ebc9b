//! # warden-core
//!
//! Core crate for the Warden account service. Contains the unified error
//! system, configuration schemas, typed identifiers, and the injectable
//! time source used for token expiry.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
