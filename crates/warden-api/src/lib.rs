//! # warden-api
//!
//! HTTP transport for the Warden account service built on Axum.
//!
//! The transport only turns bearer tokens into optional claims and maps
//! JSON bodies onto [`warden_service::AccountService`] calls. Every access
//! decision is made by the service.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
