//! Custom Axum extractors.

pub mod claims;

pub use claims::Caller;
