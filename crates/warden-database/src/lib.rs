//! # warden-database
//!
//! The [`AccountRepository`] contract and its two implementations:
//! PostgreSQL for production and a lock-guarded in-memory store for tests
//! and single-process deployments.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AccountRepository, MemoryAccountRepository, PgAccountRepository};
