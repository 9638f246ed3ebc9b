//! # warden-service
//!
//! The account service: the single entry point transports call. Every
//! operation evaluates the access policy before touching the repository;
//! authentication and token validation need no prior claims.
//!
//! Dependencies are injected at construction time as `Arc` trait objects so
//! the repository and token authenticator can be swapped in tests.

pub mod account;

pub use account::{
    AccountService, AuthToken, BootstrapOutcome, CreateAccountRequest, UpdateAccountRequest,
};
