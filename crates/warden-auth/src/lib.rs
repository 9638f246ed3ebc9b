//! # warden-auth
//!
//! Authentication and authorization primitives for the Warden account
//! service.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and verification
//! - `jwt`: HS256 token issuance and validation behind [`TokenAuthenticator`]
//! - `policy`: pure allow/deny rules for every account operation

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtAuthenticator, JwtDecoder, JwtEncoder, TokenAuthenticator};
pub use password::CredentialHasher;
pub use policy::{AccessPolicy, Operation};
