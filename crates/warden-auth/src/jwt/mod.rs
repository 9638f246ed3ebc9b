//! JWT token issuance, validation, and claims.

pub mod authenticator;
pub mod claims;
pub mod decoder;
pub mod encoder;

pub use authenticator::{JwtAuthenticator, TokenAuthenticator};
pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TOKEN_TTL_SECONDS};
