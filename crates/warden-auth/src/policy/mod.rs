//! Access policy for account operations.

pub mod enforcer;
pub mod rules;

pub use enforcer::AccessPolicy;
pub use rules::Operation;
