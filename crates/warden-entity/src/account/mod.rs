//! Account entity and its create/update/view shapes.

pub mod model;

pub use model::{Account, AccountChanges, AccountProfile, NewAccount};
