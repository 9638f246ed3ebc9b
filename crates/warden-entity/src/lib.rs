//! # warden-entity
//!
//! Domain models for the Warden account service. [`Account`] is the stored
//! record; [`AccountProfile`] is the view that leaves the service and never
//! carries the password digest.

pub mod account;

pub use account::{Account, AccountChanges, AccountProfile, NewAccount};
