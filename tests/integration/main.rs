//! HTTP integration tests for the Warden router.

mod account_test;
mod auth_test;
mod helpers;
