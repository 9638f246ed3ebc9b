//! Account repository contract and implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use warden_core::result::AppResult;
use warden_core::types::AccountId;
use warden_entity::account::{Account, AccountChanges, NewAccount};

pub use memory::MemoryAccountRepository;
pub use postgres::PgAccountRepository;

/// Storage of account records, keyed by id and by unique username.
///
/// Implementations must keep `create` and `update` atomic with respect to
/// username uniqueness: two concurrent writers claiming the same username
/// cannot both succeed. Reads never observe a partially written record.
/// Failures of the underlying store surface as `StorageUnavailable` and are
/// not retried here.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persists a new account and returns its freshly allocated id.
    ///
    /// Fails with `DuplicateUsername` if the username is taken.
    async fn create(&self, account: NewAccount) -> AppResult<AccountId>;

    /// Applies the provided fields and returns the updated account.
    ///
    /// Fails with `NotFound` for an unknown id and with `DuplicateUsername`
    /// if the new username belongs to a different account.
    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account>;

    /// Fails with `NotFound`.
    async fn get(&self, id: AccountId) -> AppResult<Account>;

    /// Fails with `NotFound`.
    async fn get_by_username(&self, username: &str) -> AppResult<Account>;

    /// Snapshot of all accounts at call time.
    async fn get_all(&self) -> AppResult<Vec<Account>>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Releases underlying resources. Idempotent.
    async fn close(&self);
}
