//! In-memory account repository.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::AccountId;
use warden_entity::account::{Account, AccountChanges, NewAccount};

use super::AccountRepository;

/// Primary map plus username index. Both are only ever mutated together
/// under the write lock.
#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    by_username: HashMap<String, AccountId>,
}

/// Account repository held in process memory.
///
/// Clones share the same store. After [`close`](AccountRepository::close)
/// every operation fails with `StorageUnavailable`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    state: Arc<RwLock<Accounts>>,
    closed: Arc<AtomicBool>,
}

impl MemoryAccountRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::storage_unavailable("Account store is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> AppResult<AccountId> {
        self.ensure_open()?;
        let mut state = self.state.write().await;

        if state.by_username.contains_key(&account.username) {
            return Err(AppError::duplicate_username(format!(
                "Username '{}' already exists",
                account.username
            )));
        }

        let mut id = AccountId::generate();
        while state.by_id.contains_key(&id) {
            id = AccountId::generate();
        }

        let now = Utc::now();
        state.by_username.insert(account.username.clone(), id);
        state.by_id.insert(
            id,
            Account {
                id,
                is_admin: account.is_admin,
                username: account.username,
                email: account.email,
                password_hash: account.password_hash,
                created_at: now,
                updated_at: now,
            },
        );

        debug!(account_id = %id, "Account row inserted");
        Ok(id)
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        self.ensure_open()?;
        let mut state = self.state.write().await;
        let Accounts {
            by_id,
            by_username,
        } = &mut *state;

        let account = by_id
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        if let Some(new_name) = &changes.username {
            match by_username.get(new_name) {
                Some(owner) if *owner != id => {
                    return Err(AppError::duplicate_username(format!(
                        "Username '{new_name}' already exists"
                    )));
                }
                Some(_) => {}
                None => {
                    by_username.remove(&account.username);
                    by_username.insert(new_name.clone(), id);
                }
            }
        }

        changes.apply_to(account, Utc::now());
        debug!(account_id = %id, "Account updated");
        Ok(account.clone())
    }

    async fn get(&self, id: AccountId) -> AppResult<Account> {
        self.ensure_open()?;
        self.state
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Account> {
        self.ensure_open()?;
        let state = self.state.read().await;
        state
            .by_username
            .get(username)
            .and_then(|id| state.by_id.get(id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Account '{username}' not found")))
    }

    async fn get_all(&self) -> AppResult<Vec<Account>> {
        self.ensure_open()?;
        let mut accounts: Vec<Account> = self.state.read().await.by_id.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.ensure_open()
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("In-memory account store closed");
        }
    }
}
