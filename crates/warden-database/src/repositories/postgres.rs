//! PostgreSQL account repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::AccountId;
use warden_entity::account::{Account, AccountChanges, NewAccount};

use super::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, is_admin, username, email, password_hash, created_at, updated_at";

/// Unique constraint on `accounts.username`.
const USERNAME_CONSTRAINT: &str = "accounts_username_key";

/// Account repository backed by the `accounts` table.
///
/// Username uniqueness is enforced by the `accounts_username_key` constraint,
/// so every write is a single statement.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a sqlx error: a violation of the username constraint becomes
/// `DuplicateUsername`, anything else `StorageUnavailable`.
fn map_sqlx_error(err: sqlx::Error, context: &str) -> AppError {
    let duplicate_username = matches!(
        &err,
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(USERNAME_CONSTRAINT)
    );

    if duplicate_username {
        AppError::with_source(ErrorKind::DuplicateUsername, "Username already exists", err)
    } else {
        AppError::with_source(ErrorKind::StorageUnavailable, context.to_string(), err)
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: NewAccount) -> AppResult<AccountId> {
        let id = AccountId::generate();

        sqlx::query(
            "INSERT INTO accounts (id, is_admin, username, email, password_hash) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(account.is_admin)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to create account"))?;

        debug!(account_id = %id, "Account row inserted");
        Ok(id)
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        let query = format!(
            "UPDATE accounts SET \
                 is_admin = COALESCE($2, is_admin), \
                 username = COALESCE($3, username), \
                 email = COALESCE($4, email), \
                 password_hash = COALESCE($5, password_hash), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(changes.is_admin)
            .bind(&changes.username)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to update account"))?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        debug!(account_id = %id, "Account updated");
        Ok(updated)
    }

    async fn get(&self, id: AccountId) -> AppResult<Account> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to find account by id"))?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Account> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to find account by username"))?
            .ok_or_else(|| AppError::not_found(format!("Account '{username}' not found")))
    }

    async fn get_all(&self) -> AppResult<Vec<Account>> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at, id");
        sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to list accounts"))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_sqlx_error(e, "Health check failed"))
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("Database pool closed");
        }
    }
}
