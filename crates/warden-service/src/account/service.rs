//! Account operations: create, update, get, list, authenticate, validate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use warden_auth::jwt::{Claims, TokenAuthenticator};
use warden_auth::password::CredentialHasher;
use warden_auth::policy::{AccessPolicy, Operation};
use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::AccountId;
use warden_database::repositories::AccountRepository;
use warden_entity::account::{AccountChanges, AccountProfile, NewAccount};

/// Message shared by every failed authentication, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Password behind the decoy digest checked for unknown usernames.
const DECOY_PASSWORD: &str = "warden-decoy-password";

/// Orchestrates policy, hashing, tokens, and storage for account operations.
#[derive(Clone)]
pub struct AccountService {
    /// Account store.
    repo: Arc<dyn AccountRepository>,
    /// Token issuance and validation.
    authenticator: Arc<dyn TokenAuthenticator>,
    /// Password hasher.
    hasher: Arc<CredentialHasher>,
    /// Access rules.
    policy: AccessPolicy,
    /// Digest verified against when the username is unknown, so both
    /// failure paths pay for one Argon2 verification. Built on first use.
    decoy_digest: Arc<OnceCell<String>>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Request to create an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub is_admin: bool,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Request to update an account. `None` leaves a field unchanged, and so
/// does an empty password or email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub is_admin: Option<bool>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub id: AccountId,
    pub token: String,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        authenticator: Arc<dyn TokenAuthenticator>,
        hasher: Arc<CredentialHasher>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            repo,
            authenticator,
            hasher,
            policy,
            decoy_digest: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &Arc<dyn AccountRepository> {
        &self.repo
    }

    /// Creates an account and returns its id.
    pub async fn create(
        &self,
        caller: Option<&Claims>,
        req: CreateAccountRequest,
    ) -> AppResult<AccountId> {
        self.policy.authorize(caller, &Operation::Create)?;
        validate_username(&req.username)?;

        let password_hash = self.hash_password(req.password).await?;
        let id = self
            .repo
            .create(NewAccount {
                is_admin: req.is_admin,
                username: req.username,
                email: req.email.filter(|e| !e.is_empty()),
                password_hash,
            })
            .await?;

        info!(
            account_id = %id,
            created_by = ?caller.map(|c| c.user_id),
            is_admin = req.is_admin,
            "Account created"
        );
        Ok(id)
    }

    /// Applies a partial update to the target account.
    ///
    /// Only admins or the account itself may update it; only admins may
    /// touch `is_admin`.
    pub async fn update(
        &self,
        caller: Option<&Claims>,
        id: AccountId,
        req: UpdateAccountRequest,
    ) -> AppResult<AccountProfile> {
        self.policy.authorize(
            caller,
            &Operation::Update {
                target: id,
                changes_admin: req.is_admin.is_some(),
            },
        )?;
        if let Some(username) = &req.username {
            validate_username(username)?;
        }

        let password_hash = match req.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let account = self
            .repo
            .update(
                id,
                AccountChanges {
                    is_admin: req.is_admin,
                    username: req.username,
                    email: req.email.filter(|e| !e.is_empty()),
                    password_hash,
                },
            )
            .await?;

        info!(account_id = %id, "Account updated");
        Ok(account.into())
    }

    /// Gets one account.
    pub async fn get(&self, caller: Option<&Claims>, id: AccountId) -> AppResult<AccountProfile> {
        self.policy.authorize(caller, &Operation::Get)?;
        Ok(self.repo.get(id).await?.into())
    }

    /// Lists all accounts.
    pub async fn get_all(&self, caller: Option<&Claims>) -> AppResult<Vec<AccountProfile>> {
        self.policy.authorize(caller, &Operation::GetAll)?;
        let accounts = self.repo.get_all().await?;
        Ok(accounts.into_iter().map(AccountProfile::from).collect())
    }

    /// Verifies a username/password pair and issues a token.
    ///
    /// An unknown username and a wrong password both fail with
    /// `InvalidCredentials` and the same message, and both run one password
    /// verification. The token carries the account's privilege flag as
    /// stored right now.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<AuthToken> {
        let account = match self.repo.get_by_username(username).await {
            Ok(account) => account,
            Err(e) if e.is(ErrorKind::NotFound) => {
                let decoy = self.decoy_digest().await?;
                // Outcome ignored: the username is unknown either way.
                let _ = self.verify_password(decoy, password.to_string()).await?;
                debug!("Authentication failed: unknown username");
                return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
            }
            Err(e) => return Err(e),
        };

        let matches = self
            .verify_password(account.password_hash, password.to_string())
            .await?;
        if !matches {
            debug!(account_id = %account.id, "Authentication failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let token = self.authenticator.issue(account.id, account.is_admin)?;
        info!(account_id = %account.id, "Token issued");

        Ok(AuthToken {
            id: account.id,
            token,
        })
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        self.authenticator.validate(token)
    }

    /// Hashes on the blocking pool; Argon2 is deliberately slow.
    pub(crate) async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Returns the decoy digest, hashing it on first call.
    async fn decoy_digest(&self) -> AppResult<String> {
        self.decoy_digest
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD.to_string()))
            .await
            .cloned()
    }

    async fn verify_password(&self, digest: String, password: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    Ok(())
}
