//! Warden Server: account and token service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use warden_api::AppState;
use warden_auth::{AccessPolicy, CredentialHasher, JwtAuthenticator};
use warden_core::config::{AppConfig, StorageBackend};
use warden_core::error::AppError;
use warden_core::traits::SystemClock;
use warden_database::{
    AccountRepository, DatabasePool, MemoryAccountRepository, PgAccountRepository,
};
use warden_service::{AccountService, BootstrapOutcome};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "warden-server", version, about = "Account and token service")]
struct Args {
    /// Directory holding `default.toml` and per-environment overrides.
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Environment name; selects `{config_dir}/{env}.toml`.
    #[arg(long, env = "WARDEN_ENV", default_value = "development")]
    env: String,

    /// Token signing secret. Overrides `auth.jwt_secret`.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then apply CLI overrides.
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&args.config_dir, &args.env)?;

    if let Some(secret) = args.jwt_secret.as_ref().filter(|s| !s.is_empty()) {
        config.auth.jwt_secret = secret.clone();
    }

    config.auth.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Opens the configured account store.
async fn open_repository(config: &AppConfig) -> Result<Arc<dyn AccountRepository>, AppError> {
    match config.database.backend {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?.into_pool();

            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                warden_database::migration::run_migrations(&pool).await?;
                tracing::info!("Database migrations complete");
            }

            Ok(Arc::new(PgAccountRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory account store; accounts are lost on exit");
            Ok(Arc::new(MemoryAccountRepository::new()))
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Account store ────────────────────────────────────
    let repo = open_repository(&config).await?;

    serve(config, repo).await
}

/// Runs the service on `repo` and closes the store on every exit path.
async fn serve(config: AppConfig, repo: Arc<dyn AccountRepository>) -> Result<(), AppError> {
    let result = serve_accounts(config, Arc::clone(&repo)).await;
    repo.close().await;
    result
}

/// Bootstraps the admin account and serves HTTP until shutdown.
async fn serve_accounts(
    config: AppConfig,
    repo: Arc<dyn AccountRepository>,
) -> Result<(), AppError> {
    // ── Step 2: Auth components ──────────────────────────────────
    let authenticator = Arc::new(JwtAuthenticator::from_config(
        &config.auth,
        Arc::new(SystemClock),
    )?);
    let hasher = Arc::new(CredentialHasher::new());
    let policy = AccessPolicy::from_config(&config.auth);

    let accounts = Arc::new(AccountService::new(
        repo,
        authenticator,
        hasher,
        policy,
    ));

    // ── Step 3: Bootstrap administrator ──────────────────────────
    match accounts.ensure_bootstrap_admin(&config.bootstrap).await? {
        BootstrapOutcome::Created(id) => {
            tracing::warn!(
                account_id = %id,
                username = %config.bootstrap.admin_username,
                "Bootstrap admin created with configured password; change it"
            );
        }
        BootstrapOutcome::AlreadyPresent => {
            tracing::debug!("Bootstrap admin already present");
        }
    }

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = warden_api::build_router(AppState::new(Arc::new(config), accounts));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Warden server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    tokio::select! {
        result = async { server.await } => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Grace period elapsed, dropping open connections");
        }
    }

    tracing::info!("Warden server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
