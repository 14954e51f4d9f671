//! TrialGate Server: trial product promo code enforcement for a hosting platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use plugin_trial_promo::TrialPromoPlugin;
use trialgate_api::AppState;
use trialgate_core::config::AppConfig;
use trialgate_core::error::AppError;
use trialgate_database::{DatabasePool, HostingRepository};
use trialgate_plugin::manager::PluginManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir =
        std::env::var("TRIALGATE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("TRIALGATE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_dir, &env)
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

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting TrialGate");

    // ── Step 1: Database pool ────────────────────────────────────
    let db_pool = DatabasePool::connect_lazy(&config.database)?;
    match db_pool.health_check().await {
        Ok(_) => tracing::info!("Database reachable"),
        Err(e) => tracing::warn!(error = %e, "Database not reachable yet, continuing"),
    }

    // ── Step 2: Plugins ──────────────────────────────────────────
    let plugin_manager = Arc::new(PluginManager::new());

    if config.trial_promo.enabled {
        let history = Arc::new(HostingRepository::new(
            db_pool.pool().clone(),
            &config.database.hosting_table,
        )?);

        let mut plugin = TrialPromoPlugin::new();
        plugin.initialize(config.trial_promo.clone(), history)?;
        plugin_manager.load_plugin(plugin.export()?).await?;
    } else {
        tracing::warn!("Trial promo rule disabled; hooks will pass through");
    }

    // ── Step 3: HTTP server ──────────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(
        Arc::new(config),
        Arc::clone(&plugin_manager),
        Some(db_pool.clone()),
    );

    trialgate_api::serve(state, shutdown_signal()).await?;

    // ── Step 4: Shutdown ─────────────────────────────────────────
    tracing::info!("Shutting down");
    if tokio::time::timeout(grace, plugin_manager.unload_all())
        .await
        .is_err()
    {
        tracing::warn!(grace_seconds = grace.as_secs(), "Plugin unload timed out");
    }
    db_pool.close().await;

    tracing::info!("TrialGate stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
