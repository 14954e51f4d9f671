//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use trialgate_core::config::AppConfig;
use trialgate_database::DatabasePool;
use trialgate_plugin::manager::PluginManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Loaded plugins and the hook dispatcher
    pub plugin_manager: Arc<PluginManager>,
    /// Hosting platform database, when one is configured
    pub db_pool: Option<DatabasePool>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Assemble the state.
    pub fn new(
        config: Arc<AppConfig>,
        plugin_manager: Arc<PluginManager>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        Self {
            config,
            plugin_manager,
            db_pool,
            started_at: Instant::now(),
        }
    }
}
