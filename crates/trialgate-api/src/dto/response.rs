//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trialgate_plugin::hooks::dispatcher::DispatchResult;
use trialgate_plugin::registry::PluginInfo;

/// Checkout validation answer. An empty list lets checkout proceed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateCheckoutResponse {
    /// Blocking messages to show the shopper.
    pub errors: Vec<String>,
}

impl From<DispatchResult> for ValidateCheckoutResponse {
    fn from(result: DispatchResult) -> Self {
        Self {
            errors: result.halt_reason.into_iter().collect(),
        }
    }
}

/// Head output answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadOutputResponse {
    /// Markup to inject, or `null`.
    pub output: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
    /// Database status: `connected`, `unreachable`, or `not_configured`.
    pub database: String,
    /// Loaded plugin count.
    pub plugins: usize,
    /// Time of the check.
    pub checked_at: DateTime<Utc>,
}

/// Loaded plugin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginListResponse {
    /// Plugins ordered by priority.
    pub plugins: Vec<PluginInfo>,
}
