//! Hook point definitions with typed payloads.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trialgate_core::error::AppError;

/// Extension points of the hosting platform that TrialGate handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookPoint {
    /// Fired before an order is accepted. Any halt blocks checkout.
    ShoppingCartValidateCheckout,
    /// Fired while rendering an admin page; outputs are injected into `<head>`.
    AdminAreaHeadOutput,
}

/// How the dispatcher treats handler results for a hook point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// A halt stops the chain and the parent operation.
    Validation,
    /// Every handler runs and their outputs are concatenated.
    Output,
}

impl HookPoint {
    /// Every hook point, in registration order.
    pub const ALL: [HookPoint; 2] = [Self::ShoppingCartValidateCheckout, Self::AdminAreaHeadOutput];

    /// Returns the platform name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShoppingCartValidateCheckout => "ShoppingCartValidateCheckout",
            Self::AdminAreaHeadOutput => "AdminAreaHeadOutput",
        }
    }

    /// Returns the dispatch semantics of this hook point.
    pub fn kind(&self) -> HookKind {
        match self {
            Self::ShoppingCartValidateCheckout => HookKind::Validation,
            Self::AdminAreaHeadOutput => HookKind::Output,
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HookPoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|hook| hook.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::not_found(format!("Unknown hook point: '{s}'")))
    }
}

/// Payload passed to hook handlers, carrying the platform's hook variables as a JSON map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    /// The hook point being fired.
    pub hook: HookPoint,
    /// Arbitrary data keyed by string.
    pub data: HashMap<String, serde_json::Value>,
    /// Identifier of this invocation, for log correlation.
    pub invocation_id: Uuid,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
}

impl HookPayload {
    /// Creates a new hook payload.
    pub fn new(hook: HookPoint) -> Self {
        Self {
            hook,
            data: HashMap::new(),
            invocation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }

    /// Inserts a typed data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Inserts an integer value.
    pub fn with_int(self, key: &str, value: i64) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Gets a data value by key, treating JSON `null` as absent.
    pub fn get_data(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    /// Gets a string data value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_data(key).and_then(|v| v.as_str())
    }

    /// Gets an i64 data value. Numeric strings are accepted because the
    /// platform passes request parameters through unconverted.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get_data(key)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Action returned by a hook handler telling the dispatcher what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookAction {
    /// Continue to the next handler.
    Continue,
    /// Halt execution. No further handlers or the main operation will run.
    Halt {
        /// Reason for halting, shown to the user.
        reason: String,
    },
}

/// Result returned from a hook handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResult {
    /// The action the handler wants the dispatcher to take.
    pub action: HookAction,
    /// Optional output data from the handler.
    pub output: Option<serde_json::Value>,
    /// Plugin ID that produced this result.
    pub plugin_id: String,
}

impl HookResult {
    /// Creates a continue result.
    pub fn continue_execution(plugin_id: &str) -> Self {
        Self {
            action: HookAction::Continue,
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a halt result.
    pub fn halt(plugin_id: &str, reason: &str) -> Self {
        Self {
            action: HookAction::Halt {
                reason: reason.to_string(),
            },
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a continue result with output data.
    pub fn continue_with_output(plugin_id: &str, output: serde_json::Value) -> Self {
        Self {
            action: HookAction::Continue,
            output: Some(output),
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Whether this result halts the chain.
    pub fn is_halt(&self) -> bool {
        matches!(self.action, HookAction::Halt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_point_names() {
        assert_eq!(
            "ShoppingCartValidateCheckout".parse::<HookPoint>().expect("parse"),
            HookPoint::ShoppingCartValidateCheckout
        );
        assert_eq!(HookPoint::AdminAreaHeadOutput.kind(), HookKind::Output);
        assert!("ClientAreaPage".parse::<HookPoint>().is_err());
    }

    #[test]
    fn test_get_i64_accepts_numeric_strings() {
        let payload = HookPayload::new(HookPoint::ShoppingCartValidateCheckout)
            .with_string("clientId", "12")
            .with_int("pid", 7)
            .with_data("email", serde_json::Value::Null);
        assert_eq!(payload.get_i64("clientId"), Some(12));
        assert_eq!(payload.get_i64("pid"), Some(7));
        assert_eq!(payload.get_str("email"), None);
    }
}
