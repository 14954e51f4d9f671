//! Hook dispatcher. Fires hooks and aggregates results.
//!
//! For validation hooks:
//! - Handlers are called in priority order.
//! - The first `Halt` stops the chain; its reason is reported to the caller.
//!
//! For output hooks:
//! - All handlers are called in priority order.
//! - String outputs are collected and concatenated.
//!
//! Handlers run to completion; the dispatcher adds no timeout or retry.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::definitions::{HookAction, HookKind, HookPayload, HookResult};
use super::registry::HookRegistry;

/// Aggregated result of dispatching a hook to all handlers.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Whether execution was halted.
    pub halted: bool,
    /// Halt reason (if halted).
    pub halt_reason: Option<String>,
    /// Plugin that halted (if halted).
    pub halted_by: Option<String>,
    /// All individual handler results.
    pub results: Vec<HookResult>,
    /// String outputs, in handler order.
    pub outputs: Vec<String>,
}

impl DispatchResult {
    /// Outputs joined with newlines, or `None` when no handler produced any.
    pub fn rendered_output(&self) -> Option<String> {
        if self.outputs.is_empty() {
            None
        } else {
            Some(self.outputs.join("\n"))
        }
    }
}

/// Dispatches hooks to all registered handlers.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatches a hook to all registered handlers.
    pub async fn dispatch(&self, payload: &HookPayload) -> DispatchResult {
        let handlers = self.registry.get_handlers(payload.hook).await;

        if handlers.is_empty() {
            return DispatchResult::default();
        }

        debug!(
            hook = %payload.hook,
            invocation_id = %payload.invocation_id,
            handler_count = handlers.len(),
            "Dispatching hook"
        );

        let kind = payload.hook.kind();
        let mut dispatch = DispatchResult::default();

        for handler in &handlers {
            let result = handler.handle(payload).await;

            if let Some(output) = result.output.as_ref().and_then(|v| v.as_str()) {
                if kind == HookKind::Output {
                    dispatch.outputs.push(output.to_string());
                }
            }

            match &result.action {
                HookAction::Continue => {
                    debug!(
                        hook = %payload.hook,
                        plugin_id = %result.plugin_id,
                        "Handler returned Continue"
                    );
                }
                HookAction::Halt { reason } => {
                    if kind == HookKind::Validation {
                        info!(
                            hook = %payload.hook,
                            invocation_id = %payload.invocation_id,
                            plugin_id = %result.plugin_id,
                            reason = %reason,
                            "Handler halted execution"
                        );
                        dispatch.halted = true;
                        dispatch.halt_reason = Some(reason.clone());
                        dispatch.halted_by = Some(result.plugin_id.clone());
                        dispatch.results.push(result);
                        break;
                    }

                    warn!(
                        hook = %payload.hook,
                        plugin_id = %result.plugin_id,
                        "Handler returned Halt for output hook, ignoring"
                    );
                }
            }

            dispatch.results.push(result);
        }

        dispatch
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}
