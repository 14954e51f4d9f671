//! Plugin manager: lifecycle management for all plugins.

use std::sync::Arc;

use tracing::{error, info, warn};

use trialgate_core::error::AppError;
use trialgate_core::result::AppResult;

use crate::exports::PluginExport;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::HookRegistry;
use crate::registry::{PluginInfo, PluginRegistry};

/// Manages the full lifecycle of plugins: load, start, stop, unload.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    hook_dispatcher: Arc<HookDispatcher>,
}

impl PluginManager {
    /// Creates a new plugin manager.
    pub fn new() -> Self {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = Arc::new(HookDispatcher::new(hook_registry.clone()));

        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            hook_dispatcher,
        }
    }

    /// Loads a compiled-in plugin, registers its hooks, and starts it.
    pub async fn load_plugin(&self, export: PluginExport) -> AppResult<()> {
        let PluginExport { plugin, handlers } = export;
        let info = plugin.info();
        let plugin_id = info.id.clone();

        plugin.on_load().await.map_err(|e| {
            AppError::plugin(format!("Plugin '{plugin_id}' load failed: {}", e.message))
        })?;

        self.plugin_registry.register(plugin.clone()).await?;

        let handler_count = handlers.len();
        for (hook_point, handler) in handlers {
            self.hook_registry.register(hook_point, handler).await;
        }

        if let Err(e) = plugin.on_start().await {
            error!(plugin_id = %plugin_id, error = %e, "Plugin start failed");
            self.hook_registry.unregister_plugin(&plugin_id).await;
            self.plugin_registry.unregister(&plugin_id).await?;
            return Err(AppError::plugin(format!(
                "Plugin '{plugin_id}' start failed: {}",
                e.message
            )));
        }

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            handlers = handler_count,
            "Plugin loaded and started"
        );

        Ok(())
    }

    /// Stops and unloads a plugin.
    pub async fn unload_plugin(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self
            .plugin_registry
            .get(plugin_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        if let Err(e) = plugin.on_stop().await {
            warn!(plugin_id = %plugin_id, error = %e, "Plugin stop returned error");
        }

        self.hook_registry.unregister_plugin(plugin_id).await;
        self.plugin_registry.unregister(plugin_id).await?;

        if let Err(e) = plugin.on_unload().await {
            warn!(plugin_id = %plugin_id, error = %e, "Plugin unload returned error");
        }

        info!(plugin_id = %plugin_id, "Plugin unloaded");

        Ok(())
    }

    /// Stops and unloads all plugins, in reverse priority order.
    pub async fn unload_all(&self) {
        let mut plugins = self.plugin_registry.list().await;
        plugins.reverse();

        for info in &plugins {
            if let Err(e) = self.unload_plugin(&info.id).await {
                error!(plugin_id = %info.id, error = %e, "Error unloading plugin");
            }
        }

        info!("All plugins unloaded");
    }

    /// Returns the hook dispatcher for firing hooks.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.hook_dispatcher
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    /// Lists all loaded plugins.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list().await
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug, Default)]
    struct Lifecycle {
        fail_start: bool,
        stopped: AtomicBool,
    }

    #[async_trait]
    impl Plugin for Lifecycle {
        fn info(&self) -> PluginInfo {
            plugin_info!(
                id: "lifecycle",
                name: "Lifecycle",
                version: "0.1.0",
                description: "test plugin",
                author: "tests",
                hooks: [HookPoint::AdminAreaHeadOutput]
            )
        }

        async fn on_start(&self) -> AppResult<()> {
            if self.fail_start {
                Err(AppError::plugin("boom"))
            } else {
                Ok(())
            }
        }

        async fn on_stop(&self) -> AppResult<()> {
            self.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl HookHandler for Echo {
        async fn handle(&self, _payload: &HookPayload) -> HookResult {
            HookResult::continue_with_output("lifecycle", serde_json::json!("<!-- echo -->"))
        }

        fn plugin_id(&self) -> &str {
            "lifecycle"
        }
    }

    #[tokio::test]
    async fn test_load_dispatch_unload() {
        let manager = PluginManager::new();
        let plugin = Arc::new(Lifecycle::default());
        let export =
            PluginExport::new(plugin.clone()).on(HookPoint::AdminAreaHeadOutput, Arc::new(Echo));

        manager.load_plugin(export).await.unwrap();
        assert_eq!(manager.list_plugins().await.len(), 1);

        let result = manager
            .dispatcher()
            .dispatch(&HookPayload::new(HookPoint::AdminAreaHeadOutput))
            .await;
        assert_eq!(result.rendered_output().as_deref(), Some("<!-- echo -->"));

        manager.unload_all().await;
        assert!(plugin.stopped.load(Ordering::SeqCst));
        assert_eq!(
            manager.hook_registry().handler_count(HookPoint::AdminAreaHeadOutput).await,
            0
        );
    }

    #[tokio::test]
    async fn test_failed_start_rolls_back() {
        let manager = PluginManager::new();
        let plugin = Arc::new(Lifecycle {
            fail_start: true,
            ..Default::default()
        });
        let export = PluginExport::new(plugin).on(HookPoint::AdminAreaHeadOutput, Arc::new(Echo));

        let err = manager.load_plugin(export).await.unwrap_err();
        assert!(err.message.contains("start failed"));
        assert_eq!(manager.plugin_registry().count().await, 0);
        assert_eq!(
            manager.hook_registry().handler_count(HookPoint::AdminAreaHeadOutput).await,
            0
        );
    }
}
