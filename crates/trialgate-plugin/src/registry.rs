//! Plugin registry: stores loaded plugin instances and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use trialgate_core::error::AppError;
use trialgate_core::result::AppResult;

use crate::hooks::definitions::HookPoint;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Hook points this plugin registers for.
    pub hooks: Vec<HookPoint>,
    /// Load priority (lower = loaded first).
    pub priority: i32,
}

/// Trait that all plugins must implement.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once when the plugin is loaded.
    async fn on_load(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called when the plugin is started, after its hooks are registered.
    async fn on_start(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called when the plugin is stopped.
    async fn on_stop(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called when the plugin is unloaded.
    async fn on_unload(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Registry of all loaded plugins.
#[derive(Debug)]
pub struct PluginRegistry {
    /// Plugin ID → plugin instance.
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a plugin. Fails if the ID is already taken.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let mut plugins = self.plugins.write().await;

        if plugins.contains_key(&info.id) {
            return Err(AppError::plugin(format!(
                "Plugin '{}' is already registered",
                info.id
            )));
        }

        info!(plugin_id = %info.id, name = %info.name, version = %info.version, "Registering plugin");
        plugins.insert(info.id, plugin);

        Ok(())
    }

    /// Unregisters a plugin by ID.
    pub async fn unregister(&self, plugin_id: &str) -> AppResult<Arc<dyn Plugin>> {
        let plugin = self
            .plugins
            .write()
            .await
            .remove(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        info!(plugin_id = %plugin_id, "Plugin unregistered");

        Ok(plugin)
    }

    /// Gets a plugin by ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.read().await.get(plugin_id).cloned()
    }

    /// Lists all registered plugin metadata, ordered by priority.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<PluginInfo> = plugins.values().map(|p| p.info()).collect();
        infos.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
        infos
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        self.plugins.read().await.len()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        self.plugins.read().await.contains_key(plugin_id)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str, i32);

    impl Plugin for Named {
        fn info(&self) -> PluginInfo {
            PluginInfo {
                id: self.0.to_string(),
                name: self.0.to_string(),
                version: "0.1.0".to_string(),
                description: String::new(),
                author: String::new(),
                hooks: Vec::new(),
                priority: self.1,
            }
        }
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Named("a", 1))).await.unwrap();
        let err = registry.register(Arc::new(Named("a", 1))).await.unwrap_err();
        assert_eq!(err.kind, trialgate_core::error::ErrorKind::Plugin);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_priority() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Named("late", 9))).await.unwrap();
        registry.register(Arc::new(Named("early", 1))).await.unwrap();

        let ids: Vec<String> = registry.list().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["early", "late"]);

        registry.unregister("early").await.unwrap();
        assert!(!registry.contains("early").await);
        assert!(registry.unregister("early").await.is_err());
    }
}
