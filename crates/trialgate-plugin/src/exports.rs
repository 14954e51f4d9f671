//! Registration bundle produced by a plugin crate.

use std::sync::Arc;

use crate::hooks::definitions::HookPoint;
use crate::hooks::registry::HookHandler;
use crate::registry::Plugin;

/// A fully assembled plugin ready for [`PluginManager::load_plugin`].
///
/// [`PluginManager::load_plugin`]: crate::manager::PluginManager::load_plugin
#[derive(Debug)]
pub struct PluginExport {
    /// The plugin instance.
    pub plugin: Arc<dyn Plugin>,
    /// Hook handlers to register, keyed by hook point.
    pub handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>,
}

impl PluginExport {
    /// Creates a new plugin export with no handlers.
    pub fn new(plugin: Arc<dyn Plugin>) -> Self {
        Self {
            plugin,
            handlers: Vec::new(),
        }
    }

    /// Adds a hook handler.
    pub fn on(mut self, hook: HookPoint, handler: Arc<dyn HookHandler>) -> Self {
        self.handlers.push((hook, handler));
        self
    }
}
