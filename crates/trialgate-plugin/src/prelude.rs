//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::exports::PluginExport;
pub use crate::hooks::definitions::{HookAction, HookKind, HookPayload, HookPoint, HookResult};
pub use crate::hooks::registry::HookHandler;
pub use crate::registry::{Plugin, PluginInfo};

pub use crate::{hook_payload, plugin_info};
