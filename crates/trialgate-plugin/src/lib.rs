//! # trialgate-plugin
//!
//! Plugin framework for TrialGate. Provides:
//!
//! - Typed hook points mirroring the hosting platform's extension points
//! - Hook registry with priority-ordered registration
//! - Hook dispatcher with halt semantics for validation hooks and output
//!   collection for output hooks
//! - Plugin lifecycle management (load, start, stop, unload)

pub mod exports;
pub mod hooks;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use exports::PluginExport;
pub use hooks::definitions::{HookAction, HookKind, HookPayload, HookPoint, HookResult};
pub use hooks::dispatcher::{DispatchResult, HookDispatcher};
pub use hooks::registry::{HookHandler, HookRegistry};
pub use manager::PluginManager;
pub use registry::{Plugin, PluginInfo, PluginRegistry};
