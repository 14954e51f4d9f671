//! # trialgate-api
//!
//! HTTP API layer for TrialGate built on Axum.
//!
//! The hosting platform's hook shims forward each hook invocation here as
//! a JSON request; the registered plugins answer through the hook
//! dispatcher.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
