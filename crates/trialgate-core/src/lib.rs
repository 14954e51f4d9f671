//! # trialgate-core
//!
//! Core crate for TrialGate. Contains the history lookup port,
//! configuration schemas, typed identifiers, hosting status values,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other TrialGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
