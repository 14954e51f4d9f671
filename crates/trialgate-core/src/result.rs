//! Convenience result type alias for TrialGate.

use crate::error::AppError;

/// A specialized `Result` type for TrialGate operations.
pub type AppResult<T> = Result<T, AppError>;
