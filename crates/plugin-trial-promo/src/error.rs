//! Error type for the trial promo plugin.

use thiserror::Error;
use trialgate_core::error::AppError;

/// Errors raised while turning hook payloads into checkout inputs, or while
/// wiring the plugin.
#[derive(Debug, Error)]
pub enum TrialPromoError {
    /// A payload field has a shape the rule cannot interpret.
    #[error("Malformed '{field}' in hook payload: {reason}")]
    MalformedPayload {
        /// Payload key.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Hooks were requested before `initialize` ran.
    #[error("Trial promo plugin is not initialized")]
    NotInitialized,

    /// The rule is switched off in configuration.
    #[error("Trial promo rule is disabled")]
    Disabled,
}

impl From<TrialPromoError> for AppError {
    fn from(err: TrialPromoError) -> Self {
        match &err {
            TrialPromoError::MalformedPayload { .. } => AppError::validation(err.to_string()),
            TrialPromoError::NotInitialized | TrialPromoError::Disabled => {
                AppError::plugin(err.to_string())
            }
        }
    }
}
