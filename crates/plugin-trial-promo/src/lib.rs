//! Trial product promo code plugin for TrialGate.
//!
//! Blocks checkout of the configured trial product unless a promo code is
//! applied, blocks shoppers who held the trial product before, and flags
//! the trial product in the admin product list.

pub mod annotator;
pub mod eligibility;
pub mod error;
pub mod hooks;
pub mod plugin;

pub use annotator::{AdminListAnnotator, MarkupFragment};
pub use eligibility::{EligibilityResult, RejectReason, TrialEligibilityChecker};
pub use error::TrialPromoError;
pub use plugin::TrialPromoPlugin;
