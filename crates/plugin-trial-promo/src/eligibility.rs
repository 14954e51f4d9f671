//! Checkout eligibility for the trial product.
//!
//! The decision for one checkout attempt:
//!
//! 1. No cart line references the trial product: accept.
//! 2. The shopper held the trial product before: reject as already used.
//!    A logged-in account matches records in every status. A guest email
//!    matches records in every status except `Cancelled`.
//! 3. No promo code applied: reject as missing promo code.
//! 4. Otherwise accept.
//!
//! At most one history query runs per evaluation, however many trial
//! lines the cart holds.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use trialgate_core::config::TrialPromoConfig;
use trialgate_core::result::AppResult;
use trialgate_core::traits::HostingHistory;
use trialgate_core::types::id::ProductId;
use trialgate_core::types::lookup::HistoryQuery;
use trialgate_core::types::status::HostingStatus;
use trialgate_entity::cart::CartSnapshot;
use trialgate_entity::checkout::CheckoutContext;

/// Why a checkout attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Trial product in cart without a promo code.
    MissingPromoCode,
    /// The shopper already held the trial product.
    AlreadyUsedTrial,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPromoCode => write!(f, "missing_promo_code"),
            Self::AlreadyUsedTrial => write!(f, "already_used_trial"),
        }
    }
}

/// Outcome of evaluating one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum EligibilityResult {
    /// Checkout may proceed.
    Accept,
    /// Checkout is blocked.
    Reject(RejectReason),
}

impl EligibilityResult {
    /// Whether checkout may proceed.
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Evaluates checkout attempts against the trial product rule.
pub struct TrialEligibilityChecker {
    config: Arc<TrialPromoConfig>,
    history: Arc<dyn HostingHistory>,
}

impl fmt::Debug for TrialEligibilityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrialEligibilityChecker")
            .field("trial_product", &self.config.product_id)
            .finish_non_exhaustive()
    }
}

impl TrialEligibilityChecker {
    /// Create a checker reading prior usage from `history`.
    pub fn new(config: Arc<TrialPromoConfig>, history: Arc<dyn HostingHistory>) -> Self {
        Self { config, history }
    }

    /// The product this checker guards.
    pub fn trial_product(&self) -> ProductId {
        self.config.trial_product()
    }

    /// Shopper-facing message for a rejection.
    pub fn message_for(&self, reason: RejectReason) -> &str {
        match reason {
            RejectReason::MissingPromoCode => &self.config.messages.promo_required,
            RejectReason::AlreadyUsedTrial => &self.config.messages.trial_reused,
        }
    }

    /// Decide whether `cart` may be checked out by the shopper in `ctx`.
    ///
    /// A failed history query is returned as an error untouched.
    pub async fn evaluate(
        &self,
        cart: &CartSnapshot,
        ctx: &CheckoutContext,
    ) -> AppResult<EligibilityResult> {
        let trial_product = self.trial_product();

        if !cart.contains_product(trial_product) {
            return Ok(EligibilityResult::Accept);
        }

        if self.has_prior_usage(ctx, trial_product).await? {
            debug!(product_id = %trial_product, "Trial product already used");
            return Ok(EligibilityResult::Reject(RejectReason::AlreadyUsedTrial));
        }

        if !ctx.has_promo_code() {
            return Ok(EligibilityResult::Reject(RejectReason::MissingPromoCode));
        }

        Ok(EligibilityResult::Accept)
    }

    async fn has_prior_usage(&self, ctx: &CheckoutContext, product_id: ProductId) -> AppResult<bool> {
        let query = match (ctx.account_id.filter(|id| id.is_assigned()), ctx.email()) {
            (Some(account_id), _) => {
                HistoryQuery::for_client(account_id, product_id, &HostingStatus::ALL)
            }
            (None, Some(email)) => {
                HistoryQuery::for_email(email, product_id, &[HostingStatus::Cancelled])
            }
            (None, None) => return Ok(false),
        };

        self.history.exists(&query).await
    }
}
