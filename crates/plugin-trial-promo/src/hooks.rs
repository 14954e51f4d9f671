//! Hook implementations for the trial promo plugin.
//!
//! Translates platform hook payloads into checker and annotator calls and
//! translates their answers back into hook results.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use trialgate_core::config::FailurePolicy;
use trialgate_core::types::id::{ClientId, ProductId};
use trialgate_entity::cart::{CartLine, CartSnapshot};
use trialgate_entity::checkout::CheckoutContext;
use trialgate_plugin::hooks::definitions::{HookPayload, HookResult};
use trialgate_plugin::hooks::registry::HookHandler;

use crate::annotator::AdminListAnnotator;
use crate::eligibility::{EligibilityResult, TrialEligibilityChecker};
use crate::error::TrialPromoError;

/// Plugin id reported on every hook result.
pub const PLUGIN_ID: &str = "trial-promo";

/// Hook handler for `ShoppingCartValidateCheckout`.
#[derive(Debug)]
pub struct ValidateCheckoutHook {
    /// Eligibility rule.
    checker: Arc<TrialEligibilityChecker>,
    /// Decision when eligibility cannot be determined.
    failure_policy: FailurePolicy,
    /// Message used by the `closed` policy.
    unavailable_message: String,
}

impl ValidateCheckoutHook {
    /// Create a new checkout validation hook handler.
    pub fn new(
        checker: Arc<TrialEligibilityChecker>,
        failure_policy: FailurePolicy,
        unavailable_message: impl Into<String>,
    ) -> Self {
        Self {
            checker,
            failure_policy,
            unavailable_message: unavailable_message.into(),
        }
    }

    fn undetermined(&self, payload: &HookPayload, error: &dyn std::fmt::Display) -> HookResult {
        match self.failure_policy {
            FailurePolicy::Closed => {
                warn!(
                    invocation_id = %payload.invocation_id,
                    error = %error,
                    "Trial eligibility undetermined, blocking checkout"
                );
                HookResult::halt(PLUGIN_ID, &self.unavailable_message)
            }
            FailurePolicy::Open => {
                warn!(
                    invocation_id = %payload.invocation_id,
                    error = %error,
                    "Trial eligibility undetermined, allowing checkout"
                );
                HookResult::continue_execution(PLUGIN_ID)
            }
        }
    }
}

#[async_trait]
impl HookHandler for ValidateCheckoutHook {
    async fn handle(&self, payload: &HookPayload) -> HookResult {
        let (cart, ctx) = match checkout_from_payload(payload) {
            Ok(inputs) => inputs,
            Err(e) => return self.undetermined(payload, &e),
        };

        match self.checker.evaluate(&cart, &ctx).await {
            Ok(EligibilityResult::Accept) => HookResult::continue_execution(PLUGIN_ID),
            Ok(EligibilityResult::Reject(reason)) => {
                info!(
                    invocation_id = %payload.invocation_id,
                    reason = %reason,
                    account_id = ?ctx.account_id,
                    "Checkout rejected by trial promo rule"
                );
                HookResult::halt(PLUGIN_ID, self.checker.message_for(reason))
            }
            Err(e) => self.undetermined(payload, &e),
        }
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }
}

/// Hook handler for `AdminAreaHeadOutput`.
#[derive(Debug)]
pub struct AdminHeadOutputHook {
    /// Product list annotator.
    annotator: Arc<AdminListAnnotator>,
}

impl AdminHeadOutputHook {
    /// Create a new admin head output hook handler.
    pub fn new(annotator: Arc<AdminListAnnotator>) -> Self {
        Self { annotator }
    }
}

#[async_trait]
impl HookHandler for AdminHeadOutputHook {
    async fn handle(&self, payload: &HookPayload) -> HookResult {
        let page = payload.get_str("filename").unwrap_or_default();

        match self.annotator.render(page) {
            Some(fragment) => {
                HookResult::continue_with_output(PLUGIN_ID, Value::String(fragment.into_string()))
            }
            None => HookResult::continue_execution(PLUGIN_ID),
        }
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }
}

/// Read the cart and shopper identity out of a checkout payload.
///
/// Keys follow the platform: `clientId`, `email`, `promocode`, and `cart`
/// as an array of objects carrying `pid`. Ids may arrive as numbers or
/// numeric strings. A missing cart is an empty cart; a line whose `pid` is
/// missing or unparseable is kept as a line without a product.
pub fn checkout_from_payload(
    payload: &HookPayload,
) -> Result<(CartSnapshot, CheckoutContext), TrialPromoError> {
    let cart = match payload.get_data("cart") {
        None => CartSnapshot::default(),
        Some(Value::Array(lines)) => lines.iter().map(cart_line).collect(),
        Some(other) => {
            return Err(TrialPromoError::MalformedPayload {
                field: "cart",
                reason: format!("expected an array, got {}", json_type(other)),
            });
        }
    };

    let ctx = CheckoutContext {
        account_id: payload
            .get_i64("clientId")
            .map(ClientId::new)
            .filter(|id| id.is_assigned()),
        email: payload.get_str("email").map(str::to_string),
        promo_code: payload.get_str("promocode").map(str::to_string),
    };

    Ok((cart, ctx))
}

fn cart_line(value: &Value) -> CartLine {
    let pid = match value.get("pid") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    CartLine {
        pid: pid.map(ProductId::new),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trialgate_core::config::TrialPromoConfig;
    use trialgate_core::error::AppError;
    use trialgate_core::result::AppResult;
    use trialgate_core::traits::HostingHistory;
    use trialgate_core::types::lookup::HistoryQuery;
    use trialgate_core::types::status::HostingStatus;
    use trialgate_database::MemoryHostingHistory;
    use trialgate_entity::hosting::HostingRecord;
    use trialgate_plugin::hooks::definitions::{HookAction, HookPoint};

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl HostingHistory for Unreachable {
        async fn exists(&self, _query: &HistoryQuery) -> AppResult<bool> {
            Err(AppError::database("connection refused"))
        }
    }

    fn hook(history: Arc<dyn HostingHistory>, policy: FailurePolicy) -> ValidateCheckoutHook {
        let config = Arc::new(TrialPromoConfig::for_product(ProductId::new(7)));
        let message = config.messages.lookup_unavailable.clone();
        ValidateCheckoutHook::new(
            Arc::new(TrialEligibilityChecker::new(config, history)),
            policy,
            message,
        )
    }

    fn checkout(data: Value) -> HookPayload {
        let mut payload = HookPayload::new(HookPoint::ShoppingCartValidateCheckout);
        if let Value::Object(map) = data {
            payload.data.extend(map);
        }
        payload
    }

    fn halt_reason(result: &HookResult) -> Option<&str> {
        match &result.action {
            HookAction::Halt { reason } => Some(reason),
            HookAction::Continue => None,
        }
    }

    #[tokio::test]
    async fn test_reused_trial_halts_with_message() {
        let store = Arc::new(MemoryHostingHistory::new(vec![HostingRecord {
            id: 1,
            userid: ClientId::new(1),
            packageid: ProductId::new(7),
            domainstatus: HostingStatus::Active,
            email: None,
        }]));
        let payload = checkout(json!({"clientId": "1", "promocode": "", "cart": [{"pid": "7"}]}));

        let result = hook(store, FailurePolicy::Closed).handle(&payload).await;
        assert_eq!(
            halt_reason(&result),
            Some("You cannot use a promo code for this trial product again.")
        );
    }

    #[tokio::test]
    async fn test_missing_promo_halts_with_message() {
        let payload = checkout(json!({"email": "", "cart": [{"pid": 7}]}));

        let result = hook(Arc::new(MemoryHostingHistory::default()), FailurePolicy::Closed)
            .handle(&payload)
            .await;
        assert_eq!(
            halt_reason(&result),
            Some("You must apply a promo code to checkout with a trial product.")
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_closed_blocks() {
        let payload = checkout(json!({"clientId": 4, "promocode": "X", "cart": [{"pid": 7}]}));

        let result = hook(Arc::new(Unreachable), FailurePolicy::Closed)
            .handle(&payload)
            .await;
        assert_eq!(
            halt_reason(&result),
            Some("We could not verify trial eligibility right now. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_open_allows() {
        let payload = checkout(json!({"clientId": 4, "promocode": "X", "cart": [{"pid": 7}]}));

        let result = hook(Arc::new(Unreachable), FailurePolicy::Open)
            .handle(&payload)
            .await;
        assert!(!result.is_halt());
    }

    #[tokio::test]
    async fn test_no_trial_in_cart_never_queries() {
        let payload = checkout(json!({"clientId": 4, "cart": [{"pid": 50}, {}]}));

        let result = hook(Arc::new(Unreachable), FailurePolicy::Closed)
            .handle(&payload)
            .await;
        assert!(!result.is_halt());
    }

    #[test]
    fn test_payload_parsing() {
        let payload = checkout(json!({
            "clientId": 0,
            "email": "a@b.com",
            "promocode": "SPRING",
            "cart": [{"pid": "7"}, {"pid": "abc"}, {"qty": 1}]
        }));

        let (cart, ctx) = checkout_from_payload(&payload).unwrap();
        assert_eq!(ctx.account_id, None);
        assert_eq!(ctx.email(), Some("a@b.com"));
        assert!(ctx.has_promo_code());
        assert_eq!(cart.lines().len(), 3);
        assert!(cart.contains_product(ProductId::new(7)));
        assert_eq!(cart.lines()[1].pid, None);
    }

    #[test]
    fn test_non_array_cart_is_malformed() {
        let payload = checkout(json!({"cart": "7"}));
        let err = checkout_from_payload(&payload).unwrap_err();
        assert!(matches!(err, TrialPromoError::MalformedPayload { field: "cart", .. }));
    }

    #[tokio::test]
    async fn test_admin_head_output() {
        let config = TrialPromoConfig::for_product(ProductId::new(7));
        let hook = AdminHeadOutputHook::new(Arc::new(AdminListAnnotator::new(&config)));

        let listing = HookPayload::new(HookPoint::AdminAreaHeadOutput)
            .with_string("filename", "configproducts");
        let result = hook.handle(&listing).await;
        let output = result.output.as_ref().and_then(Value::as_str).unwrap();
        assert!(output.contains("[7]"));

        let other = HookPayload::new(HookPoint::AdminAreaHeadOutput)
            .with_string("filename", "clientsservices");
        assert!(hook.handle(&other).await.output.is_none());
    }
}
