//! Request DTOs with validation.
//!
//! Field names follow the hosting platform's hook variables so the
//! platform-side forwarder can post them unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use trialgate_plugin::hooks::definitions::{HookPayload, HookPoint};

/// Body of `POST /api/hooks/shopping-cart-validate-checkout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCheckoutRequest {
    /// Logged-in client id, as a number or numeric string.
    #[serde(default)]
    pub client_id: Option<Value>,
    /// Email entered at checkout.
    #[serde(default)]
    pub email: Option<String>,
    /// Promo code applied to the cart.
    #[serde(default)]
    pub promocode: Option<String>,
    /// Cart product lines, each an object carrying `pid`. Passed through
    /// untouched; the checkout hook decides what a malformed cart means.
    #[serde(default)]
    pub cart: Option<Value>,
}

impl ValidateCheckoutRequest {
    /// Convert into the hook payload the dispatcher expects.
    pub fn into_payload(self) -> HookPayload {
        HookPayload::new(HookPoint::ShoppingCartValidateCheckout)
            .with_data("clientId", self.client_id.unwrap_or(Value::Null))
            .with_data("email", json!(self.email))
            .with_data("promocode", json!(self.promocode))
            .with_data("cart", self.cart.unwrap_or(Value::Null))
    }
}

/// Body of `POST /api/hooks/admin-area-head-output`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminHeadOutputRequest {
    /// Admin script name without extension, e.g. `configproducts`.
    #[validate(length(min = 1, max = 128, message = "filename must be 1-128 characters"))]
    pub filename: String,
}

impl AdminHeadOutputRequest {
    /// Convert into the hook payload the dispatcher expects.
    pub fn into_payload(self) -> HookPayload {
        HookPayload::new(HookPoint::AdminAreaHeadOutput).with_string("filename", &self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_maps_platform_keys() {
        let request: ValidateCheckoutRequest = serde_json::from_value(json!({
            "clientId": "12",
            "promocode": "SPRING",
            "cart": [{"pid": 7}, {}]
        }))
        .unwrap();

        let payload = request.into_payload();
        assert_eq!(payload.hook, HookPoint::ShoppingCartValidateCheckout);
        assert_eq!(payload.get_i64("clientId"), Some(12));
        assert_eq!(payload.get_str("promocode"), Some("SPRING"));
        assert_eq!(payload.get_str("email"), None);
        assert_eq!(payload.get_data("cart"), Some(&json!([{"pid": 7}, {}])));
    }

    #[test]
    fn test_checkout_request_keeps_odd_cart_shapes() {
        let request: ValidateCheckoutRequest =
            serde_json::from_value(json!({"cart": "7"})).unwrap();
        assert_eq!(request.into_payload().get_data("cart"), Some(&json!("7")));

        let request: ValidateCheckoutRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.into_payload().get_data("cart"), None);
    }

    #[test]
    fn test_empty_filename_rejected() {
        let request = AdminHeadOutputRequest {
            filename: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
