//! Identity and promo information supplied with a checkout attempt.

use serde::{Deserialize, Serialize};

use trialgate_core::types::id::ClientId;

/// What the checkout pipeline knows about the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutContext {
    /// Logged-in client account, if any.
    #[serde(default)]
    pub account_id: Option<ClientId>,
    /// Email entered at checkout, if any.
    #[serde(default)]
    pub email: Option<String>,
    /// Promo code applied to the cart, if any.
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl CheckoutContext {
    /// Context for a logged-in client.
    pub fn for_account(account_id: ClientId) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    /// Context for a guest identified only by email.
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Attach a promo code.
    pub fn with_promo(mut self, promo_code: impl Into<String>) -> Self {
        self.promo_code = Some(promo_code.into());
        self
    }

    /// The email, treating an empty string as absent.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// Whether a non-empty promo code was applied.
    pub fn has_promo_code(&self) -> bool {
        self.promo_code
            .as_deref()
            .is_some_and(|code| !code.is_empty())
    }
}
