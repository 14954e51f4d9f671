//! Trial product and promo code rule configuration.
//!
//! The trial product id has no usable default: a fresh install ships with
//! the placeholder value `0`, and [`TrialPromoConfig::check`] refuses it so
//! the misconfiguration surfaces at startup instead of at checkout.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::types::id::ProductId;

/// Settings for the trial eligibility rule and its admin annotation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrialPromoConfig {
    /// Whether the rule is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Catalog id of the trial product (`tblproducts.id`).
    #[serde(default)]
    #[validate(range(min = 1, message = "trial product id must be set to a real product id"))]
    pub product_id: i64,
    /// Shopper-facing rejection texts.
    #[serde(default)]
    #[validate(nested)]
    pub messages: TrialMessages,
    /// How the storefront presents a rejection. Not used by the rule itself.
    #[serde(default)]
    pub prompt_removal: PromptRemoval,
    /// What to do when hosting history cannot be read.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Product list highlighting in the admin area.
    #[serde(default)]
    #[validate(nested)]
    pub annotator: AnnotatorConfig,
}

impl TrialPromoConfig {
    /// Build a config for `product_id` with every other setting defaulted.
    pub fn for_product(product_id: ProductId) -> Self {
        Self {
            enabled: true,
            product_id: product_id.get(),
            messages: TrialMessages::default(),
            prompt_removal: PromptRemoval::default(),
            failure_policy: FailurePolicy::default(),
            annotator: AnnotatorConfig::default(),
        }
    }

    /// The configured trial product.
    pub fn trial_product(&self) -> ProductId {
        ProductId::new(self.product_id)
    }

    /// Validate every field, mapping failures to a configuration error.
    pub fn check(&self) -> Result<(), AppError> {
        if !self.enabled {
            return Ok(());
        }
        self.validate()?;
        Ok(())
    }
}

/// Shopper-facing rejection texts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrialMessages {
    /// Shown when the trial product is in the cart without a promo code.
    #[serde(default = "default_promo_required")]
    #[validate(length(min = 1))]
    pub promo_required: String,
    /// Shown when the shopper already held the trial product.
    #[serde(default = "default_trial_reused")]
    #[validate(length(min = 1))]
    pub trial_reused: String,
    /// Shown when eligibility cannot be determined and the policy is `closed`.
    #[serde(default = "default_lookup_unavailable")]
    #[validate(length(min = 1))]
    pub lookup_unavailable: String,
}

impl Default for TrialMessages {
    fn default() -> Self {
        Self {
            promo_required: default_promo_required(),
            trial_reused: default_trial_reused(),
            lookup_unavailable: default_lookup_unavailable(),
        }
    }
}

/// Storefront presentation of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRemoval {
    /// Show the message in a modal dialog.
    #[default]
    Modal,
    /// Show the message inline above the cart.
    Inline,
}

/// Outcome applied when the history lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Block checkout with `messages.lookup_unavailable`.
    #[default]
    Closed,
    /// Let checkout continue and log a warning.
    Open,
}

/// Admin product list highlighting.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnotatorConfig {
    /// Admin page (script name without extension) that lists products.
    #[serde(default = "default_page")]
    #[validate(length(min = 1))]
    pub page: String,
    /// Text of the badge appended to the first cell.
    #[serde(default = "default_badge_label")]
    #[validate(length(min = 1, max = 32))]
    pub badge_label: String,
    /// CSS background colour applied to highlighted rows.
    #[serde(default = "default_highlight_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub highlight_color: String,
    /// Further product ids to highlight alongside the trial product.
    #[serde(default)]
    pub extra_product_ids: Vec<i64>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
            badge_label: default_badge_label(),
            highlight_color: default_highlight_color(),
            extra_product_ids: Vec::new(),
        }
    }
}

fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('#').unwrap_or_default();
    let well_formed = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

fn default_true() -> bool {
    true
}

fn default_promo_required() -> String {
    "You must apply a promo code to checkout with a trial product.".to_string()
}

fn default_trial_reused() -> String {
    "You cannot use a promo code for this trial product again.".to_string()
}

fn default_lookup_unavailable() -> String {
    "We could not verify trial eligibility right now. Please try again later.".to_string()
}

fn default_page() -> String {
    "configproducts".to_string()
}

fn default_badge_label() -> String {
    "Promo".to_string()
}

fn default_highlight_color() -> String {
    "#d2eed0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_section() {
        let config: TrialPromoConfig = toml::from_str("product_id = 49").expect("parse toml");
        assert!(config.enabled);
        assert_eq!(config.trial_product(), ProductId::new(49));
        assert_eq!(config.prompt_removal, PromptRemoval::Modal);
        assert_eq!(config.failure_policy, FailurePolicy::Closed);
        assert_eq!(config.annotator.page, "configproducts");
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_placeholder_product_rejected() {
        let config: TrialPromoConfig = toml::from_str("enabled = true").expect("parse toml");
        assert_eq!(config.product_id, 0);
        let err = config.check().expect_err("placeholder must fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_disabled_rule_skips_validation() {
        let config: TrialPromoConfig = toml::from_str("enabled = false").expect("parse toml");
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut config = TrialPromoConfig::for_product(ProductId::new(7));
        config.messages.promo_required = String::new();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_highlight_color_validation() {
        let mut config = TrialPromoConfig::for_product(ProductId::new(7));
        config.annotator.highlight_color = "#abc".to_string();
        assert!(config.check().is_ok());

        config.annotator.highlight_color = "red; background-image: url(x)".to_string();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_policy_and_prompt_parse_lowercase() {
        let config: TrialPromoConfig = toml::from_str(
            "product_id = 3\nfailure_policy = \"open\"\nprompt_removal = \"inline\"",
        )
        .expect("parse toml");
        assert_eq!(config.failure_policy, FailurePolicy::Open);
        assert_eq!(config.prompt_removal, PromptRemoval::Inline);
    }
}
