//! Admin product list highlighting.
//!
//! On the product configuration page the platform's admin area renders a
//! table of products. The fragment emitted here runs in the browser and
//! tints every row whose edit link points at a highlighted product, then
//! appends a badge to the row's first cell.

use std::fmt;

use serde_json::json;

use trialgate_core::config::{AnnotatorConfig, TrialPromoConfig};

const ROW_SELECTOR: &str = "#tableBackground > table > tbody > tr";

/// Markup to be injected into the admin page `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupFragment(String);

impl MarkupFragment {
    /// The markup text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fragment, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MarkupFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders the product list highlight for the admin area.
#[derive(Debug, Clone)]
pub struct AdminListAnnotator {
    product_ids: Vec<i64>,
    settings: AnnotatorConfig,
}

impl AdminListAnnotator {
    /// Highlight the trial product plus any extra products in `config`.
    pub fn new(config: &TrialPromoConfig) -> Self {
        let mut product_ids = vec![config.product_id];
        for id in &config.annotator.extra_product_ids {
            if !product_ids.contains(id) {
                product_ids.push(*id);
            }
        }

        Self {
            product_ids,
            settings: config.annotator.clone(),
        }
    }

    /// Product ids that will be highlighted, trial product first.
    pub fn product_ids(&self) -> &[i64] {
        &self.product_ids
    }

    /// The fragment for `page`, or `None` for every page but the product list.
    pub fn render(&self, page: &str) -> Option<MarkupFragment> {
        if page != self.settings.page {
            return None;
        }

        let ids = script_literal(&json!(self.product_ids));
        let color = script_literal(&json!(self.settings.highlight_color));
        let badge = script_literal(&json!(self.settings.badge_label));

        Some(MarkupFragment(format!(
            r#"<script type="text/javascript">
$(document).ready(function() {{
    var badge = $('<label class="label label-success"></label>').text({badge});
    $.each({ids}, function(key, value) {{
        var row = $('{ROW_SELECTOR}').find("a[href$='?action=edit&id=" + value + "']").closest('tr');
        row.find('td').css('background-color', {color});
        row.find('td:first').append(' ').append(badge.clone());
    }});
}});
</script>"#
        )))
    }
}

/// Serialize a JSON value for embedding inside a `<script>` element.
fn script_literal(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialgate_core::types::id::ProductId;

    fn annotator(config: TrialPromoConfig) -> AdminListAnnotator {
        AdminListAnnotator::new(&config)
    }

    #[test]
    fn test_product_list_page_gets_fragment() {
        let fragment = annotator(TrialPromoConfig::for_product(ProductId::new(7)))
            .render("configproducts")
            .expect("fragment for product list");

        let text = fragment.as_str();
        assert!(text.contains("$.each([7],"));
        assert!(text.contains("'background-color', \"#d2eed0\""));
        assert!(text.contains(".text(\"Promo\")"));
        assert!(text.contains("#tableBackground > table > tbody > tr"));
        assert!(text.contains("?action=edit&id="));
    }

    #[test]
    fn test_other_pages_get_nothing() {
        let annotator = annotator(TrialPromoConfig::for_product(ProductId::new(7)));
        assert!(annotator.render("clientsservices").is_none());
        assert!(annotator.render("").is_none());
    }

    #[test]
    fn test_extra_products_deduplicated() {
        let mut config = TrialPromoConfig::for_product(ProductId::new(7));
        config.annotator.extra_product_ids = vec![12, 7, 12];
        let annotator = annotator(config);

        assert_eq!(annotator.product_ids(), &[7, 12]);
        let fragment = annotator.render("configproducts").expect("fragment");
        assert!(fragment.as_str().contains("$.each([7,12],"));
    }

    #[test]
    fn test_badge_text_cannot_close_script() {
        let mut config = TrialPromoConfig::for_product(ProductId::new(7));
        config.annotator.badge_label = "</script><b>".to_string();
        let fragment = annotator(config).render("configproducts").expect("fragment");

        assert_eq!(fragment.as_str().matches("</script>").count(), 1);
        assert!(fragment.as_str().contains(r#".text("<\/script><b>")"#));
    }

    #[test]
    fn test_custom_page_name() {
        let mut config = TrialPromoConfig::for_product(ProductId::new(7));
        config.annotator.page = "products".to_string();
        let annotator = annotator(config);

        assert!(annotator.render("configproducts").is_none());
        assert!(annotator.render("products").is_some());
    }
}
