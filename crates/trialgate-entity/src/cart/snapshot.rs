//! Read-only view of the cart being checked out.

use serde::{Deserialize, Serialize};

use trialgate_core::types::id::ProductId;

/// One product line of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id. Lines without one (domains, addons) never match a product.
    #[serde(default)]
    pub pid: Option<ProductId>,
}

impl CartLine {
    /// A line for `product_id`.
    pub fn product(product_id: ProductId) -> Self {
        Self {
            pid: Some(product_id),
        }
    }
}

/// Ordered product lines of the cart, as supplied by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// Wrap the given lines.
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Build a snapshot from bare product ids.
    pub fn from_product_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self::new(ids.into_iter().map(CartLine::product).collect())
    }

    /// The cart lines in order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether any line references `product_id`.
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|line| line.pid == Some(product_id))
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<CartLine> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
