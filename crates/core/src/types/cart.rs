//! Cart snapshot types.
//!
//! The cart is server-owned. A [`CartSnapshot`] is replaced wholesale from
//! each successful fetch; the client never patches individual lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    #[serde(rename = "productId")]
    pub product: Product,
    /// Quantity, always >= 1. A quantity of 0 removes the line server-side.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// One page of the viewer's cart, as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Cart lines on this page, in server order.
    pub lines: Vec<CartLine>,
    /// 1-based index of this page.
    pub current_page: u32,
    /// Total number of cart pages.
    pub total_pages: u32,
}

impl CartSnapshot {
    /// An empty snapshot, used before the first fetch and after logout.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Subtotal derived from confirmed lines.
    ///
    /// Always recomputed from the snapshot rather than accumulated locally,
    /// so it can never drift from server state.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Whether the snapshot holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            thumbnail: String::new(),
            category: None,
            rating: 0.0,
            labels: Vec::new(),
        }
    }

    #[test]
    fn test_empty_snapshot_subtotal_zero() {
        let snapshot = CartSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let snapshot = CartSnapshot {
            lines: vec![
                CartLine {
                    product: product("a", 120),
                    quantity: 2,
                },
                CartLine {
                    product: product("b", 45),
                    quantity: 1,
                },
            ],
            current_page: 1,
            total_pages: 1,
        };
        assert_eq!(snapshot.subtotal(), Decimal::from(285));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: product("a", 33),
            quantity: 3,
        };
        assert_eq!(line.line_total(), Decimal::from(99));
    }
}
