use maison_core::CartLine;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartState;

/// Read-only view of the cart at checkout time. Building one never mutates
/// the cart, and no order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total: Decimal,
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_cart(cart: &CartState) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::cart::NewCartItem;

    #[test]
    fn summary_reflects_cart_contents() {
        let mut cart = CartState::new();
        cart.add_item(NewCartItem::new("1", "Chair", Decimal::from(50), "img").with_quantity(2))
            .unwrap();
        cart.add_item(NewCartItem::new(
            "2",
            "Lamp",
            Decimal::from_str("19.99").unwrap(),
            "img",
        ))
        .unwrap();

        let summary = CheckoutSummary::from_cart(&cart);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, Decimal::from_str("119.99").unwrap());
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn summary_of_empty_cart() {
        let summary = CheckoutSummary::from_cart(&CartState::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn summary_serializes_total_as_string() {
        let mut cart = CartState::new();
        cart.add_item(NewCartItem::new("1", "Chair", Decimal::from_str("49.50").unwrap(), "img"))
            .unwrap();

        let json = serde_json::to_value(CheckoutSummary::from_cart(&cart)).unwrap();
        assert_eq!(json["total"], "49.50");
        assert_eq!(json["item_count"], 1);
        assert_eq!(json["lines"][0]["product_id"], "1");
    }
}
