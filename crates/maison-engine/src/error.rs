use thiserror::Error;

/// An intent the cart refused because it was structurally invalid.
///
/// A rejected intent leaves the store untouched and nothing about it is
/// recorded in store state. The value is returned only so the immediate
/// caller can react; callers that pre-validate can ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("quantity must be at least 1")]
    NonPositiveQuantity,

    #[error("product id is required")]
    MissingProductId,

    #[error("price for product {product_id} is negative")]
    NegativePrice { product_id: String },

    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: String },

    #[error("quantity for product {product_id} would overflow")]
    QuantityOverflow { product_id: String },

    #[error("cart total would overflow after changing product {product_id}")]
    TotalOverflow { product_id: String },
}
