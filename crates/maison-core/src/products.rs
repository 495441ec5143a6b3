use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder written into [`Product::materials`] when the catalog source
/// carries no material data.
pub const MATERIALS_UNAVAILABLE: &str = "Material information not available";

/// A catalog product in the engine's canonical shape.
///
/// Products are immutable once fetched. Identity is [`Product::id`]; two
/// products with the same id are the same catalog entry even if a later
/// fetch changed their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier, stable for the lifetime of a session. The Fake
    /// Store API's numeric id is stringified.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative price with two-decimal currency semantics.
    pub price: Decimal,
    /// Category tag, e.g. `"electronics"` or `"men's clothing"`.
    pub category: String,
    /// Ordered image URLs. Always holds at least one entry for products
    /// produced by the gateway.
    pub images: Vec<String>,
    /// Average rating in `0.0..=5.0`.
    pub rating: f64,
    pub in_stock: bool,
    pub materials: Vec<String>,
    pub dimensions: Dimensions,
    pub reviews: Vec<Review>,
}

impl Product {
    /// Returns the first image URL, used as the thumbnail for cart lines and
    /// liked-product snapshots.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Physical dimensions. The engine treats these as opaque metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: f64,
    pub comment: String,
    /// ISO-8601 date as provided by the source.
    pub date: String,
}

/// Lightweight snapshot of a product the shopper has favorited.
///
/// Distinct from [`Product`] because a product can be liked from a card
/// before its full detail has been loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedProduct {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

impl From<&Product> for LikedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.name.clone(),
            price: product.price,
            image: product.primary_image().unwrap_or_default().to_owned(),
        }
    }
}
