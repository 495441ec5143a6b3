//! Normalization from Fake Store API types to [`maison_core::Product`].

use maison_core::{Dimensions, Product, MATERIALS_UNAVAILABLE};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::GatewayError;
use crate::types::FakeStoreProduct;

/// Highest rating the storefront displays.
const MAX_RATING: f64 = 5.0;

/// Normalizes a raw [`FakeStoreProduct`] into a [`Product`].
///
/// The id is stringified, `title` becomes `name`, the single `image` becomes
/// a one-element gallery, and `rating.rate` is clamped to `0.0..=5.0`.
/// Fields the API does not carry (materials, dimensions, stock, reviews) get
/// fixed defaults.
///
/// # Errors
///
/// Returns [`GatewayError::Normalization`] if the price is negative, not
/// finite, or too large for a `Decimal`, if the rating is not a number, or
/// if the image URL is empty.
pub fn normalize_product(raw: FakeStoreProduct) -> Result<Product, GatewayError> {
    let product_id = raw.id.to_string();

    let price = normalize_price(raw.price).map_err(|reason| GatewayError::Normalization {
        product_id: product_id.clone(),
        reason,
    })?;

    if raw.rating.rate.is_nan() {
        return Err(GatewayError::Normalization {
            product_id,
            reason: "rating is not a number".into(),
        });
    }
    // Adding 0.0 folds -0.0 into 0.0.
    let rating = raw.rating.rate.clamp(0.0, MAX_RATING) + 0.0;

    let image = raw.image.trim();
    if image.is_empty() {
        return Err(GatewayError::Normalization {
            product_id,
            reason: "product has no image".into(),
        });
    }

    Ok(Product {
        id: product_id,
        name: raw.title,
        description: raw.description,
        price,
        category: raw.category,
        images: vec![image.to_owned()],
        rating,
        in_stock: true,
        materials: vec![MATERIALS_UNAVAILABLE.to_string()],
        dimensions: Dimensions::default(),
        reviews: Vec::new(),
    })
}

/// Normalizes a list response, dropping products that fail normalization.
///
/// One malformed entry should not hide the rest of the catalog; each drop is
/// logged at `warn`.
#[must_use]
pub fn normalize_products(raw: Vec<FakeStoreProduct>) -> Vec<Product> {
    raw.into_iter()
        .filter_map(|item| match normalize_product(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, "skipping product that failed normalization");
                None
            }
        })
        .collect()
}

/// Converts a wire price to a two-decimal amount.
fn normalize_price(price: f64) -> Result<Decimal, String> {
    if !price.is_finite() {
        return Err(format!("price {price} is not finite"));
    }
    if price < 0.0 {
        return Err(format!("price {price} is negative"));
    }
    Decimal::from_f64(price)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| format!("price {price} is out of range"))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
