//! Response types for the Fake Store API (`https://fakestoreapi.com`).
//!
//! ## Observed shape
//!
//! ### `id`
//! A small positive integer. Stringified during normalization so the engine
//! treats ids as opaque.
//!
//! ### `price`
//! A JSON number with at most two fractional digits in practice (`109.95`,
//! `22.3`, `7.95`). Parsed as `f64` here and rounded to a two-decimal
//! `Decimal` during normalization.
//!
//! ### `image`
//! A single CDN URL. There is no gallery; normalization wraps it in a
//! one-element list.
//!
//! ### `rating`
//! An object `{ "rate": 3.9, "count": 120 }`. Only `rate` reaches the engine.
//! Missing on some mirrors of the API, so it defaults to a zero rating.
//!
//! ### Unknown ids
//! `GET /products/{id}` for an id that does not exist answers `200 OK` with an
//! empty body rather than `404`.

use serde::Deserialize;

/// A single product as returned by `GET /products`, `GET /products/{id}` and
/// `GET /products/category/{category}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FakeStoreProduct {
    pub id: u64,

    pub title: String,

    pub price: f64,

    #[serde(default)]
    pub description: String,

    pub category: String,

    /// Product image URL.
    pub image: String,

    #[serde(default)]
    pub rating: FakeStoreRating,
}

/// Aggregate review score attached to each product.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FakeStoreRating {
    /// Average rating, nominally `0.0..=5.0`.
    pub rate: f64,
    /// Number of ratings behind `rate`.
    #[serde(default)]
    pub count: u32,
}
