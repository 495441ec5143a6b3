//! The filter engine: a pure projection from the raw catalog to the view the
//! storefront displays.
//!
//! [`apply_filters`] runs three stages in a fixed order, each consuming the
//! previous stage's output: category, then price range, then sort. The input
//! slice is never mutated. Each stage is public so it can be exercised on its
//! own.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Product;
use crate::CoreError;

/// Inclusive price bounds. A range with `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Sort key for the derived view. "No sort" is expressed by leaving
/// [`FilterSpec::sort_by`] unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    /// Highest rating first.
    #[serde(rename = "rating")]
    RatingDesc,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::PriceAsc => write!(f, "price-asc"),
            SortBy::PriceDesc => write!(f, "price-desc"),
            SortBy::RatingDesc => write!(f, "rating"),
        }
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(SortBy::PriceAsc),
            "price-desc" => Ok(SortBy::PriceDesc),
            "rating" => Ok(SortBy::RatingDesc),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

/// The active filter. All fields unset reproduces the raw catalog in fetch
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub sort_by: Option<SortBy>,
}

impl FilterSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price_range.is_none() && self.sort_by.is_none()
    }

    /// Merges `patch` into this spec. Fields the patch leaves untouched keep
    /// their current value.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
    }
}

/// A partial update to a [`FilterSpec`].
///
/// Each field is tri-state: `None` leaves the current value alone,
/// `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub category: Option<Option<String>>,
    pub price_range: Option<Option<PriceRange>>,
    pub sort_by: Option<Option<SortBy>>,
}

impl FilterPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    /// Clears the category filter ("all categories").
    #[must_use]
    pub fn any_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    #[must_use]
    pub fn price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = Some(Some(PriceRange::new(min, max)));
        self
    }

    #[must_use]
    pub fn any_price(mut self) -> Self {
        self.price_range = Some(None);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(Some(sort_by));
        self
    }

    /// Restores fetch order.
    #[must_use]
    pub fn unsorted(mut self) -> Self {
        self.sort_by = Some(None);
        self
    }
}

/// Derives the filtered and sorted view of `raw` under `spec`.
///
/// An empty catalog or a category with no products yields an empty vector.
#[must_use]
pub fn apply_filters(raw: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let by_category = filter_by_category(raw, spec.category.as_deref());
    let by_price = filter_by_price(&by_category, spec.price_range.as_ref());
    sort_products(by_price, spec.sort_by)
}

/// Category stage. `None` keeps everything.
#[must_use]
pub fn filter_by_category(products: &[Product], category: Option<&str>) -> Vec<Product> {
    match category {
        Some(category) => products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}

/// Price stage, inclusive on both bounds. `None` keeps everything.
#[must_use]
pub fn filter_by_price(products: &[Product], range: Option<&PriceRange>) -> Vec<Product> {
    match range {
        Some(range) => products
            .iter()
            .filter(|p| range.contains(p.price))
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}

/// Sort stage. Uses a stable sort: products with equal keys keep the order
/// they had coming out of the previous stage.
#[must_use]
pub fn sort_products(mut products: Vec<Product>, sort_by: Option<SortBy>) -> Vec<Product> {
    match sort_by {
        Some(SortBy::PriceAsc) => products.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(SortBy::PriceDesc) => products.sort_by(|a, b| b.price.cmp(&a.price)),
        // Numerically equal ratings (including 0.0 and -0.0) tie.
        Some(SortBy::RatingDesc) => products.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        None => {}
    }
    products
}

/// Products sharing `product`'s category, excluding `product` itself, in
/// catalog order and capped at `limit`.
#[must_use]
pub fn related_products(catalog: &[Product], product: &Product, limit: usize) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
