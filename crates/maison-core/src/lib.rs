//! Domain types, the filter engine, and configuration shared by the Maison
//! storefront crates.

pub mod app_config;
pub mod cart_line;
pub mod config;
pub mod filter;
pub mod products;
pub mod status;

pub use app_config::{AppConfig, Environment, FetchOrdering};
pub use cart_line::CartLine;
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_CATALOG_BASE_URL};
pub use filter::{apply_filters, related_products, FilterPatch, FilterSpec, PriceRange, SortBy};
pub use products::{Dimensions, LikedProduct, Product, Review, MATERIALS_UNAVAILABLE};
pub use status::FetchStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort key \"{0}\": expected price-asc, price-desc, or rating")]
    InvalidSortKey(String),
}
