//! The Maison commerce state engine.
//!
//! Each store owns one slice of storefront state behind a
//! `tokio::sync::watch` channel. Intents are reducer steps that run to
//! completion; readers borrow the current value or subscribe for changes.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod liked;
pub mod storefront;

pub use cart::{CartState, CartStore, NewCartItem};
pub use catalog::{CatalogScope, CatalogState, CatalogStore, Completion, LoadRequest, Ticket};
pub use checkout::CheckoutSummary;
pub use error::Rejection;
pub use liked::{LikedState, LikedStore};
pub use storefront::Storefront;
