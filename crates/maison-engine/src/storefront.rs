use maison_core::{AppConfig, FetchOrdering, LikedProduct, Product};
use maison_gateway::{CatalogGateway, FakeStoreClient, GatewayError};
use tracing::info;

use crate::cart::{CartStore, NewCartItem};
use crate::catalog::CatalogStore;
use crate::checkout::CheckoutSummary;
use crate::error::Rejection;
use crate::liked::LikedStore;

/// The three stores a storefront session works with.
///
/// Stores never reach into each other; the helpers here read one store and
/// dispatch into another on the caller's behalf.
#[derive(Debug)]
pub struct Storefront<G> {
    pub catalog: CatalogStore<G>,
    pub cart: CartStore,
    pub liked: LikedStore,
    related_limit: usize,
}

impl<G> Clone for Storefront<G> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            cart: self.cart.clone(),
            liked: self.liked.clone(),
            related_limit: self.related_limit,
        }
    }
}

impl Storefront<FakeStoreClient> {
    /// Builds a storefront backed by the Fake Store API client described by
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidBaseUrl`] or [`GatewayError::Http`] if
    /// the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let gateway = FakeStoreClient::new(
            &config.catalog_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        info!(
            base_url = %config.catalog_base_url,
            ordering = %config.fetch_ordering,
            "storefront ready"
        );
        Ok(Self::new(
            gateway,
            config.fetch_ordering,
            config.related_products_limit,
        ))
    }
}

impl<G: CatalogGateway> Storefront<G> {
    #[must_use]
    pub fn new(gateway: G, ordering: FetchOrdering, related_limit: usize) -> Self {
        Self {
            catalog: CatalogStore::new(gateway, ordering),
            cart: CartStore::new(),
            liked: LikedStore::new(),
            related_limit,
        }
    }

    /// Products related to the selected product, capped at the configured
    /// limit.
    #[must_use]
    pub fn related_products(&self) -> Vec<Product> {
        self.catalog.related_products(self.related_limit)
    }

    /// Adds `quantity` units of `product` to the cart.
    ///
    /// # Errors
    ///
    /// See [`crate::CartState::add_item`].
    pub fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), Rejection> {
        self.cart
            .add_item(NewCartItem::from(product).with_quantity(quantity))
    }

    /// Toggles `product` in the liked set. Returns whether it is liked
    /// afterwards.
    pub fn toggle_like(&self, product: &Product) -> bool {
        self.liked.toggle_like(LikedProduct::from(product))
    }

    #[must_use]
    pub fn checkout_summary(&self) -> CheckoutSummary {
        self.cart.read(CheckoutSummary::from_cart)
    }
}
