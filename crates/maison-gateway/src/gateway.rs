//! The seam between the engine and the remote catalog.

use std::future::Future;

use maison_core::Product;

use crate::error::GatewayError;

/// Read-only access to a remote product catalog.
///
/// Implementations perform exactly one attempt per call. Retrying is not
/// part of this contract, and the catalog store does not retry either.
pub trait CatalogGateway: Send + Sync {
    /// Every product in catalog order.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, GatewayError>> + Send;

    /// Products in one category, in catalog order.
    fn fetch_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, GatewayError>> + Send;

    /// A single product by its opaque id.
    fn fetch_by_id(&self, id: &str) -> impl Future<Output = Result<Product, GatewayError>> + Send;

    /// The flat list of category names.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<String>, GatewayError>> + Send;
}
