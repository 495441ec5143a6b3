pub mod client;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod types;

pub use client::FakeStoreClient;
pub use error::GatewayError;
pub use gateway::CatalogGateway;
pub use normalize::{normalize_product, normalize_products};
pub use types::{FakeStoreProduct, FakeStoreRating};
