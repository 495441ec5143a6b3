//! HTTP client for the Fake Store API.

use std::time::Duration;

use maison_core::Product;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::gateway::CatalogGateway;
use crate::normalize::{normalize_product, normalize_products};
use crate::types::FakeStoreProduct;

/// HTTP client for the Fake Store API's read-only product endpoints.
///
/// Maps 404 and other non-2xx responses to typed errors and normalizes
/// products into the engine's canonical shape. Every call makes exactly one
/// request; there is no retry.
#[derive(Debug)]
pub struct FakeStoreClient {
    client: Client,
    base_url: Url,
}

impl FakeStoreClient {
    /// Creates a client for the catalog rooted at `base_url`.
    ///
    /// `base_url` may carry a path prefix (e.g. `http://host/api`); endpoint
    /// paths are appended to it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`GatewayError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GatewayError> {
        let parsed = Url::parse(base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".into(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds an endpoint URL by appending percent-encoded path segments to
    /// the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotFound`] on HTTP 404.
    /// - [`GatewayError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GatewayError::Http`] on network or TLS failure.
    async fn get_body(&self, url: &Url) -> Result<String, GatewayError> {
        tracing::debug!(%url, "sending catalog request");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GatewayError> {
        let body = self.get_body(url).await?;
        parse_body(&body, url)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, url: &Url) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

impl CatalogGateway for FakeStoreClient {
    /// `GET /products`.
    async fn fetch_all(&self) -> Result<Vec<Product>, GatewayError> {
        let url = self.endpoint(&["products"])?;
        let raw: Vec<FakeStoreProduct> = self.get_json(&url).await?;
        Ok(normalize_products(raw))
    }

    /// `GET /products/category/{category}`.
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Product>, GatewayError> {
        let url = self.endpoint(&["products", "category", category])?;
        let raw: Vec<FakeStoreProduct> = self.get_json(&url).await?;
        Ok(normalize_products(raw))
    }

    /// `GET /products/{id}`.
    ///
    /// The API answers unknown ids with `200 OK` and an empty (or `null`)
    /// body; both are reported as [`GatewayError::NotFound`].
    async fn fetch_by_id(&self, id: &str) -> Result<Product, GatewayError> {
        let numeric_id = parse_product_id(id)?;
        let url = self.endpoint(&["products", &numeric_id.to_string()])?;
        let body = self.get_body(&url).await?;

        if body.trim().is_empty() {
            return Err(GatewayError::NotFound {
                url: url.to_string(),
            });
        }

        let raw: Option<FakeStoreProduct> = parse_body(&body, &url)?;
        let raw = raw.ok_or_else(|| GatewayError::NotFound {
            url: url.to_string(),
        })?;
        normalize_product(raw)
    }

    /// `GET /products/categories`.
    async fn fetch_categories(&self) -> Result<Vec<String>, GatewayError> {
        let url = self.endpoint(&["products", "categories"])?;
        self.get_json(&url).await
    }
}

/// The API addresses products by positive integer id.
fn parse_product_id(id: &str) -> Result<u64, GatewayError> {
    match id.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GatewayError::InvalidProductId { id: id.to_owned() }),
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
