//! HTTP implementation of the catalog API.
//!
//! Uses `reqwest` 0.13 for HTTP. Single-product lookups are cached using
//! `moka` so a cart holding one product in several colors fetches it once.

use std::sync::Arc;

use kanap_core::{Order, OrderId, ProductId};
use moka::future::Cache;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError, OrderConfirmation, Product};
use crate::config::CatalogConfig;

/// Longest response body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 500;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog HTTP API.
///
/// Cheap to clone; clones share the connection pool and product cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Build an endpoint URL by appending percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read a response, mapping non-success statuses and parse failures.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;
        let excerpt = || response_text.chars().take(BODY_EXCERPT_CHARS).collect::<String>();

        if status == reqwest::StatusCode::NOT_FOUND {
            // Callers decide whether a 404 means a missing record or a bad base URL.
            debug!(body = %excerpt(), "Catalog API returned 404");
        } else if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(),
                "Catalog API returned non-success status"
            );
        }

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: excerpt(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        Self::read_json(response).await
    }
}

impl Catalog for CatalogClient {
    /// Get every product. Listing results are not cached.
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        // Trailing empty segment keeps the `/products/` form the API serves.
        let url = self.endpoint(&["products", ""])?;
        let products: Vec<Product> = self.get_json(url).await?;
        debug!(count = products.len(), "Fetched product listing");
        Ok(products)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        // An empty segment would address the listing endpoint instead.
        if id.as_str().is_empty() {
            return Err(not_found(id));
        }

        let url = self.endpoint(&["products", id.as_str()])?;
        let product: Product = match self.get_json(url).await {
            Err(CatalogError::Status { status: 404, .. }) => return Err(not_found(id)),
            other => other?,
        };

        self.inner.cache.insert(id.clone(), product.clone()).await;
        Ok(product)
    }

    #[instrument(skip(self, order), fields(products = order.products.len()))]
    async fn create_order(&self, order: &Order) -> Result<OrderId, CatalogError> {
        let url = self.endpoint(&["products", "order"])?;

        let response = self
            .inner
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(order)
            .send()
            .await?;

        let confirmation: OrderConfirmation = Self::read_json(response).await?;
        debug!(order_id = %confirmation.order_id, "Order placed");
        Ok(confirmation.order_id)
    }
}

fn not_found(id: &ProductId) -> CatalogError {
    CatalogError::NotFound(format!("Product not found: {id}"))
}
