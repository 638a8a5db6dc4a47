//! Remote catalog API.
//!
//! # Endpoints
//!
//! - `GET  {base}/products/` - every product
//! - `GET  {base}/products/{id}` - one product
//! - `POST {base}/products/order` - place an order, returns its id
//!
//! The catalog is read-only apart from order submission. Page controllers
//! and checkout depend on the [`Catalog`] trait; [`CatalogClient`] is the
//! HTTP implementation.

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use std::future::Future;

use kanap_core::{Order, OrderId, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record holds values the client cannot work with.
    #[error("Invalid catalog record: {0}")]
    InvalidRecord(String),

    /// Endpoint URL could not be built from the base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Read access to products plus order submission.
pub trait Catalog {
    /// Every product in the catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// A single product.
    ///
    /// Resolves to [`CatalogError::NotFound`] for unknown ids.
    fn product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Submit an order and return the identifier assigned to it.
    fn create_order(
        &self,
        order: &Order,
    ) -> impl Future<Output = Result<OrderId, CatalogError>> + Send;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory catalog for unit tests.

    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    use rust_decimal::Decimal;

    use super::*;

    #[derive(Default)]
    pub struct FakeCatalog {
        pub products: Vec<Product>,
        pub orders: Mutex<Vec<Order>>,
        pub lookups: Mutex<HashMap<ProductId, usize>>,
        pub fail_orders: bool,
    }

    impl FakeCatalog {
        pub fn with_products(products: Vec<Product>) -> Self {
            Self {
                products,
                ..Self::default()
            }
        }

        pub fn placed_orders(&self) -> Vec<Order> {
            self.orders
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn lookups_of(&self, id: &str) -> usize {
            self.lookups
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&ProductId::new(id))
                .copied()
                .unwrap_or(0)
        }
    }

    pub fn product(id: &str, name: &str, price: i64, colors: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(price),
            description: format!("{name} description"),
            image_url: format!("http://localhost:3000/images/{id}.jpg"),
            alt_text: format!("Photo of {name}"),
            colors: colors.iter().map(ToString::to_string).collect(),
        }
    }

    impl Catalog for FakeCatalog {
        async fn products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.products.clone())
        }

        async fn product(&self, id: &ProductId) -> Result<Product, CatalogError> {
            *self
                .lookups
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(id.clone())
                .or_default() += 1;
            self.products
                .iter()
                .find(|p| p.id == *id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))
        }

        async fn create_order(&self, order: &Order) -> Result<OrderId, CatalogError> {
            if self.fail_orders {
                return Err(CatalogError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
            orders.push(order.clone());
            Ok(OrderId::new(format!("order-{}", orders.len())))
        }
    }
}
