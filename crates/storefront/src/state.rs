//! Application state shared across page controllers.

use crate::cart_store::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::storage::FileStorage;

/// Everything a page needs, built once per invocation and passed by
/// reference.
pub struct AppState {
    cart: CartStore<FileStorage>,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let cart = CartStore::new(FileStorage::new(config.data_dir.clone()));

        Ok(Self { cart, catalog })
    }

    /// Get a reference to the persisted cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<FileStorage> {
        &self.cart
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }
}
