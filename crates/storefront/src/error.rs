//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type returned by page controllers and
//! checkout. [`StorefrontError::user_message`] decides what the shopper sees;
//! full details only go to the log.

use kanap_core::QuantityError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Client storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Selected quantity is out of range.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    /// Shopper input rejected before reaching the catalog.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

impl StorefrontError {
    /// Whether the shopper can fix this by changing their input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Quantity(_)
                | Self::InvalidInput(_)
                | Self::EmptyCart
                | Self::Catalog(CatalogError::NotFound(_))
        )
    }

    /// Message safe to show the shopper.
    ///
    /// Don't expose internal error details; those are logged instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(what)) => what.clone(),
            Self::Catalog(_) => {
                "The catalog service is unavailable, please try again later".to_string()
            }
            Self::Storage(_) => "Your cart could not be saved".to_string(),
            Self::Config(err) => err.to_string(),
            Self::Render(_) => "Internal error".to_string(),
            Self::Quantity(err) => err.to_string(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::EmptyCart => "Your cart is empty".to_string(),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
