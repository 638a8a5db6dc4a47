//! Persisted cart.
//!
//! The cart store is the only writer of the `cart` storage key. Every
//! mutation is load → modify → save, so each call sees the latest blob.

use kanap_core::{Cart, ProductId};
use tracing::{debug, instrument, warn};

use crate::storage::{LocalStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Owner of the serialized cart in client storage.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: LocalStorage> CartStore<S> {
    /// Create a cart store over a storage backend.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the current cart.
    ///
    /// A missing, unreadable or malformed blob yields an empty cart; the
    /// problem is logged and never reported to the caller.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart, starting empty");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding malformed cart");
            Cart::new()
        })
    }

    /// Persist `cart`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded or the storage backend
    /// cannot be written; the stored cart is left as it was.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set_item(CART_KEY, &raw)
    }

    /// Add `quantity` units of `(id, color)`, merging with an existing line.
    ///
    /// Callers validate `quantity` and `color` beforehand.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be written.
    #[instrument(skip(self), fields(id = %id))]
    pub fn upsert(&self, id: ProductId, color: &str, quantity: u32) -> Result<Cart, StorageError> {
        let mut cart = self.load();
        cart.upsert(id, color, quantity);
        self.save(&cart)?;
        debug!(lines = cart.len(), "Cart line added");
        Ok(cart)
    }

    /// Overwrite the quantity of `(id, color)`. No-op if the line is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be written.
    #[instrument(skip(self), fields(id = %id))]
    pub fn set_quantity(
        &self,
        id: &ProductId,
        color: &str,
        quantity: u32,
    ) -> Result<Cart, StorageError> {
        let mut cart = self.load();
        if !cart.set_quantity(id, color, quantity) {
            debug!("No matching cart line");
        }
        self.save(&cart)?;
        Ok(cart)
    }

    /// Remove every line keyed by `(id, color)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be written.
    #[instrument(skip(self), fields(id = %id))]
    pub fn remove(&self, id: &ProductId, color: &str) -> Result<Cart, StorageError> {
        let mut cart = self.load();
        let removed = cart.remove(id, color);
        self.save(&cart)?;
        debug!(removed, "Cart lines removed");
        Ok(cart)
    }

    /// Delete the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(CART_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kanap_core::CartLine;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = CartStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "{not json").unwrap();
        let store = CartStore::new(storage);
        assert!(store.load().is_empty());

        store
            .storage()
            .set_item(CART_KEY, r#"[{"id":"p1","color":"red","quantity":"two"}]"#)
            .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_set_quantity_then_load() {
        let store = CartStore::new(MemoryStorage::new());
        store
            .save(&Cart::from(vec![CartLine::new(pid("p1"), "red", 2)]))
            .unwrap();

        store.set_quantity(&pid("p1"), "red", 5).unwrap();

        assert_eq!(
            store.load().lines(),
            &[CartLine::new(pid("p1"), "red", 5)]
        );
    }

    #[test]
    fn test_set_quantity_unknown_line_leaves_cart() {
        let store = CartStore::new(MemoryStorage::new());
        store.upsert(pid("p1"), "red", 2).unwrap();

        store.set_quantity(&pid("p1"), "blue", 7).unwrap();

        assert_eq!(
            store.load().lines(),
            &[CartLine::new(pid("p1"), "red", 2)]
        );
    }

    #[test]
    fn test_upsert_accumulates_across_loads() {
        let store = CartStore::new(MemoryStorage::new());
        store.upsert(pid("p1"), "red", 2).unwrap();
        store.upsert(pid("p1"), "red", 3).unwrap();
        store.upsert(pid("p2"), "red", 1).unwrap();

        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.find(&pid("p1"), "red").unwrap().quantity, 5);
    }

    #[test]
    fn test_remove_leaves_other_lines() {
        let store = CartStore::new(MemoryStorage::new());
        store.upsert(pid("p1"), "red", 1).unwrap();
        store.upsert(pid("p1"), "blue", 1).unwrap();

        store.remove(&pid("p1"), "red").unwrap();
        store.remove(&pid("nope"), "red").unwrap();

        assert_eq!(
            store.load().lines(),
            &[CartLine::new(pid("p1"), "blue", 1)]
        );
    }

    #[test]
    fn test_clear_deletes_blob() {
        let store = CartStore::new(MemoryStorage::new());
        store.upsert(pid("p1"), "red", 1).unwrap();
        store.clear().unwrap();

        assert_eq!(store.storage().get_item(CART_KEY).unwrap(), None);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(FileStorage::new(dir.path()));
        store.upsert(pid("p1"), "red", 2).unwrap();
        store.upsert(pid("p2"), "Black/Yellow", 1).unwrap();

        let first = store.storage().get_item(CART_KEY).unwrap();
        store.save(&store.load()).unwrap();
        let second = store.storage().get_item(CART_KEY).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reads_blob_written_by_browser() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                CART_KEY,
                r#"[{"id":"107fb5b75607497b96722bda5b504926","quantity":3,"color":"Blue"}]"#,
            )
            .unwrap();

        let cart = CartStore::new(storage).load();
        assert_eq!(
            cart.find(&pid("107fb5b75607497b96722bda5b504926"), "Blue")
                .unwrap()
                .quantity,
            3
        );
    }
}
