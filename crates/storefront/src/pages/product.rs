//! Product detail page and "add to cart".

use askama::Template;
use kanap_core::{ProductId, Quantity};
use tracing::instrument;

use crate::cart_store::CartStore;
use crate::catalog::{Catalog, Product};
use crate::error::{Result, StorefrontError};
use crate::storage::LocalStorage;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub alt_text: String,
    pub colors: Vec<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            price: product.unit_price().to_string(),
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            alt_text: product.alt_text,
            colors: product.colors,
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "product.txt")]
pub struct ProductTemplate {
    pub product: ProductView,
}

/// Confirmation shown after adding to the cart.
#[derive(Debug, Template)]
#[template(path = "added.txt")]
pub struct AddedTemplate {
    pub name: String,
    pub color: String,
    pub added: Quantity,
    /// Units of this product and color now in the cart.
    pub line_quantity: u32,
    pub total_quantity: u64,
}

/// Product detail page.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog cannot be
/// reached.
#[instrument(skip(catalog), fields(id = %id))]
pub async fn show<C: Catalog>(catalog: &C, id: &ProductId) -> Result<ProductTemplate> {
    let product = catalog.product(id).await?;
    Ok(ProductTemplate {
        product: product.into(),
    })
}

/// Add `quantity` units of `id` in `color` to the cart.
///
/// The color must be one of the product's colors and the quantity must lie
/// in 1..=100; invalid selections leave the cart unchanged.
///
/// # Errors
///
/// Returns an error for an invalid selection, an unknown product, or if the
/// cart cannot be saved.
#[instrument(skip(store, catalog), fields(id = %id))]
pub async fn add_to_cart<S, C>(
    store: &CartStore<S>,
    catalog: &C,
    id: &ProductId,
    color: &str,
    quantity: u32,
) -> Result<AddedTemplate>
where
    S: LocalStorage,
    C: Catalog,
{
    if color.is_empty() {
        return Err(StorefrontError::InvalidInput(
            "Please select a color".to_string(),
        ));
    }
    let quantity = Quantity::new(quantity)?;

    let product = catalog.product(id).await?;
    if !product.has_color(color) {
        return Err(StorefrontError::InvalidInput(format!(
            "{} is not available in {color}; choose one of: {}",
            product.name,
            product.colors.join(", ")
        )));
    }

    let cart = store.upsert(product.id.clone(), color, quantity.get())?;
    let line_quantity = cart
        .find(&product.id, color)
        .map_or(quantity.get(), |line| line.quantity);

    Ok(AddedTemplate {
        name: product.name,
        color: color.to_string(),
        added: quantity,
        line_quantity,
        total_quantity: cart.total_quantity(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kanap_core::CartLine;

    use super::*;
    use crate::catalog::CatalogError;
    use crate::catalog::fake::{FakeCatalog, product};
    use crate::storage::MemoryStorage;

    fn catalog() -> FakeCatalog {
        FakeCatalog::with_products(vec![product(
            "p1",
            "Kanap Sinopé",
            1849,
            &["Blue", "White", "Black"],
        )])
    }

    #[tokio::test]
    async fn test_show_renders_detail() {
        let page = show(&catalog(), &ProductId::new("p1"))
            .await
            .unwrap()
            .render()
            .unwrap();

        assert!(page.contains("Kanap Sinopé"));
        assert!(page.contains("Price: 1849€"));
        assert!(page.contains("  - White"));
    }

    #[tokio::test]
    async fn test_show_unknown_product() {
        let err = show(&catalog(), &ProductId::new("nope")).await.unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Catalog(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_merges_with_existing_line() {
        let store = CartStore::new(MemoryStorage::new());
        let catalog = catalog();
        let id = ProductId::new("p1");

        add_to_cart(&store, &catalog, &id, "Blue", 2).await.unwrap();
        let added = add_to_cart(&store, &catalog, &id, "Blue", 3).await.unwrap();

        assert_eq!(added.line_quantity, 5);
        assert_eq!(store.load().lines(), &[CartLine::new(id, "Blue", 5)]);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_selection() {
        let store = CartStore::new(MemoryStorage::new());
        let catalog = catalog();
        let id = ProductId::new("p1");

        for (color, quantity) in [("", 1), ("Blue", 0), ("Blue", 101), ("Pink", 1)] {
            let err = add_to_cart(&store, &catalog, &id, color, quantity)
                .await
                .unwrap_err();
            assert!(err.is_user_error(), "{color}/{quantity}: {err}");
        }
        assert!(store.load().is_empty());
    }
}
