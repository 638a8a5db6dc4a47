//! Product listing page.

use askama::Template;
use tracing::instrument;

use crate::catalog::{Catalog, Product};
use crate::error::Result;

/// One product card on the listing page.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub alt_text: String,
}

impl From<Product> for ProductCardView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            alt_text: product.alt_text,
        }
    }
}

#[derive(Template)]
#[template(path = "listing.txt")]
pub struct ListingTemplate {
    pub products: Vec<ProductCardView>,
}

/// Every catalog product, in catalog order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be reached.
#[instrument(skip_all)]
pub async fn listing<C: Catalog>(catalog: &C) -> Result<ListingTemplate> {
    let products = catalog.products().await?;
    Ok(ListingTemplate {
        products: products.into_iter().map(ProductCardView::from).collect(),
    })
}
