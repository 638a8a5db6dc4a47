//! Cart page: enriched lines, totals, quantity changes and deletion.

use askama::Template;
use kanap_core::{CartLine, CurrencyCode, Price, ProductId, Quantity};
use tracing::instrument;

use crate::cart_store::CartStore;
use crate::catalog::{Catalog, CatalogError, Product};
use crate::error::Result;
use crate::storage::LocalStorage;

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub alt_text: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl CartItemView {
    fn new(line: &CartLine, product: Product, line_total: Price) -> Self {
        let unit_price = product.unit_price();
        Self {
            id: line.id.to_string(),
            name: product.name,
            color: line.color.clone(),
            image_url: product.image_url,
            alt_text: product.alt_text,
            unit_price: unit_price.to_string(),
            quantity: line.quantity,
            line_total: line_total.to_string(),
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "cart.txt")]
pub struct CartTemplate {
    pub items: Vec<CartItemView>,
    pub total_quantity: u64,
    pub total_price: Price,
}

/// Render the stored cart.
///
/// Each line's product is fetched one after the other, in cart order, to
/// obtain its name, image and current price.
///
/// # Errors
///
/// Returns an error if a product lookup fails or a total does not fit in a
/// decimal.
#[instrument(skip_all)]
pub async fn cart_view<S, C>(store: &CartStore<S>, catalog: &C) -> Result<CartTemplate>
where
    S: LocalStorage,
    C: Catalog,
{
    let cart = store.load();

    let mut items = Vec::with_capacity(cart.len());
    let mut total_price = Price::zero(CurrencyCode::EUR);
    for line in cart.lines() {
        let product = catalog.product(&line.id).await?;
        let line_total = product
            .unit_price()
            .checked_mul(line.quantity)
            .ok_or_else(|| price_overflow(&product))?;
        total_price = total_price
            .checked_add(line_total)
            .ok_or_else(|| price_overflow(&product))?;
        items.push(CartItemView::new(line, product, line_total));
    }

    Ok(CartTemplate {
        items,
        total_quantity: cart.total_quantity(),
        total_price,
    })
}

fn price_overflow(product: &Product) -> CatalogError {
    CatalogError::InvalidRecord(format!(
        "price {} of product {} overflows the cart total",
        product.price, product.id
    ))
}

/// Change the quantity of one line, then re-render the cart.
///
/// # Errors
///
/// Returns an error if the quantity is outside 1..=100, the cart cannot be
/// saved, or a product lookup fails.
#[instrument(skip(store, catalog), fields(id = %id))]
pub async fn update_quantity<S, C>(
    store: &CartStore<S>,
    catalog: &C,
    id: &ProductId,
    color: &str,
    quantity: u32,
) -> Result<CartTemplate>
where
    S: LocalStorage,
    C: Catalog,
{
    let quantity = Quantity::new(quantity)?;
    store.set_quantity(id, color, quantity.get())?;
    cart_view(store, catalog).await
}

/// Delete one line, then re-render the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or a product lookup fails.
#[instrument(skip(store, catalog), fields(id = %id))]
pub async fn remove_line<S, C>(
    store: &CartStore<S>,
    catalog: &C,
    id: &ProductId,
    color: &str,
) -> Result<CartTemplate>
where
    S: LocalStorage,
    C: Catalog,
{
    store.remove(id, color)?;
    cart_view(store, catalog).await
}
