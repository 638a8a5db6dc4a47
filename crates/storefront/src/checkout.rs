//! Checkout: validate, submit, clear.
//!
//! Sequencing:
//! 1. Every contact field is validated; any failure stops here.
//! 2. The order is built from the contact details and the stored cart.
//! 3. The order is submitted to the catalog.
//! 4. Only once the catalog returns an order id is the cart cleared.

use kanap_core::{ContactInfo, FieldError, OrderId, build_order};
use tracing::{info, instrument, warn};

use crate::cart_store::CartStore;
use crate::catalog::Catalog;
use crate::error::{Result, StorefrontError};
use crate::storage::LocalStorage;

/// Result of a checkout attempt that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The form was rejected; nothing was submitted.
    Rejected(Vec<FieldError>),
    /// The order was accepted and the cart cleared.
    Placed(OrderId),
}

/// Run the checkout flow.
///
/// # Errors
///
/// Returns [`StorefrontError::EmptyCart`] if the form is valid but the cart
/// holds nothing, or a catalog error if submission fails. In both cases the
/// stored cart is left untouched.
#[instrument(skip_all)]
pub async fn checkout<S, C>(
    store: &CartStore<S>,
    catalog: &C,
    contact: ContactInfo,
) -> Result<CheckoutOutcome>
where
    S: LocalStorage,
    C: Catalog,
{
    let errors = contact.validate();
    if !errors.is_empty() {
        info!(fields = errors.len(), "Checkout form rejected");
        return Ok(CheckoutOutcome::Rejected(errors));
    }

    let cart = store.load();
    if cart.is_empty() {
        return Err(StorefrontError::EmptyCart);
    }

    let order = build_order(contact, &cart);
    let order_id = catalog.create_order(&order).await?;
    info!(order_id = %order_id, products = order.products.len(), "Order placed");

    // The order exists now; a stale cart is better than hiding the order id.
    if let Err(e) = store.clear() {
        warn!(error = %e, "Failed to clear cart after order");
    }

    Ok(CheckoutOutcome::Placed(order_id))
}
