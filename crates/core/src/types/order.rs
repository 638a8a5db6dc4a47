//! Order payload sent to the catalog.

use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::contact::ContactInfo;
use super::id::ProductId;

/// An order: who is buying, and which products.
///
/// Only product identity is sent; colors and quantities stay in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub contact: ContactInfo,
    /// Distinct product ids, in the order they first appear in the cart.
    pub products: Vec<ProductId>,
}

/// Compose an order from contact details and the current cart.
///
/// No validation happens here; the checkout flow validates `contact` first.
#[must_use]
pub fn build_order(contact: ContactInfo, cart: &Cart) -> Order {
    Order {
        contact,
        products: cart.product_ids(),
    }
}
