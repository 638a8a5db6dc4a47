//! Checkout submission and the confirmation page.

use askama::Template;
use kanap_core::{ContactInfo, FieldError, OrderId};

use crate::cart_store::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutOutcome, checkout};
use crate::error::Result;
use crate::storage::LocalStorage;

#[derive(Template)]
#[template(path = "confirmation.txt")]
pub struct ConfirmationTemplate {
    pub order_id: OrderId,
}

/// Per-field messages for a rejected form.
#[derive(Template)]
#[template(path = "form_errors.txt")]
pub struct FormErrorsTemplate {
    pub errors: Vec<FieldError>,
}

/// Where a checkout submission lands.
pub enum CheckoutPage {
    Confirmation(ConfirmationTemplate),
    FormErrors(FormErrorsTemplate),
}

impl CheckoutPage {
    /// Render whichever page applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Confirmation(page) => page.render(),
            Self::FormErrors(page) => page.render(),
        }
    }

    /// Whether the order went through.
    #[must_use]
    pub const fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirmation(_))
    }
}

/// Confirmation page for a known order id.
#[must_use]
pub const fn confirmation(order_id: OrderId) -> ConfirmationTemplate {
    ConfirmationTemplate { order_id }
}

/// Submit the checkout form.
///
/// # Errors
///
/// See [`checkout`]; the cart is kept whenever an error is returned.
pub async fn submit<S, C>(
    store: &CartStore<S>,
    catalog: &C,
    contact: ContactInfo,
) -> Result<CheckoutPage>
where
    S: LocalStorage,
    C: Catalog,
{
    Ok(match checkout(store, catalog, contact).await? {
        CheckoutOutcome::Placed(order_id) => CheckoutPage::Confirmation(confirmation(order_id)),
        CheckoutOutcome::Rejected(errors) => CheckoutPage::FormErrors(FormErrorsTemplate { errors }),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kanap_core::ProductId;

    use super::*;
    use crate::catalog::fake::{FakeCatalog, product};
    use crate::storage::MemoryStorage;

    #[test]
    fn test_confirmation_shows_order_id() {
        let page = confirmation(OrderId::new("f2b1-77")).render().unwrap();
        assert!(page.contains("f2b1-77"));
    }

    #[tokio::test]
    async fn test_rejected_form_lists_fields() {
        let store = CartStore::new(MemoryStorage::new());
        let catalog = FakeCatalog::with_products(vec![product("p1", "Kanap", 10, &["Red"])]);
        store.upsert(ProductId::new("p1"), "Red", 1).unwrap();

        let contact = ContactInfo {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            address: String::new(),
            city: "Paris 15".to_string(),
            email: "jean@example.com".to_string(),
        };
        let page = submit(&store, &catalog, contact).await.unwrap();

        assert!(!page.is_confirmation());
        let rendered = page.render().unwrap();
        assert!(rendered.contains("address: Invalid format for the address"));
        assert!(rendered.contains("city: Invalid format for the city"));
        assert!(!rendered.contains("firstName"));
    }
}
