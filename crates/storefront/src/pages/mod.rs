//! Page controllers.
//!
//! Each page loads what it needs from the cart store and the catalog and
//! returns an Askama template ready to render. Controllers receive their
//! collaborators by reference; nothing here touches global state.

pub mod cart;
pub mod checkout;
pub mod listing;
pub mod product;

pub use cart::CartTemplate;
pub use checkout::{CheckoutPage, ConfirmationTemplate, FormErrorsTemplate};
pub use listing::ListingTemplate;
pub use product::{AddedTemplate, ProductTemplate};
