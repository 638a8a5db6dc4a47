//! Core types for the Kanap storefront.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod contact;
pub mod id;
pub mod order;
pub mod price;
pub mod quantity;

pub use cart::{Cart, CartLine};
pub use contact::{ContactField, ContactInfo, FieldError};
pub use id::*;
pub use order::{Order, build_order};
pub use price::{CurrencyCode, Price};
pub use quantity::{Quantity, QuantityError};
