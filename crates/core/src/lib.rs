//! Kanap Core - Cart, order and validation types.
//!
//! This crate provides the shared types for the Kanap workspace:
//! - `storefront` - Terminal storefront client (catalog, cart store, pages)
//! - `integration-tests` - End-to-end tests against a fake catalog API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. Everything here is deterministic and
//! can be tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, quantities, the cart, contact info and orders
//! - [`validation`] - Checkout form field predicates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
