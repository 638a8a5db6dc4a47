//! Kanap Storefront library.
//!
//! This crate provides the storefront client as a library, allowing it to
//! be tested and reused. The `kanap` binary is a thin command-line adapter
//! over [`pages`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pages;
pub mod state;
pub mod storage;
