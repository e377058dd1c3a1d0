//! Saffron Core - Shared types library.
//!
//! This crate provides the domain types used across the Saffron storefront
//! components:
//! - `storefront` - catalog, cart, and favorites sync engine
//! - `integration-tests` - end-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Everything
//! here is a view into remote catalog state: the server owns the data, these
//! types describe the last confirmed shape of it.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, page results, filters, cart snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
