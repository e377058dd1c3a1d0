//! Core types for the Saffron storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod filter;
pub mod id;
pub mod page;
pub mod product;

pub use cart::{CartLine, CartSnapshot};
pub use filter::FilterCriteria;
pub use id::*;
pub use page::PageResult;
pub use product::{CategoryRef, Product};
