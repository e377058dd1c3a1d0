//! Saffron storefront sync engine.
//!
//! A client-side engine for an e-commerce storefront rendered against a
//! remote REST catalog service. The rendering layer, routing, and the HTTP
//! API itself are external collaborators; this crate owns the logic between
//! them:
//!
//! - [`catalog`] - choosing the active product listing among competing
//!   paginated queries (plain / category-scoped / filtered) and keeping the
//!   page index coherent as the active source changes
//! - [`membership`] - keeping the viewer's favorite set and cart snapshot in
//!   sync with server-confirmed mutations, tolerating anonymous visitors
//! - [`api`] - the REST client boundary, with short-lived response caching
//! - [`identity`] / [`notify`] - injectable capabilities for the session
//!   flag and transient user feedback
//!
//! # Consistency model
//!
//! The server is the source of truth. Collections held here are replaced
//! wholesale from server responses, never patched locally; after a confirmed
//! mutation the affected collection is marked stale and refetched. Late
//! responses from a superseded selection context are discarded via
//! generation tickets.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use saffron_storefront::api::RestClient;
//! use saffron_storefront::catalog::Catalog;
//! use saffron_storefront::config::StorefrontConfig;
//!
//! let config = StorefrontConfig::from_env()?;
//! let api = Arc::new(RestClient::new(&config));
//! let mut catalog = Catalog::new(api, config.listing_page_size);
//!
//! catalog.set_route_category(Some("Oriental Sweets".into()));
//! catalog.refresh().await;
//! let listing = catalog.listing();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod membership;
pub mod notify;

pub use api::{CatalogApi, RestClient};
pub use error::ApiError;
pub use identity::{IdentityProvider, SessionIdentity};
pub use notify::{Notifier, TracingNotifier};
