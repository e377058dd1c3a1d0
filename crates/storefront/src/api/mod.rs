//! Remote catalog service boundary.
//!
//! # Architecture
//!
//! - The remote service is the source of truth - no local sync, direct calls
//! - [`CatalogApi`] is the seam: the engine and its tests only see the trait;
//!   [`RestClient`] is the production implementation over `reqwest`
//! - Listing responses are cached in-memory via `moka` for a short TTL;
//!   member-scoped data (favorites, cart) and mutations are never cached
//!
//! Mutation endpoints either return the full updated collection (favorites)
//! or signal success only (cart); callers replace or refetch wholesale, never
//! patch.

mod rest;
mod wire;

pub use rest::RestClient;

use async_trait::async_trait;

use saffron_core::{CartSnapshot, FilterCriteria, PageResult, Product, ProductId};

use crate::error::ApiError;

/// Page limit fixed by the filtered-listing endpoint.
pub const FILTERED_PAGE_LIMIT: u32 = 6;

/// Operations exposed by the remote catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch a page of the unfiltered product listing.
    async fn listing(&self, page: u32, limit: u32) -> Result<PageResult<Product>, ApiError>;

    /// Fetch a page of products in one category.
    async fn listing_by_category(
        &self,
        category: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageResult<Product>, ApiError>;

    /// Fetch a page of products matching the filter criteria.
    ///
    /// The endpoint's page limit is fixed at [`FILTERED_PAGE_LIMIT`].
    async fn listing_filtered(
        &self,
        filter: &FilterCriteria,
        page: u32,
    ) -> Result<PageResult<Product>, ApiError>;

    /// Fetch a page of the viewer's favorited products.
    async fn favorites(&self, page: u32) -> Result<PageResult<Product>, ApiError>;

    /// Fetch every favorited product ID, unpaginated.
    async fn all_favorite_ids(&self) -> Result<Vec<ProductId>, ApiError>;

    /// Add a product to favorites. Returns the full updated favorite set.
    async fn add_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError>;

    /// Remove a product from favorites. Returns the full updated favorite set.
    async fn remove_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError>;

    /// Remove every favorite.
    async fn clear_favorites(&self) -> Result<(), ApiError>;

    /// Fetch a page of the viewer's cart.
    async fn cart(&self, page: u32) -> Result<CartSnapshot, ApiError>;

    /// Add one unit of a product to the cart.
    async fn add_to_cart(&self, id: &ProductId) -> Result<(), ApiError>;

    /// Replace a cart line's quantity. Quantity must be >= 1; quantity 0 is
    /// expressed as removal by the membership layer, never sent here.
    async fn edit_cart_quantity(&self, id: &ProductId, quantity: u32) -> Result<(), ApiError>;

    /// Remove one product's line from the cart, or clear the whole cart when
    /// `id` is `None`.
    async fn remove_from_cart(&self, id: Option<&ProductId>) -> Result<(), ApiError>;
}
