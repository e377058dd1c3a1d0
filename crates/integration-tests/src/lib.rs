//! Scenario test support for the Saffron storefront sync engine.
//!
//! The engine only sees the [`CatalogApi`] trait, so the tests drive it
//! against [`InMemoryApi`], a faithful in-memory stand-in for the remote
//! catalog service: same pagination shape, same wholesale-collection
//! mutation semantics, plus request counting and one-shot failure injection
//! for the error-path scenarios.
//!
//! # Doubles
//!
//! - [`InMemoryApi`] - the catalog service, seeded with product fixtures
//! - [`RecordingNotifier`] - captures success / error notifications
//! - `SessionIdentity` (from the storefront crate) is used as-is; its clones
//!   share one flag, which is exactly what the tests need

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use saffron_core::{
    CartLine, CartSnapshot, CategoryId, CategoryRef, FilterCriteria, PageResult, Product,
    ProductId,
};
use saffron_storefront::api::{CatalogApi, FILTERED_PAGE_LIMIT};
use saffron_storefront::error::ApiError;
use saffron_storefront::notify::Notifier;

/// Install a test-friendly tracing subscriber, once per process.
///
/// Honors `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Product Fixtures
// =============================================================================

/// A minimal catalog product with no category.
#[must_use]
pub fn product(id: &str, title: &str, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: String::new(),
        price: Decimal::from(price),
        thumbnail: String::new(),
        category: None,
        rating: 0.0,
        labels: Vec::new(),
    }
}

/// A catalog product assigned to a category.
#[must_use]
pub fn product_in(id: &str, title: &str, price: u32, category: &str) -> Product {
    Product {
        category: Some(CategoryRef {
            id: CategoryId::new(format!("cat-{category}")),
            name: category.to_string(),
        }),
        ..product(id, title, price)
    }
}

// =============================================================================
// In-Memory Catalog Service
// =============================================================================

/// In-memory stand-in for the remote catalog service.
///
/// Collections behave like the real endpoints: listings paginate over the
/// seeded products, favorite mutations return the full updated set, and cart
/// mutations signal success only. Every call counts toward
/// [`request_count`](Self::request_count), and
/// [`fail_next`](Self::fail_next) makes the next call return a server error
/// without touching state.
pub struct InMemoryApi {
    products: Vec<Product>,
    favorites_page_size: u32,
    cart_page_size: u32,
    favorites: Mutex<Vec<ProductId>>,
    cart: Mutex<Vec<(ProductId, u32)>>,
    requests: AtomicUsize,
    cart_pages: Mutex<Vec<u32>>,
    fail_plan: Mutex<Option<FailurePlan>>,
}

struct FailurePlan {
    calls_before: usize,
    status: u16,
    message: String,
}

impl InMemoryApi {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            favorites_page_size: 8,
            cart_page_size: 4,
            favorites: Mutex::new(Vec::new()),
            cart: Mutex::new(Vec::new()),
            requests: AtomicUsize::new(0),
            cart_pages: Mutex::new(Vec::new()),
            fail_plan: Mutex::new(None),
        }
    }

    /// Override the cart page size, to make multi-page carts small.
    #[must_use]
    pub const fn with_cart_page_size(mut self, size: u32) -> Self {
        self.cart_page_size = size;
        self
    }

    /// Pre-populate the favorite set.
    pub fn seed_favorites(&self, ids: &[&str]) {
        let mut favorites = self.favorites.lock().expect("favorites lock poisoned");
        *favorites = ids.iter().map(|id| ProductId::new(*id)).collect();
    }

    /// Pre-populate the cart with (product id, quantity) lines.
    pub fn seed_cart(&self, lines: &[(&str, u32)]) {
        let mut cart = self.cart.lock().expect("cart lock poisoned");
        *cart = lines
            .iter()
            .map(|(id, quantity)| (ProductId::new(*id), *quantity))
            .collect();
    }

    /// Total number of calls the engine has made.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Pages the engine requested from the cart endpoint, in order.
    #[must_use]
    pub fn cart_pages_requested(&self) -> Vec<u32> {
        self.cart_pages.lock().expect("cart pages lock poisoned").clone()
    }

    /// Make the next call fail with this server error, leaving state alone.
    pub fn fail_next(&self, status: u16, message: &str) {
        self.fail_after(0, status, message);
    }

    /// Let `skip` calls through, then fail the one after them.
    pub fn fail_after(&self, skip: usize, status: u16, message: &str) {
        let mut plan = self.fail_plan.lock().expect("failure lock poisoned");
        *plan = Some(FailurePlan {
            calls_before: skip,
            status,
            message: message.to_string(),
        });
    }

    fn record_call(&self) -> Result<(), ApiError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let mut slot = self.fail_plan.lock().expect("failure lock poisoned");
        match slot.as_mut() {
            Some(plan) if plan.calls_before == 0 => {
                let plan = slot.take().expect("plan present");
                Err(ApiError::Server {
                    status: plan.status,
                    message: plan.message,
                })
            }
            Some(plan) => {
                plan.calls_before -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == *id).cloned()
    }

    fn favorite_ids(&self) -> Vec<ProductId> {
        self.favorites.lock().expect("favorites lock poisoned").clone()
    }
}

/// Paginate a full collection the way the catalog endpoints do.
fn paginate(items: Vec<Product>, page: u32, limit: u32) -> PageResult<Product> {
    let limit_usize = limit.max(1) as usize;
    let total_pages = u32::try_from(items.len().div_ceil(limit_usize)).unwrap_or(u32::MAX);
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit_usize);
    let page_items: Vec<Product> = items.into_iter().skip(start).take(limit_usize).collect();
    PageResult::new(page_items, page, total_pages)
}

#[async_trait]
impl CatalogApi for InMemoryApi {
    async fn listing(&self, page: u32, limit: u32) -> Result<PageResult<Product>, ApiError> {
        self.record_call()?;
        Ok(paginate(self.products.clone(), page, limit))
    }

    async fn listing_by_category(
        &self,
        category: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageResult<Product>, ApiError> {
        self.record_call()?;
        let matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.category_name() == Some(category))
            .cloned()
            .collect();
        Ok(paginate(matches, page, limit))
    }

    async fn listing_filtered(
        &self,
        filter: &FilterCriteria,
        page: u32,
    ) -> Result<PageResult<Product>, ApiError> {
        self.record_call()?;
        let needle = filter.title_query.to_lowercase();
        let matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .filter(|p| p.price <= filter.max_price)
            .cloned()
            .collect();
        Ok(paginate(matches, page, FILTERED_PAGE_LIMIT))
    }

    async fn favorites(&self, page: u32) -> Result<PageResult<Product>, ApiError> {
        self.record_call()?;
        let favorited: Vec<Product> = self
            .favorite_ids()
            .iter()
            .filter_map(|id| self.find_product(id))
            .collect();
        Ok(paginate(favorited, page, self.favorites_page_size))
    }

    async fn all_favorite_ids(&self) -> Result<Vec<ProductId>, ApiError> {
        self.record_call()?;
        Ok(self.favorite_ids())
    }

    async fn add_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError> {
        self.record_call()?;
        let mut favorites = self.favorites.lock().expect("favorites lock poisoned");
        if !favorites.contains(id) {
            favorites.push(id.clone());
        }
        Ok(favorites.clone())
    }

    async fn remove_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError> {
        self.record_call()?;
        let mut favorites = self.favorites.lock().expect("favorites lock poisoned");
        favorites.retain(|f| f != id);
        Ok(favorites.clone())
    }

    async fn clear_favorites(&self) -> Result<(), ApiError> {
        self.record_call()?;
        self.favorites.lock().expect("favorites lock poisoned").clear();
        Ok(())
    }

    async fn cart(&self, page: u32) -> Result<CartSnapshot, ApiError> {
        self.record_call()?;
        self.cart_pages
            .lock()
            .expect("cart pages lock poisoned")
            .push(page);

        let lines: Vec<CartLine> = self
            .cart
            .lock()
            .expect("cart lock poisoned")
            .iter()
            .filter_map(|(id, quantity)| {
                self.find_product(id).map(|product| CartLine {
                    product,
                    quantity: *quantity,
                })
            })
            .collect();

        let limit = self.cart_page_size.max(1) as usize;
        let total_pages = u32::try_from(lines.len().div_ceil(limit)).unwrap_or(u32::MAX).max(1);
        let current_page = page.clamp(1, total_pages);
        let start = (current_page as usize - 1).saturating_mul(limit);
        let page_lines: Vec<CartLine> = lines.into_iter().skip(start).take(limit).collect();

        Ok(CartSnapshot {
            lines: page_lines,
            current_page,
            total_pages,
        })
    }

    async fn add_to_cart(&self, id: &ProductId) -> Result<(), ApiError> {
        self.record_call()?;
        let mut cart = self.cart.lock().expect("cart lock poisoned");
        match cart.iter_mut().find(|(line_id, _)| line_id == id) {
            Some((_, quantity)) => *quantity += 1,
            None => cart.push((id.clone(), 1)),
        }
        Ok(())
    }

    async fn edit_cart_quantity(&self, id: &ProductId, quantity: u32) -> Result<(), ApiError> {
        self.record_call()?;
        let mut cart = self.cart.lock().expect("cart lock poisoned");
        if let Some((_, line_quantity)) = cart.iter_mut().find(|(line_id, _)| line_id == id) {
            *line_quantity = quantity;
        }
        Ok(())
    }

    async fn remove_from_cart(&self, id: Option<&ProductId>) -> Result<(), ApiError> {
        self.record_call()?;
        let mut cart = self.cart.lock().expect("cart lock poisoned");
        match id {
            Some(id) => cart.retain(|(line_id, _)| line_id != id),
            None => cart.clear(),
        }
        Ok(())
    }
}

// =============================================================================
// Recording Notifier
// =============================================================================

/// Captures every notification the engine emits, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("successes lock poisoned").clone()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("errors lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes
            .lock()
            .expect("successes lock poisoned")
            .push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors
            .lock()
            .expect("errors lock poisoned")
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_paginates_seeded_products() {
        let api = InMemoryApi::new((1..=10).map(|n| product(&format!("p{n}"), "Tea", 10)).collect());
        let page = api.listing(2, 8).await.expect("listing");
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let api = InMemoryApi::new(vec![product("p1", "Tea", 10)]);
        api.fail_next(500, "out of stock");

        let err = api.listing(1, 8).await.expect_err("armed failure");
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert!(api.listing(1, 8).await.is_ok());
    }
}
