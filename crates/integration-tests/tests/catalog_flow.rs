//! Scenario tests for catalog source selection and pagination.
//!
//! These drive the [`Catalog`] engine against the in-memory catalog service
//! and verify which listing tier answers, and what happens to the page index
//! as the route and filter context changes.

use std::sync::Arc;

use rust_decimal::Decimal;

use saffron_core::FilterCriteria;
use saffron_integration_tests::{InMemoryApi, init_tracing, product, product_in};
use saffron_storefront::catalog::{Catalog, SourceKind};

const PAGE_SIZE: u32 = 8;

fn seeded_api() -> Arc<InMemoryApi> {
    init_tracing();
    let mut products = Vec::new();
    for n in 1..=10 {
        products.push(product(&format!("p{n}"), &format!("Herbal Tea {n}"), 40 + n * 20));
    }
    products.push(product_in("d1", "Mint Lemonade", 35, "Drinks"));
    products.push(product_in("d2", "Iced Karkade", 45, "Drinks"));
    products.push(product_in("s1", "Pistachio Baklava", 120, "Oriental Sweets"));
    Arc::new(InMemoryApi::new(products))
}

// =============================================================================
// Source Selection
// =============================================================================

#[tokio::test]
async fn test_plain_listing_is_the_default() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.refresh().await;

    let listing = catalog.listing();
    assert_eq!(listing.kind, SourceKind::Plain);
    let result = listing.result.expect("plain page loaded");
    assert_eq!(result.len(), PAGE_SIZE as usize);
    assert_eq!(result.total_pages, 2);
}

#[tokio::test]
async fn test_category_route_switches_source() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_route_category(Some("Drinks".to_string()));
    catalog.refresh().await;

    let listing = catalog.listing();
    assert_eq!(listing.kind, SourceKind::Category);
    let result = listing.result.expect("category page loaded");
    assert_eq!(result.len(), 2);
    assert!(result.items.iter().all(|p| p.category_name() == Some("Drinks")));
}

#[tokio::test]
async fn test_active_filter_overrides_category_route() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_route_category(Some("Drinks".to_string()));
    catalog.refresh().await;

    catalog.set_filter(FilterCriteria::with_title("baklava"));
    catalog.refresh().await;

    let listing = catalog.listing();
    assert_eq!(listing.kind, SourceKind::Filtered);
    let result = listing.result.expect("filtered page loaded");
    // the filter ignores the route category entirely
    assert_eq!(result.len(), 1);
    assert_eq!(result.items[0].title, "Pistachio Baklava");
}

#[tokio::test]
async fn test_clearing_filter_restores_category_source() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_route_category(Some("Drinks".to_string()));
    catalog.set_filter(FilterCriteria::with_title("tea"));
    assert_eq!(catalog.active_kind(), SourceKind::Filtered);

    catalog.set_filter(FilterCriteria::default());
    assert_eq!(catalog.active_kind(), SourceKind::Category);
}

#[tokio::test]
async fn test_empty_route_category_counts_as_absent() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_route_category(Some(String::new()));
    assert_eq!(catalog.active_kind(), SourceKind::Plain);
}

// =============================================================================
// Pagination Across Context Changes
// =============================================================================

#[tokio::test]
async fn test_tier_change_resets_to_page_one() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.refresh().await;
    assert!(catalog.set_page(2));
    catalog.refresh().await;
    assert_eq!(catalog.page(), 2);

    // dragging the price slider below the sentinel activates the filter tier
    catalog.set_filter(FilterCriteria::with_max_price(Decimal::from(150)));
    assert_eq!(catalog.page(), 1);
    catalog.refresh().await;

    let listing = catalog.listing();
    assert_eq!(listing.kind, SourceKind::Filtered);
    let result = listing.result.expect("filtered page loaded");
    assert!(result.items.iter().all(|p| p.price <= Decimal::from(150)));
}

#[tokio::test]
async fn test_filter_change_resets_page_within_filtered_tier() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_filter(FilterCriteria::with_title("tea"));
    catalog.refresh().await;
    // ten matches, six per filtered page
    assert!(catalog.set_page(2));
    catalog.refresh().await;

    catalog.set_filter(FilterCriteria {
        title_query: "tea".to_string(),
        max_price: Decimal::from(150),
    });
    assert_eq!(catalog.page(), 1);
}

#[tokio::test]
async fn test_out_of_range_page_is_ignored() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.refresh().await;

    assert!(!catalog.set_page(0));
    assert!(!catalog.set_page(99));
    assert_eq!(catalog.page(), 1);
}

#[tokio::test]
async fn test_revisiting_a_tier_starts_from_page_one() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.refresh().await;
    catalog.set_page(2);
    catalog.refresh().await;

    catalog.set_route_category(Some("Drinks".to_string()));
    assert_eq!(catalog.page(), 1);
    catalog.set_route_category(None);
    assert_eq!(catalog.page(), 1);
}

// =============================================================================
// Failure and Empty States
// =============================================================================

#[tokio::test]
async fn test_fetch_failure_keeps_last_good_page_and_surfaces_message() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api.clone(), PAGE_SIZE);
    catalog.refresh().await;

    api.fail_next(500, "catalog temporarily offline");
    catalog.refresh().await;

    let listing = catalog.listing();
    assert_eq!(listing.error, Some("catalog temporarily offline"));
    // the previously fetched page stays readable
    let result = listing.result.expect("previous page retained");
    assert_eq!(result.len(), PAGE_SIZE as usize);
}

#[tokio::test]
async fn test_filter_with_no_matches_is_not_an_error() {
    let api = seeded_api();
    let mut catalog = Catalog::new(api, PAGE_SIZE);
    catalog.set_filter(FilterCriteria::with_title("nonexistent delicacy"));
    catalog.refresh().await;

    let listing = catalog.listing();
    assert!(listing.is_no_matches());
    assert!(listing.error.is_none());
}
