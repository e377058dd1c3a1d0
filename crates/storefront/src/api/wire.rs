//! Wire envelopes for the remote catalog service.
//!
//! The service wraps collections in ad hoc envelopes (`data` for listings,
//! `favorites` for the favorite set) with camelCase pagination fields. These
//! types absorb that shape at the boundary and convert into the clean core
//! types the engine works with.

use rust_decimal::Decimal;
use serde::Deserialize;

use saffron_core::{CartLine, CartSnapshot, PageResult, Product, ProductId};

fn default_page() -> u32 {
    1
}

/// `{ data, currentPage, totalPages }` listing envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedProducts {
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

impl From<PagedProducts> for PageResult<Product> {
    fn from(envelope: PagedProducts) -> Self {
        Self::new(envelope.data, envelope.current_page, envelope.total_pages)
    }
}

/// One entry of a favorites payload.
///
/// The service is inconsistent here: some responses carry full products,
/// others bare ID strings. Either way only the ID matters to membership.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FavoriteEntry {
    Product(Box<Product>),
    Id(ProductId),
}

impl FavoriteEntry {
    pub fn into_id(self) -> ProductId {
        match self {
            Self::Product(product) => product.id,
            Self::Id(id) => id,
        }
    }
}

/// `{ favorites }` envelope returned by the unpaginated ID fetch and by
/// favorite mutations.
#[derive(Debug, Deserialize)]
pub struct FavoritesList {
    #[serde(default)]
    pub favorites: Vec<FavoriteEntry>,
}

impl FavoritesList {
    pub fn into_ids(self) -> Vec<ProductId> {
        self.favorites
            .into_iter()
            .map(FavoriteEntry::into_id)
            .collect()
    }
}

/// `{ favorites, totalPages }` envelope for the paged favorites view.
///
/// The endpoint does not echo the requested page, so conversion takes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesPage {
    #[serde(default)]
    pub favorites: Vec<Product>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

impl FavoritesPage {
    pub fn into_page_result(self, requested_page: u32) -> PageResult<Product> {
        PageResult::new(self.favorites, requested_page, self.total_pages)
    }
}

/// `{ data, totalPages, subtotal }` cart envelope.
///
/// The reported subtotal is advisory; [`CartSnapshot`] re-derives it from
/// confirmed lines, so it is parsed but otherwise unused.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEnvelope {
    #[serde(default)]
    pub data: Vec<CartLine>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

impl CartEnvelope {
    pub fn into_snapshot(self, requested_page: u32) -> CartSnapshot {
        let total_pages = self.total_pages.max(1);
        CartSnapshot {
            lines: self.data,
            current_page: requested_page.clamp(1, total_pages),
            total_pages,
        }
    }
}

/// Error payload carried by non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_products_envelope() {
        let json = r#"{
            "data": [{ "_id": "p1", "title": "Kunafa", "price": 95 }],
            "currentPage": 2,
            "totalPages": 3
        }"#;
        let page: PageResult<Product> =
            serde_json::from_str::<PagedProducts>(json).expect("valid").into();
        assert_eq!(page.len(), 1);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_listing_still_has_one_page() {
        let json = r#"{ "data": [] }"#;
        let page: PageResult<Product> =
            serde_json::from_str::<PagedProducts>(json).expect("valid").into();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_favorites_list_mixed_entries() {
        let json = r#"{
            "favorites": [
                { "_id": "P1", "title": "Basbousa", "price": 40 },
                "P9"
            ]
        }"#;
        let ids = serde_json::from_str::<FavoritesList>(json)
            .expect("valid")
            .into_ids();
        assert_eq!(ids, vec![ProductId::new("P1"), ProductId::new("P9")]);
    }

    #[test]
    fn test_favorites_page_takes_requested_page() {
        let json = r#"{ "favorites": [], "totalPages": 4 }"#;
        let page = serde_json::from_str::<FavoritesPage>(json)
            .expect("valid")
            .into_page_result(3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_cart_envelope_ignores_advisory_subtotal() {
        let json = r#"{
            "data": [{
                "productId": { "_id": "p1", "title": "Tea", "price": 10 },
                "quantity": 2
            }],
            "totalPages": 1,
            "subtotal": 9999
        }"#;
        let snapshot = serde_json::from_str::<CartEnvelope>(json)
            .expect("valid")
            .into_snapshot(1);
        // derived, not the server's advisory figure
        assert_eq!(snapshot.subtotal(), Decimal::from(20));
    }

    #[test]
    fn test_error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").expect("valid");
        assert!(body.message.is_empty());
    }
}
