//! Catalog product types.
//!
//! Products are immutable from the client's perspective; the remote catalog
//! service owns them. Field names follow the wire format of that service
//! (Mongo-style `_id`, camelCase keys).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// Reference to the category a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category ID.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Category display name, also used as the route segment.
    pub name: String,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Unit price. Non-negative, currency-agnostic.
    pub price: Decimal,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Category this product belongs to, if assigned.
    #[serde(rename = "categoryID", default)]
    pub category: Option<CategoryRef>,
    /// Average review rating, 0 to 5.
    #[serde(rename = "avgRating", default)]
    pub rating: f64,
    /// Marketing labels such as "new arrival", "vegan", "signature".
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Product {
    /// Category name for routing, if the product has one.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_deserializes_wire_shape() {
        let json = r#"{
            "_id": "64af01",
            "title": "Pistachio Baklava",
            "description": "Layered and syruped.",
            "price": 120,
            "thumbnail": "https://cdn.example.com/baklava.jpg",
            "categoryID": { "_id": "c1", "name": "Oriental Sweets" },
            "avgRating": 4.5,
            "labels": ["signature", "new arrival"]
        }"#;

        let product: Product = serde_json::from_str(json).expect("valid product json");
        assert_eq!(product.id, ProductId::new("64af01"));
        assert_eq!(product.price, Decimal::from(120));
        assert_eq!(product.category_name(), Some("Oriental Sweets"));
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.labels.len(), 2);
    }

    #[test]
    fn test_product_optional_fields_default() {
        // Bare catalog entries omit category, rating, and labels
        let json = r#"{ "_id": "p2", "title": "Tea", "price": "12.50" }"#;
        let product: Product = serde_json::from_str(json).expect("valid product json");
        assert!(product.category.is_none());
        assert_eq!(product.category_name(), None);
        assert!(product.rating.abs() < f64::EPSILON);
        assert!(product.labels.is_empty());
    }
}
