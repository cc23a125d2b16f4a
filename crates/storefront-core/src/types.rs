//! # Domain Types
//!
//! Shapes handed to the state layer by its collaborators.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Collaborator Types                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductId     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  i64 (catalog)  │   │  name           │       │
//! │  │  title          │   └─────────────────┘   │  email          │       │
//! │  │  price          │                         └─────────────────┘       │
//! │  │  images[]       │   from the catalog UI   from authentication       │
//! │  │  description    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state layer never mutates these. It copies what it needs
//! (`id, title, price, images[0], description`) into its own records.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Cart entries are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as decoded by the catalog browsing UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, never negative. A currency-unit number on the wire.
    pub price: Money,

    /// Image URLs in catalog order. Only the first is ever shown.
    #[serde(default)]
    pub images: Vec<String>,

    /// Long description for the product-detail panel.
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Creates a product without images or description.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            images: Vec::new(),
            description: None,
        }
    }

    /// Adds an image URL (builder style).
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The image the cart and detail panel display (`images[0]`).
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// User
// =============================================================================

/// The signed-in user, supplied read-only by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reducer;

    #[test]
    fn test_primary_image_is_first() {
        let product = Product::new(ProductId(7), "Lamp", Money::from_cents(1999))
            .with_image("https://img/a.png")
            .with_image("https://img/b.png");
        assert_eq!(product.primary_image(), Some("https://img/a.png"));
    }

    #[test]
    fn test_primary_image_missing() {
        let product = Product::new(ProductId(7), "Lamp", Money::from_cents(1999));
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_product_decodes_catalog_json() {
        let json = r#"{
            "id": 12,
            "title": "Classic Tee",
            "price": 29.99,
            "images": ["https://img/tee.png"],
            "description": "Soft cotton"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(12));
        assert_eq!(product.price.cents(), 2999);
        assert_eq!(product.description.as_deref(), Some("Soft cotton"));
    }

    #[test]
    fn test_whole_dollar_price_reaches_cart_total() {
        let json = r#"{"id":1,"title":"Shoe","price":10,"images":[]}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        let item = crate::CartItem::from_product(&product);
        let cart = crate::Cart::new().reduce(crate::CartAction::Add(item));
        assert_eq!(cart.total().to_string(), "$10.00");
    }

    #[test]
    fn test_product_encodes_price_in_units() {
        let product = Product::new(ProductId(3), "Mug", Money::from_cents(1250));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
    }
}
