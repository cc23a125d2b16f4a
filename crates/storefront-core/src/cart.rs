//! # Cart
//!
//! The set of products selected for purchase, with quantities.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Actions                                         │
//! │                                                                         │
//! │  UI Intent                 CartAction                State Change       │
//! │  ─────────                 ──────────                ────────────       │
//! │                                                                         │
//! │  "Add to cart" ──────────► Add(item) ──────────────► qty += 1 or insert │
//! │                                                                         │
//! │  "−" button (qty > 1) ───► UpdateQuantity ─────────► items[i].qty = n   │
//! │                                                                         │
//! │  "−" (qty == 1), trash ──► Remove(id) ─────────────► entry deleted      │
//! │                                                                         │
//! │  Checkout ───────────────► Clear ──────────────────► items = []         │
//! │                                                                         │
//! │  NOTE: total() is derived on every read, never stored.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one entry per product id
//! - Quantity is always ≥ 1; reaching 0 deletes the entry
//! - Entries keep insertion order (display order)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::reducer::Reducer;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart.
///
/// The product fields are copied when the item is first added, so later
/// catalog changes do not alter what the shopper sees in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id; unique within the cart.
    pub id: ProductId,

    /// Product title at time of adding.
    pub title: String,

    /// Unit price at time of adding.
    pub price: Money,

    /// First product image, if the catalog had one.
    pub image: Option<String>,

    /// Always ≥ 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart line for one unit of `product`.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.primary_image().map(str::to_owned),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// Intents accepted by [`Cart`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit. Only `item.id` matters when the entry already exists.
    Add(CartItem),

    /// Set the quantity of an existing entry.
    ///
    /// Callers route "decrement to zero" to [`CartAction::Remove`]; a zero
    /// that slips through still removes the entry.
    UpdateQuantity { id: ProductId, quantity: u32 },

    /// Delete the entry if present.
    Remove(ProductId),

    /// Empty the cart.
    Clear,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from previously saved items.
    ///
    /// Callers validate the items first (see `validation::validate_cart_items`).
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Whether the product is already in the cart ("In cart" badge).
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct entries.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities (navbar badge).
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ price × quantity, recomputed on every call.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += 1;
            return;
        }

        self.items.push(CartItem { quantity: 1, ..item });
    }

    fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    fn remove(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }
}

impl Reducer for Cart {
    type Action = CartAction;

    fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(item) => self.add(item),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            CartAction::Remove(id) => self.remove(id),
            CartAction::Clear => self.items.clear(),
        }
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price_cents: i64) -> CartItem {
        CartItem::from_product(&Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
        ))
    }

    fn apply(cart: Cart, actions: Vec<CartAction>) -> Cart {
        actions.into_iter().fold(cart, |c, a| c.reduce(a))
    }

    #[test]
    fn test_add_inserts_with_quantity_one() {
        let cart = Cart::new().reduce(CartAction::Add(item(1, 999)));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(ProductId(1)).unwrap().quantity, 1);
        assert_eq!(cart.total().cents(), 999);
    }

    #[test]
    fn test_repeated_add_counts_calls() {
        let cart = apply(Cart::new(), (0..5).map(|_| CartAction::Add(item(1, 999))).collect());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(ProductId(1)).unwrap().quantity, 5);
        assert_eq!(cart.total().cents(), 4995);
    }

    #[test]
    fn test_add_existing_ignores_other_fields() {
        let mut changed = item(1, 999);
        changed.title = "Renamed".to_string();
        changed.price = Money::from_cents(1);
        changed.quantity = 40;

        let cart = apply(
            Cart::new(),
            vec![CartAction::Add(item(1, 999)), CartAction::Add(changed)],
        );

        let entry = cart.get(ProductId(1)).unwrap();
        assert_eq!(entry.title, "Product 1");
        assert_eq!(entry.price.cents(), 999);
        assert_eq!(entry.quantity, 2);
    }

    #[test]
    fn test_new_entry_ignores_incoming_quantity() {
        let mut incoming = item(1, 100);
        incoming.quantity = 7;

        let cart = Cart::new().reduce(CartAction::Add(incoming));
        assert_eq!(cart.get(ProductId(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_total_over_distinct_ids() {
        // [{id:1, price:10, qty:2}, {id:2, price:5, qty:1}] → 25.00
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(1, 1000)),
                CartAction::Add(item(1, 1000)),
                CartAction::Add(item(2, 500)),
            ],
        );

        assert_eq!(cart.total(), Money::from_major_minor(25, 0));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity() {
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(1, 250)),
                CartAction::UpdateQuantity { id: ProductId(1), quantity: 4 },
            ],
        );

        assert_eq!(cart.get(ProductId(1)).unwrap().quantity, 4);
        assert_eq!(cart.total().cents(), 1000);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(1, 250)),
                CartAction::UpdateQuantity { id: ProductId(9), quantity: 4 },
            ],
        );

        assert_eq!(cart.item_count(), 1);
        assert!(!cart.contains(ProductId(9)));
    }

    #[test]
    fn test_update_to_zero_never_leaves_zero_quantity() {
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(1, 250)),
                CartAction::UpdateQuantity { id: ProductId(1), quantity: 0 },
            ],
        );

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_then_add_resets_quantity() {
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(1, 250)),
                CartAction::Add(item(1, 250)),
                CartAction::Add(item(1, 250)),
                CartAction::Remove(ProductId(1)),
                CartAction::Add(item(1, 250)),
            ],
        );

        assert_eq!(cart.get(ProductId(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let cart = Cart::new()
            .reduce(CartAction::Add(item(1, 250)))
            .reduce(CartAction::Remove(ProductId(2)));

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear() {
        let cart = apply(
            Cart::new(),
            vec![CartAction::Add(item(1, 250)), CartAction::Add(item(2, 100)), CartAction::Clear],
        );

        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let cart = apply(
            Cart::new(),
            vec![
                CartAction::Add(item(3, 1)),
                CartAction::Add(item(1, 1)),
                CartAction::Add(item(3, 1)),
                CartAction::Add(item(2, 1)),
            ],
        );

        let ids: Vec<i64> = cart.items().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_from_product_copies_first_image() {
        let product = Product::new(ProductId(5), "Mug", Money::from_cents(1200))
            .with_image("https://img/mug-front.png")
            .with_image("https://img/mug-back.png");

        let line = CartItem::from_product(&product);
        assert_eq!(line.image.as_deref(), Some("https://img/mug-front.png"));
        assert_eq!(line.quantity, 1);
    }
}
