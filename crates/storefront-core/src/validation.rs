//! # Validation Module
//!
//! Checks for data that enters the state layer from outside a reducer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Runs                              │
//! │                                                                         │
//! │  Live intents (add, update, remove, checkout)                          │
//! │  └── NOT validated: the UI edge routes decrement-to-zero to removal,    │
//! │      and reducers cannot produce a broken cart on their own             │
//! │                                                                         │
//! │  Restored snapshot (cartItems, orders)                                  │
//! │  └── THIS MODULE: a hand-edited or stale file could hold qty 0,         │
//! │      negative prices or duplicate ids; reject it before it reaches      │
//! │      a store                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::cart::CartItem;
use crate::error::ValidationError;
use crate::money::Money;
use crate::order::Order;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A price must be zero or more.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice {
            field: field.to_string(),
            cents: price.cents(),
        });
    }
    Ok(())
}

/// A cart quantity must be at least 1.
pub fn validate_quantity(field: &str, quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::ZeroQuantity {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Titles are shown everywhere; an empty one is a broken record.
pub fn validate_title(field: &str, title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates cart lines: unique ids, quantity ≥ 1, price ≥ 0, non-empty title.
///
/// ```rust
/// use storefront_core::validation::validate_cart_items;
///
/// assert!(validate_cart_items("cartItems", &[]).is_ok());
/// ```
pub fn validate_cart_items(field: &str, items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("{}[{}]", field, i);
        validate_title(&format!("{}.title", prefix), &item.title)?;
        validate_price(&format!("{}.price", prefix), item.price)?;
        validate_quantity(&format!("{}.quantity", prefix), item.quantity)?;

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: format!("{}.id", field),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates an order history: unique ids, valid lines, totals that match.
pub fn validate_orders(field: &str, orders: &[Order]) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for (i, order) in orders.iter().enumerate() {
        let prefix = format!("{}[{}]", field, i);
        validate_cart_items(&format!("{}.items", prefix), &order.items)?;

        let computed: Money = order.items.iter().map(CartItem::line_total).sum();
        if computed != order.total {
            return Err(ValidationError::TotalMismatch {
                order_id: order.id.to_string(),
                stored: order.total.cents(),
                computed: computed.cents(),
            });
        }

        if !seen.insert(order.id) {
            return Err(ValidationError::Duplicate {
                field: format!("{}.id", field),
                value: order.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
