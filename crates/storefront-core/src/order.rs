//! # Order History
//!
//! The append-only list of placed orders.
//!
//! ## Lookup by Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /home/my-orders/1                                                      │
//! │                  │                                                      │
//! │                  ▼  parse_order_index("1") → 1                          │
//! │                                                                         │
//! │  orders: [ Order{id: 1760800000000}, Order{id: 1760800054321}, ... ]    │
//! │                   index 0                  index 1  ◄── shown           │
//! │                                                                         │
//! │  The path carries the POSITION, not Order.id.                           │
//! │  "abc", "-1", "99" (past the end) → not found view, never a panic       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::{Cart, CartItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::reducer::Reducer;

// =============================================================================
// Order Id
// =============================================================================

/// Creation timestamp in Unix milliseconds, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,

    /// Cart lines as they were at checkout.
    pub items: Vec<CartItem>,

    /// Cart total at checkout.
    pub total: Money,

    /// Human-readable local timestamp, e.g. `10/18/2026, 3:04:05 PM`.
    pub date: String,
}

impl Order {
    /// Snapshots a cart into an order.
    pub fn from_cart(id: OrderId, cart: &Cart, date: impl Into<String>) -> Self {
        Order {
            id,
            items: cart.items().to_vec(),
            total: cart.total(),
            date: date.into(),
        }
    }

    /// Last six digits of the id, shown as `Order #123456`.
    pub fn short_id(&self) -> String {
        let digits = self.id.0.to_string();
        let start = digits.len().saturating_sub(6);
        digits[start..].to_string()
    }

    /// Number of distinct lines in the order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Order Action
// =============================================================================

/// Intents accepted by [`OrderHistory`]. There is no edit or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Add(Order),
}

// =============================================================================
// Order History
// =============================================================================

/// Orders in placement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    list: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from previously saved orders.
    pub fn from_orders(list: Vec<Order>) -> Self {
        OrderHistory { list }
    }

    pub fn orders(&self) -> &[Order] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Order at a position; `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Order> {
        self.list.get(index)
    }

    /// Resolves the order-detail path segment.
    ///
    /// Any segment that is not a valid position yields `None`, which the UI
    /// renders as its "Order not found" view.
    pub fn get_by_path(&self, segment: &str) -> Option<&Order> {
        parse_order_index(segment)
            .ok()
            .and_then(|index| self.get(index))
    }

    /// Highest id in the history, used to seed the id source after a restore.
    pub fn last_id(&self) -> Option<OrderId> {
        self.list.iter().map(|o| o.id).max()
    }
}

impl Reducer for OrderHistory {
    type Action = OrderAction;

    fn reduce(mut self, action: OrderAction) -> Self {
        match action {
            OrderAction::Add(order) => self.list.push(order),
        }
        self
    }
}

/// Parses an order-detail path segment into a list position.
pub fn parse_order_index(segment: &str) -> CoreResult<usize> {
    segment
        .trim()
        .parse::<usize>()
        .map_err(|_| CoreError::InvalidOrderPath(segment.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
