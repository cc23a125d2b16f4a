//! # Checkout
//!
//! Turns the cart into an order and resets the shopping UI.
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        checkout()                                       │
//! │                                                                         │
//! │  lock cart ──► empty? ──yes──► return EmptyCart (nothing touched)       │
//! │      │                                                                  │
//! │      ▼ no                                                               │
//! │  lock orders ──► lock toasts ──► lock modal                             │
//! │      │                                                                  │
//! │      ├─ 1. order = cart lines + total + fresh id + local date           │
//! │      ├─ 2. index = orders.len();  orders += order                       │
//! │      ├─ 3. cart.clear()                                                 │
//! │      ├─ 4. toasts += "Order placed successfully!" (success, 3000 ms)    │
//! │      └─ 5. modal: close cart, close product detail                      │
//! │                                                                         │
//! │  release all four, then notify cart, orders, toasts, modal             │
//! │      │                                                                  │
//! │      ├─ start toast expiry timer                                        │
//! │      └─ navigate("{order_detail_prefix}/{index}")                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Readers See
//! The four locks are taken together, always in the order cart, orders,
//! toasts, modal, and every mutation lands before any of them is released.
//! No notification goes out until all four are unlocked. Store reads and
//! [`StoreWatcher`](crate::StoreWatcher) reads both go through the locks,
//! so a reader woken by any one of the four notifications finds the whole
//! checkout applied: never a new order next to a still-full cart.

use storefront_core::ids::format_order_date;
use storefront_core::{
    CartAction, ModalAction, Money, NewToast, Order, OrderAction, OrderId, ToastAction, ToastId,
};
use tracing::{debug, info};

use crate::storefront::Storefront;

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing changed.
    EmptyCart,
    Placed(PlacedOrder),
}

impl CheckoutOutcome {
    pub fn placed(&self) -> Option<&PlacedOrder> {
        match self {
            CheckoutOutcome::Placed(placed) => Some(placed),
            CheckoutOutcome::EmptyCart => None,
        }
    }
}

/// Summary of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Position in the order history (the order-detail route segment).
    pub index: usize,
    pub order_id: OrderId,
    pub total: Money,
    pub item_count: usize,
    /// The "order placed" toast.
    pub toast_id: ToastId,
    /// Route the navigator was sent to.
    pub path: String,
}

impl Storefront {
    /// Places an order from the current cart.
    pub fn checkout(&self) -> CheckoutOutcome {
        let (index, order_id, total, item_count, toast, publications) = {
            let mut cart = self.cart.lock();
            if cart.is_empty() {
                debug!("Checkout with empty cart ignored");
                return CheckoutOutcome::EmptyCart;
            }
            let mut orders = self.orders.lock();
            let mut toasts = self.toasts.lock();
            let mut modal = self.modal.lock();

            let now = self.clock.now();
            let order_id = OrderId(self.ids.next(now.timestamp_millis()));
            let order = Order::from_cart(order_id, &cart, format_order_date(&now));
            let total = order.total;
            let item_count = order.item_count();

            let index = orders.len();
            orders.dispatch(OrderAction::Add(order));
            cart.dispatch(CartAction::Clear);

            let toast = NewToast::success(self.config.toast.checkout_message.clone())
                .duration_ms(self.config.toast.checkout_duration_ms)
                .into_toast(ToastId(self.next_id()));
            toasts.dispatch(ToastAction::Add(toast.clone()));

            for action in ModalAction::close_all() {
                modal.dispatch(action);
            }

            let publications = [
                cart.release(),
                orders.release(),
                toasts.release(),
                modal.release(),
            ];
            (index, order_id, total, item_count, toast, publications)
        };
        for publication in publications {
            publication.publish();
        }

        self.scheduler.schedule_expiry(&toast);

        let path = self.config.routes.order_detail(index);
        info!(
            order_id = %order_id,
            index,
            total = %total,
            items = item_count,
            path = %path,
            "Order placed"
        );
        self.navigator.navigate(&path);

        CheckoutOutcome::Placed(PlacedOrder {
            index,
            order_id,
            total,
            item_count,
            toast_id: toast.id,
            path,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
