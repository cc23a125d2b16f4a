//! # State Module
//!
//! The four session stores.
//!
//! ## Why Four Stores?
//! Each concern gets its own store instead of one combined session state:
//!
//! 1. **Clearer Signatures**: An operation locks exactly the stores it touches
//! 2. **Reduced Contention**: Toast timers never block cart edits
//! 3. **Focused Subscriptions**: The navbar badge only wakes on cart changes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  CartStore   │ │  ModalStore  │ │  OrderStore  │ │  ToastStore  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Store<Cart>  │ │ Store<Modal- │ │ Store<Order- │ │ Store<Toast- │   │
//! │  │              │ │   State>     │ │   History>   │ │   Queue>     │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  LOCK ORDER (whenever more than one is held):                          │
//! │  cart ──► orders ──► toasts ──► modal                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::{Publication, Store, StoreGuard, StoreWatcher};

use storefront_core::{Cart, ModalState, OrderHistory, ToastQueue};

/// Cart lines and quantities.
pub type CartStore = Store<Cart>;

/// Overlay visibility.
pub type ModalStore = Store<ModalState>;

/// Placed orders, oldest first.
pub type OrderStore = Store<OrderHistory>;

/// Queued notifications.
pub type ToastStore = Store<ToastQueue>;
