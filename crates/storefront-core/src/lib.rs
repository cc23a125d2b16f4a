//! # storefront-core: Pure State for the Storefront Session
//!
//! This crate holds every piece of storefront session state as a plain value
//! with a pure transition function. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (pages, navbar, overlays)                 │   │
//! │  │   Catalog ──► Cart drawer ──► Checkout ──► Order details        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents / snapshots                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-session (Storefront)                   │   │
//! │  │     stores, toast timers, checkout, config, snapshots           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────────┐ ┌────────────┐      │   │
//! │  │   │  cart   │ │  modal  │ │    order     │ │   toast    │      │   │
//! │  │   │  Cart   │ │ Modal-  │ │ OrderHistory │ │ ToastQueue │      │   │
//! │  │   │CartItem │ │  State  │ │    Order     │ │ ToastPhase │      │   │
//! │  │   └─────────┘ └─────────┘ └──────────────┘ └────────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOGGING • PURE REDUCERS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`reducer`] - The `Reducer` trait every state implements
//! - [`cart`] - Cart lines, quantities, derived total
//! - [`modal`] - Cart drawer and product-detail visibility
//! - [`order`] - Append-only order history, lookup by position
//! - [`toast`] - Notification queue and its lifecycle phases
//! - [`money`] - Integer cents
//! - [`ids`] - Clock and strictly increasing millisecond ids
//! - [`types`] - Product and User from collaborators
//! - [`validation`] - Checks for restored snapshot data
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, CartAction, CartItem, Money, Product, ProductId, Reducer};
//!
//! let tee = Product::new(ProductId(1), "Tee", Money::from_cents(1000));
//! let cart = Cart::new()
//!     .reduce(CartAction::Add(CartItem::from_product(&tee)))
//!     .reduce(CartAction::Add(CartItem::from_product(&tee)));
//!
//! assert_eq!(cart.total().to_string(), "$20.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod ids;
pub mod modal;
pub mod money;
pub mod order;
pub mod reducer;
pub mod toast;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{Clock, FixedClock, IdSource, SystemClock};
pub use modal::{ModalAction, ModalState};
pub use money::Money;
pub use order::{Order, OrderAction, OrderHistory, OrderId};
pub use reducer::Reducer;
pub use toast::{NewToast, Toast, ToastAction, ToastId, ToastKind, ToastPhase, ToastQueue};
pub use types::{Product, ProductId, User};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Message of the toast shown after a successful checkout.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// How long the checkout toast stays visible.
pub const ORDER_PLACED_TOAST_MS: u64 = 3000;

/// How long the "added to cart" toast stays visible.
pub const ADDED_TO_CART_TOAST_MS: u64 = 2000;
