//! # storefront-session: Session State for the Storefront UI
//!
//! This crate owns the stores of one shopper's session for its whole
//! lifetime and runs everything that needs time or I/O: toast timers,
//! checkout navigation, config files and snapshot files.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront (session root)                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       UI intents                                 │  │
//! │  │  add_product_to_cart · decrement_item · open_cart · checkout ... │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌──────────────┬──────┴───────┬──────────────┐                 │
//! │         ▼              ▼              ▼              ▼                  │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐           │
//! │  │ CartStore  │ │ ModalStore │ │ OrderStore │ │ ToastStore │           │
//! │  └────────────┘ └────────────┘ └────────────┘ └─────┬──────┘           │
//! │        each: Mutex<state> + watch revision          │                   │
//! │                                                     ▼                   │
//! │                                           ┌──────────────────┐          │
//! │                                           │  ToastScheduler  │          │
//! │                                           │  one tokio task  │          │
//! │                                           │  per toast       │          │
//! │                                           └──────────────────┘          │
//! │                                                                         │
//! │  COLLABORATORS:                                                        │
//! │  • Navigator  - router; checkout pushes the order-detail route         │
//! │  • Clock      - ids and order dates                                    │
//! │  • User       - read-only record from authentication                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - Generic `Store<R>` and the four store aliases
//! - [`timers`] - Toast expiry and dismissal tasks
//! - [`checkout`] - The cross-store checkout procedure
//! - [`navigation`] - `Navigator` trait and implementations
//! - [`config`] - `storefront.toml` loading
//! - [`persist`] - Cart and order snapshots
//! - [`error`] - Session error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use storefront_core::{Money, Product, ProductId};
//! use storefront_session::{Storefront, StorefrontConfig};
//!
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storefront = Storefront::new(StorefrontConfig::load_or_default(None))?;
//!
//! let tee = Product::new(ProductId(1), "Tee", Money::from_cents(1999));
//! storefront.add_product_to_cart(&tee);
//! storefront.open_cart();
//!
//! let outcome = storefront.checkout();
//! println!("{:?}", outcome);
//! # Ok(()) }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod navigation;
pub mod persist;
pub mod state;
pub mod storefront;
pub mod timers;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutOutcome, PlacedOrder};
pub use config::{PersistenceSettings, RouteSettings, StorefrontConfig, ToastSettings};
pub use error::{SessionError, SessionResult};
pub use navigation::{Navigator, NoOpNavigator, TracingNavigator};
pub use persist::SessionSnapshot;
pub use state::{
    CartStore, ModalStore, OrderStore, Publication, Store, StoreGuard, StoreWatcher, ToastStore,
};
pub use storefront::{Storefront, StorefrontBuilder};
pub use timers::ToastScheduler;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Every intent
/// - `RUST_LOG=trace` - Every store dispatch
/// - Default: `info,storefront_session=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_session=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
