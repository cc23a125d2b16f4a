//! # Navigation
//!
//! The router is a collaborator the session only pushes paths into.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout() ──► navigator.navigate("/home/my-orders/3")                 │
//! │                                                                         │
//! │  Implementations:                                                      │
//! │  • NoOpNavigator     - headless sessions and tests                     │
//! │  • TracingNavigator  - logs every route change (demo binary)           │
//! │  • UI shell          - pushes onto its own history stack               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

/// Receives route changes initiated by the state layer.
pub trait Navigator: Send + Sync {
    /// Moves the UI to `path`.
    fn navigate(&self, path: &str);
}

/// Navigator that drops every route change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNavigator;

impl Navigator for NoOpNavigator {
    fn navigate(&self, _path: &str) {}
}

/// Navigator that logs route changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "Navigate");
    }
}

/// Builds the order-detail route for a position in the order history.
///
/// ```rust
/// use storefront_session::navigation::order_detail_path;
///
/// assert_eq!(order_detail_path("/home/my-orders", 0), "/home/my-orders/0");
/// assert_eq!(order_detail_path("/home/my-orders/", 2), "/home/my-orders/2");
/// ```
pub fn order_detail_path(prefix: &str, index: usize) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), index)
}
