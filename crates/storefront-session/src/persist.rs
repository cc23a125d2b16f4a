//! # Session Snapshots
//!
//! The durable part of a session: cart lines and placed orders.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     What Survives a Restart                             │
//! │                                                                         │
//! │  PERSISTED                         │  NEVER PERSISTED                   │
//! │  ─────────                         │  ───────────────                   │
//! │  cartItems                         │  toasts (their timers are gone)    │
//! │  orders                            │  modal flags                       │
//! │  sessionId                         │  user (owned by auth)              │
//! │                                                                         │
//! │  save: serialize ──► <path>.tmp ──► rename over <path>                  │
//! │  load: missing file ──► None                                            │
//! │        present ──► decode ──► validate ──► Some(snapshot)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_cart_items, validate_orders};
use storefront_core::{CartItem, Order, OrderId};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionResult;

/// Cart and order history at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SessionSnapshot {
    /// Rejects snapshots that would break a store invariant.
    pub fn validate(&self) -> SessionResult<()> {
        validate_cart_items("cartItems", &self.cart_items)?;
        validate_orders("orders", &self.orders)?;
        Ok(())
    }

    /// Highest order id in the snapshot.
    pub fn max_order_id(&self) -> Option<OrderId> {
        self.orders.iter().map(|o| o.id).max()
    }

    /// Writes the snapshot as JSON, replacing `path` in one rename.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;

        info!(
            ?path,
            cart_items = self.cart_items.len(),
            orders = self.orders.len(),
            "Session snapshot saved"
        );
        Ok(())
    }

    /// Reads and validates a snapshot. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> SessionResult<Option<Self>> {
        if !path.exists() {
            debug!(?path, "No session snapshot found");
            return Ok(None);
        }

        let bytes = std::fs::read(path)?;
        let snapshot: SessionSnapshot = serde_json::from_slice(&bytes)?;
        snapshot.validate()?;

        info!(
            ?path,
            session_id = %snapshot.session_id,
            cart_items = snapshot.cart_items.len(),
            orders = snapshot.orders.len(),
            "Session snapshot loaded"
        );
        Ok(Some(snapshot))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
