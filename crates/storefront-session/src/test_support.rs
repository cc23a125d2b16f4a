//! Shared fixtures for session tests.

use std::sync::{Arc, Mutex};

use storefront_core::{CartItem, FixedClock, Money, Product, ProductId};

use crate::config::StorefrontConfig;
use crate::navigation::Navigator;
use crate::storefront::Storefront;

/// 2023-11-14T22:13:20Z
pub(crate) const START_MILLIS: i64 = 1_700_000_000_000;

/// Navigator that remembers every path it was sent to.
#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Session on the current test runtime with a pinned clock.
pub(crate) fn storefront() -> (Storefront, Arc<RecordingNavigator>) {
    storefront_with(StorefrontConfig::default())
}

pub(crate) fn storefront_with(config: StorefrontConfig) -> (Storefront, Arc<RecordingNavigator>) {
    let nav = Arc::new(RecordingNavigator::default());
    let sf = Storefront::builder(config)
        .clock(Arc::new(FixedClock::from_millis(START_MILLIS)))
        .navigator(nav.clone())
        .build()
        .unwrap();
    (sf, nav)
}

pub(crate) fn item(id: i64, cents: i64) -> CartItem {
    CartItem::from_product(&product(id, cents))
}

pub(crate) fn product(id: i64, cents: i64) -> Product {
    Product::new(ProductId(id), format!("Product {}", id), Money::from_cents(cents))
}
