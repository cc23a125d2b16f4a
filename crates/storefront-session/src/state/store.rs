//! # Store
//!
//! A mutex-guarded reducer state with change notifications.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store<R> Dispatch                               │
//! │                                                                         │
//! │  store.dispatch(action)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock() ──► StoreGuard ──► state = state.reduce(action)                 │
//! │                                │                                        │
//! │                                ▼                                        │
//! │              guard dropped: revision += 1, lock released                │
//! │                                │                                        │
//! │            ┌───────────────────┼───────────────────┐                   │
//! │            ▼                   ▼                   ▼                    │
//! │       watcher A           watcher B           watcher C                 │
//! │            └──── read the state through the same mutex ────┘           │
//! │                                                                         │
//! │  Watchers never hold a copy of their own: every read takes the store   │
//! │  lock. A change that holds several guards at once is therefore seen    │
//! │  whole, from any store, by anyone woken by any of its notifications.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Multi-Store Changes
//! [`StoreGuard::release`] unlocks without notifying and hands back a
//! [`Publication`]. Releasing every guard first and publishing afterwards
//! means a woken watcher never waits on a lock still held by the change
//! that woke it.

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::Reducer;
use tokio::sync::watch;
use tracing::trace;

/// One piece of session state plus its watchers.
///
/// Reads clone or project under the lock, so callers never hold a borrow
/// across a dispatch.
#[derive(Debug)]
pub struct Store<R: Reducer> {
    name: &'static str,
    state: Arc<Mutex<R>>,
    revision: watch::Sender<u64>,
}

impl<R: Reducer> Store<R> {
    /// Creates a store holding `initial`.
    pub fn new(name: &'static str, initial: R) -> Self {
        let (revision, _) = watch::channel(0);
        Store {
            name,
            state: Arc::new(Mutex::new(initial)),
            revision,
        }
    }

    /// Applies one action and notifies watchers.
    pub fn dispatch(&self, action: R::Action) {
        self.lock().dispatch(action);
    }

    /// Reads a projection of the current state.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, Reducer};
    /// use storefront_session::Store;
    ///
    /// let store = Store::new("cart", Cart::new());
    /// assert_eq!(store.select(|cart| cart.item_count()), 0);
    /// ```
    pub fn select<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&acquire(&self.state))
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> R {
        acquire(&self.state).clone()
    }

    /// Replaces the whole state, bypassing the reducer.
    ///
    /// Only used when restoring a validated snapshot.
    pub fn replace(&self, state: R) {
        self.lock().replace(state);
    }

    /// Watcher woken by every published change.
    pub fn subscribe(&self) -> StoreWatcher<R> {
        StoreWatcher {
            state: Arc::clone(&self.state),
            revision: self.revision.subscribe(),
        }
    }

    /// Takes the lock for a batch of dispatches.
    ///
    /// Watchers are notified once, when the guard is dropped.
    pub fn lock(&self) -> StoreGuard<'_, R> {
        StoreGuard {
            name: self.name,
            state: acquire(&self.state),
            revision: &self.revision,
            dirty: false,
        }
    }
}

fn acquire<R>(state: &Mutex<R>) -> MutexGuard<'_, R> {
    // Reducers are pure; a panic elsewhere cannot leave a half-applied state.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn bump(revision: &watch::Sender<u64>) {
    revision.send_modify(|rev| *rev = rev.wrapping_add(1));
}

// =============================================================================
// Store Guard
// =============================================================================

/// Exclusive access to a [`Store`].
///
/// Dereferences to the state; publishes on drop if anything was dispatched.
pub struct StoreGuard<'a, R: Reducer> {
    name: &'static str,
    state: MutexGuard<'a, R>,
    revision: &'a watch::Sender<u64>,
    dirty: bool,
}

impl<'a, R: Reducer> StoreGuard<'a, R> {
    /// Applies an action to the guarded state.
    pub fn dispatch(&mut self, action: R::Action) {
        trace!(store = self.name, ?action, "dispatch");
        let current = std::mem::take(&mut *self.state);
        *self.state = current.reduce(action);
        self.dirty = true;
    }

    /// Swaps in a whole new state, bypassing the reducer.
    pub fn replace(&mut self, state: R) {
        *self.state = state;
        self.dirty = true;
    }

    /// Unlocks without notifying. The returned [`Publication`] notifies.
    pub fn release(mut self) -> Publication<'a> {
        let publication = Publication {
            revision: self.revision,
            pending: self.dirty,
        };
        self.dirty = false;
        publication
    }
}

impl<R: Reducer> Deref for StoreGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.state
    }
}

impl<R: Reducer> Drop for StoreGuard<'_, R> {
    fn drop(&mut self) {
        if self.dirty {
            bump(self.revision);
        }
    }
}

// =============================================================================
// Publication
// =============================================================================

/// A change already applied and unlocked, not yet announced.
///
/// Announces on [`publish`](Publication::publish) or on drop.
#[must_use = "dropping a publication notifies immediately"]
pub struct Publication<'a> {
    revision: &'a watch::Sender<u64>,
    pending: bool,
}

impl Publication<'_> {
    /// Notifies the store's watchers if the guard changed anything.
    pub fn publish(self) {}
}

impl Drop for Publication<'_> {
    fn drop(&mut self) {
        if self.pending {
            bump(self.revision);
        }
    }
}

// =============================================================================
// Store Watcher
// =============================================================================

/// Change notifications for one store, reading through its lock.
///
/// Cheap to clone; clones share nothing but the store.
#[derive(Debug, Clone)]
pub struct StoreWatcher<R: Reducer> {
    state: Arc<Mutex<R>>,
    revision: watch::Receiver<u64>,
}

impl<R: Reducer> StoreWatcher<R> {
    /// Waits for the next change this watcher has not seen.
    ///
    /// Errors once the store is gone.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.revision.changed().await
    }

    /// Whether a change was published since the last [`latest`](Self::latest).
    pub fn has_changed(&self) -> bool {
        self.revision.has_changed().unwrap_or(false)
    }

    /// Marks every change seen and returns the current state.
    pub fn latest(&mut self) -> R {
        let _ = self.revision.borrow_and_update();
        self.snapshot()
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> R {
        acquire(&self.state).clone()
    }

    /// Reads a projection of the current state.
    pub fn select<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&acquire(&self.state))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Cart, CartAction, CartItem, Money, ModalAction, ModalState, ProductId};

    fn item(id: i64, cents: i64) -> CartItem {
        CartItem {
            id: ProductId(id),
            title: format!("Item {}", id),
            price: Money::from_cents(cents),
            image: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_dispatch_updates_state() {
        let store = Store::new("cart", Cart::new());
        store.dispatch(CartAction::Add(item(1, 1000)));
        store.dispatch(CartAction::Add(item(1, 1000)));

        assert_eq!(store.select(|c| c.get(ProductId(1)).map(|i| i.quantity)), Some(2));
        assert_eq!(store.snapshot().total(), Money::from_cents(2000));
    }

    #[test]
    fn test_subscriber_sees_published_state() {
        let store = Store::new("modal", ModalState::new());
        let mut rx = store.subscribe();
        assert!(!rx.has_changed());

        store.dispatch(ModalAction::OpenCart);

        assert!(rx.has_changed());
        assert!(rx.latest().is_cart_open());
        assert!(!rx.has_changed());
    }

    #[test]
    fn test_guard_publishes_once_on_drop() {
        let store = Store::new("cart", Cart::new());
        let mut rx = store.subscribe();

        {
            let mut guard = store.lock();
            guard.dispatch(CartAction::Add(item(1, 500)));
            guard.dispatch(CartAction::Add(item(2, 700)));
            assert_eq!(guard.item_count(), 2);
            assert!(!rx.has_changed());
        }

        assert!(rx.has_changed());
        assert_eq!(rx.latest().item_count(), 2);
    }

    #[test]
    fn test_read_only_guard_does_not_publish() {
        let store = Store::new("cart", Cart::new());
        let mut rx = store.subscribe();
        {
            let guard = store.lock();
            assert!(guard.is_empty());
        }
        assert!(!rx.has_changed());
    }

    #[test]
    fn test_replace_publishes() {
        let store = Store::new("cart", Cart::new());
        let mut rx = store.subscribe();
        store.replace(Cart::from_items(vec![item(9, 100)]));
        assert!(rx.has_changed());
        assert!(store.select(|c| c.contains(ProductId(9))));
    }

    #[test]
    fn test_release_defers_notification() {
        let store = Store::new("cart", Cart::new());
        let rx = store.subscribe();

        let mut guard = store.lock();
        guard.dispatch(CartAction::Add(item(1, 500)));
        let publication = guard.release();

        // Unlocked and readable, not yet announced.
        assert_eq!(store.select(|c| c.item_count()), 1);
        assert!(!rx.has_changed());

        publication.publish();
        assert!(rx.has_changed());
    }

    #[test]
    fn test_clean_release_publishes_nothing() {
        let store = Store::new("cart", Cart::new());
        let rx = store.subscribe();
        store.lock().release().publish();
        assert!(!rx.has_changed());
    }

    #[test]
    fn test_watcher_reads_through_lock() {
        let store = Store::new("cart", Cart::new());
        let rx = store.subscribe();

        let mut guard = store.lock();
        guard.dispatch(CartAction::Add(item(1, 500)));
        let _publication = guard.release();

        // The change is visible before the notification goes out.
        assert_eq!(rx.select(|c| c.item_count()), 1);
        assert_eq!(rx.snapshot().total(), Money::from_cents(500));
    }

    #[tokio::test]
    async fn test_changed_wakes_on_dispatch() {
        let store = Store::new("modal", ModalState::new());
        let mut rx = store.subscribe();

        store.dispatch(ModalAction::OpenCart);
        rx.changed().await.unwrap();
        assert!(rx.select(|m| m.is_cart_open()));
    }
}
