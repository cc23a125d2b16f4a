//! # Storefront Session
//!
//! The session root: owns the stores, the id source, the toast timers and
//! the collaborators, and exposes every intent the UI can raise.
//!
//! ## Intent Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      UI Intent ──► Store                                │
//! │                                                                         │
//! │  Catalog "Add to cart" ───► add_product_to_cart() ─► cart + toast       │
//! │  Cart "+" ─────────────────► increment_item() ─────► cart               │
//! │  Cart "−" ─────────────────► decrement_item() ─────► cart               │
//! │                               (qty 1 → remove, else qty − 1)           │
//! │  Cart "×" ─────────────────► remove_from_cart() ───► cart               │
//! │  Navbar cart icon ─────────► open_cart() ──────────► modal              │
//! │  Product card ─────────────► open_product_detail() ► modal              │
//! │  Overlay backdrop ─────────► close_all() ──────────► modal (×2)         │
//! │  Toast close button ───────► dismiss_toast() ──────► toast + timer      │
//! │  "Place order" ────────────► checkout() ───────────► all four + nav     │
//! │  Order detail page ────────► order_by_path() ──────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::{
    Cart, CartAction, CartItem, Clock, IdSource, ModalAction, ModalState, Money, NewToast, Order,
    OrderAction, OrderHistory, Product, ProductId, SystemClock, ToastAction, ToastId, ToastKind,
    ToastPhase, ToastQueue, User,
};
use tokio::runtime::Handle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::error::SessionResult;
use crate::navigation::{Navigator, NoOpNavigator};
use crate::persist::SessionSnapshot;
use crate::state::{CartStore, ModalStore, OrderStore, Store, ToastStore};
use crate::timers::ToastScheduler;

// =============================================================================
// Storefront
// =============================================================================

/// One shopper's session.
pub struct Storefront {
    pub(crate) session_id: Uuid,
    pub(crate) config: StorefrontConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: IdSource,
    pub(crate) cart: CartStore,
    pub(crate) modal: ModalStore,
    pub(crate) orders: OrderStore,
    pub(crate) toasts: Arc<ToastStore>,
    pub(crate) scheduler: ToastScheduler,
    pub(crate) navigator: Arc<dyn Navigator>,
    user: RwLock<Option<User>>,
}

impl Storefront {
    /// Session with the system clock and no router, on the current runtime.
    pub fn new(config: StorefrontConfig) -> SessionResult<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: StorefrontConfig) -> StorefrontBuilder {
        StorefrontBuilder::new(config)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    // =========================================================================
    // Store Access (selectors + subscriptions)
    // =========================================================================

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn modal(&self) -> &ModalStore {
        &self.modal
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    /// Next id for an order or toast.
    pub(crate) fn next_id(&self) -> i64 {
        self.ids.next(self.clock.now_millis())
    }

    // =========================================================================
    // Cart Intents
    // =========================================================================

    /// Adds one unit. An existing line keeps its fields and gains 1.
    pub fn add_to_cart(&self, item: CartItem) {
        debug!(product_id = %item.id, "Add to cart");
        self.cart.dispatch(CartAction::Add(item));
    }

    /// Catalog button: add one unit and confirm with a success toast.
    pub fn add_product_to_cart(&self, product: &Product) -> ToastId {
        self.add_to_cart(CartItem::from_product(product));
        self.add_toast(
            NewToast::success(format!("{} added to cart", product.title))
                .duration_ms(self.config.toast.added_to_cart_duration_ms),
        )
    }

    /// Sets the quantity of an existing line. 0 removes it.
    pub fn update_quantity(&self, id: ProductId, quantity: u32) {
        debug!(product_id = %id, quantity, "Update quantity");
        self.cart.dispatch(CartAction::UpdateQuantity { id, quantity });
    }

    /// Cart "+" button.
    pub fn increment_item(&self, id: ProductId) {
        let mut cart = self.cart.lock();
        if let Some(item) = cart.get(id).cloned() {
            cart.dispatch(CartAction::Add(item));
        }
    }

    /// Cart "−" button: quantity 1 removes the line instead of reaching 0.
    pub fn decrement_item(&self, id: ProductId) {
        let mut cart = self.cart.lock();
        match cart.get(id).map(|item| item.quantity) {
            Some(1) => cart.dispatch(CartAction::Remove(id)),
            Some(quantity) => cart.dispatch(CartAction::UpdateQuantity {
                id,
                quantity: quantity - 1,
            }),
            None => {}
        }
    }

    pub fn remove_from_cart(&self, id: ProductId) {
        debug!(product_id = %id, "Remove from cart");
        self.cart.dispatch(CartAction::Remove(id));
    }

    pub fn clear_cart(&self) {
        self.cart.dispatch(CartAction::Clear);
    }

    pub fn cart_total(&self) -> Money {
        self.cart.select(Cart::total)
    }

    /// Navbar badge: units across all lines.
    pub fn cart_quantity(&self) -> u32 {
        self.cart.select(Cart::total_quantity)
    }

    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.cart.select(|c| c.contains(id))
    }

    // =========================================================================
    // Modal Intents
    // =========================================================================

    pub fn open_cart(&self) {
        self.modal.dispatch(ModalAction::OpenCart);
    }

    pub fn close_cart(&self) {
        self.modal.dispatch(ModalAction::CloseCart);
    }

    pub fn open_product_detail(&self, product: Product) {
        debug!(product_id = %product.id, "Open product detail");
        self.modal.dispatch(ModalAction::OpenProductDetail(product));
    }

    pub fn close_product_detail(&self) {
        self.modal.dispatch(ModalAction::CloseProductDetail);
    }

    /// Closes both panels as two separate dispatches.
    pub fn close_all(&self) {
        for action in ModalAction::close_all() {
            self.modal.dispatch(action);
        }
    }

    // =========================================================================
    // Order Intents
    // =========================================================================

    /// Appends an order placed elsewhere; checkout is the usual path.
    pub fn add_order(&self, order: Order) {
        self.ids.observe(order.id.0);
        self.orders.dispatch(OrderAction::Add(order));
    }

    pub fn order(&self, index: usize) -> Option<Order> {
        self.orders.select(|h| h.get(index).cloned())
    }

    /// Order-detail page lookup. Bad or out-of-range segments are `None`.
    pub fn order_by_path(&self, segment: &str) -> Option<Order> {
        self.orders.select(|h| h.get_by_path(segment).cloned())
    }

    pub fn order_count(&self) -> usize {
        self.orders.select(OrderHistory::len)
    }

    // =========================================================================
    // Toast Intents
    // =========================================================================

    /// Queues a toast and starts its expiry timer.
    pub fn add_toast(&self, request: NewToast) -> ToastId {
        let toast = request.into_toast(ToastId(self.next_id()));
        let id = toast.id;
        debug!(toast_id = %id, kind = %toast.kind, "Add toast");

        self.toasts.dispatch(ToastAction::Add(toast.clone()));
        self.scheduler.schedule_expiry(&toast);
        id
    }

    /// Queues a toast with the configured default duration.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        self.add_toast(
            NewToast::new(message)
                .kind(kind)
                .duration_ms(self.config.toast.default_duration_ms),
        )
    }

    /// Drops a toast immediately, with no exit animation.
    pub fn remove_toast(&self, id: ToastId) {
        self.scheduler.cancel(id);
        self.toasts.dispatch(ToastAction::Remove(id));
    }

    /// Close button: fade now, remove after the exit animation.
    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        self.scheduler.dismiss(id)
    }

    pub fn toast_phase(&self, id: ToastId) -> ToastPhase {
        self.toasts.select(|q| q.phase(id))
    }

    // =========================================================================
    // User
    // =========================================================================

    pub fn set_user(&self, user: User) {
        info!(email = %user.email, "User signed in");
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn logout(&self) {
        if let Some(user) = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            info!(email = %user.email, "User signed out");
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Cart lines and orders as they are now.
    pub fn snapshot(&self) -> SessionSnapshot {
        let cart = self.cart.lock();
        let orders = self.orders.lock();
        SessionSnapshot {
            session_id: self.session_id,
            cart_items: cart.items().to_vec(),
            orders: orders.orders().to_vec(),
        }
    }

    /// Replaces cart and orders with a validated snapshot.
    ///
    /// Toasts and modal flags are left alone.
    pub fn restore(&self, snapshot: SessionSnapshot) -> SessionResult<()> {
        snapshot.validate()?;

        if let Some(max_id) = snapshot.max_order_id() {
            self.ids.observe(max_id.0);
        }

        let mut cart = self.cart.lock();
        let mut orders = self.orders.lock();
        info!(
            from_session = %snapshot.session_id,
            cart_items = snapshot.cart_items.len(),
            orders = snapshot.orders.len(),
            "Restoring session"
        );
        cart.replace(Cart::from_items(snapshot.cart_items));
        orders.replace(OrderHistory::from_orders(snapshot.orders));

        let publications = [cart.release(), orders.release()];
        for publication in publications {
            publication.publish();
        }
        Ok(())
    }

    pub fn save_snapshot(&self, path: &Path) -> SessionResult<()> {
        self.snapshot().save(path)
    }

    /// Restores from `path`. Returns `false` if there was no file.
    pub fn load_snapshot(&self, path: &Path) -> SessionResult<bool> {
        match SessionSnapshot::load(path)? {
            Some(snapshot) => {
                self.restore(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Saves to the configured snapshot path. No-op when persistence is off.
    pub fn persist(&self) -> SessionResult<()> {
        match self.config.snapshot_path() {
            Some(path) => self.save_snapshot(&path),
            None => Ok(()),
        }
    }

    /// Restores from the configured snapshot path, if any.
    pub fn resume(&self) -> SessionResult<bool> {
        match self.config.snapshot_path() {
            Some(path) => self.load_snapshot(&path),
            None => Ok(false),
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Aborts every pending toast timer.
    pub fn shutdown(&self) {
        info!(session_id = %self.session_id, "Shutting down storefront session");
        self.scheduler.cancel_all();
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("session_id", &self.session_id)
            .field("cart_items", &self.cart.select(Cart::item_count))
            .field("orders", &self.order_count())
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Wires a [`Storefront`] with custom collaborators.
///
/// ## Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use storefront_session::{Storefront, StorefrontConfig, TracingNavigator};
///
/// # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let storefront = Storefront::builder(StorefrontConfig::default())
///     .navigator(Arc::new(TracingNavigator))
///     .build()?;
/// # Ok(()) }
/// ```
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    clock: Option<Arc<dyn Clock>>,
    navigator: Option<Arc<dyn Navigator>>,
    runtime: Option<Handle>,
    session_id: Option<Uuid>,
}

impl StorefrontBuilder {
    pub fn new(config: StorefrontConfig) -> Self {
        StorefrontBuilder {
            config,
            clock: None,
            navigator: None,
            runtime: None,
            session_id: None,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Runtime for toast timers. Defaults to the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn build(self) -> SessionResult<Storefront> {
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current()?,
        };

        let session_id = self.session_id.unwrap_or_else(Uuid::new_v4);
        let toasts = Arc::new(Store::new("toasts", ToastQueue::new()));
        let scheduler = ToastScheduler::new(Arc::clone(&toasts), runtime);

        info!(%session_id, "Storefront session started");

        Ok(Storefront {
            session_id,
            config: self.config,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            ids: IdSource::new(),
            cart: Store::new("cart", Cart::new()),
            modal: Store::new("modal", ModalState::new()),
            orders: Store::new("orders", OrderHistory::new()),
            toasts,
            scheduler,
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoOpNavigator)),
            user: RwLock::new(None),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
