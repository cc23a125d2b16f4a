//! # Identifiers & Clock
//!
//! Orders and toasts are keyed by their creation time in milliseconds. The UI
//! shows the tail of an order id (`Order #123456`) and uses toast ids as list
//! keys, so the timestamp meaning is kept.
//!
//! ## Same-Millisecond Collisions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wall clock only:                                                       │
//! │    add_toast("a") at t=1700000000123 → id 1700000000123                 │
//! │    add_toast("b") at t=1700000000123 → id 1700000000123  ❌ DUPLICATE   │
//! │                                                                         │
//! │  IdSource (max(now, last + 1)):                                         │
//! │    add_toast("a") at t=1700000000123 → id 1700000000123                 │
//! │    add_toast("b") at t=1700000000123 → id 1700000000124  ✅             │
//! │                                                                         │
//! │  Ids stay close to creation time and are strictly increasing.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format of the human-readable order date, e.g. `10/18/2026, 3:04:05 PM`.
pub const ORDER_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for ids and order dates.
///
/// The session uses [`SystemClock`]; tests pin time with [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;

    /// Current time as Unix milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    /// Freezes the clock at the given Unix milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        let at = Local
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::default().with_timezone(&Local));
        FixedClock(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Formats a timestamp the way order pages display it.
pub fn format_order_date(at: &DateTime<Local>) -> String {
    at.format(ORDER_DATE_FORMAT).to_string()
}

// =============================================================================
// Id Source
// =============================================================================

/// Hands out strictly increasing millisecond ids.
///
/// One instance is shared by every store in a session so an order and a
/// toast created in the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdSource {
    last: AtomicI64,
}

impl IdSource {
    /// Creates a source with no ids issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that will never issue an id at or below `last`.
    ///
    /// Used after restoring a snapshot so new orders sort after old ones.
    pub fn starting_after(last: i64) -> Self {
        IdSource {
            last: AtomicI64::new(last),
        }
    }

    /// Returns `max(now_millis, last + 1)` and records it.
    pub fn next(&self, now_millis: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Raises the floor so future ids exceed `id`.
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::AcqRel);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
