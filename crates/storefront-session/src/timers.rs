//! # Toast Timers
//!
//! Drives each toast through its lifecycle on the tokio runtime.
//!
//! ## Toast Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Toast Lifecycle                                   │
//! │                                                                         │
//! │   Add ──► Visible ──(duration)──► FadingOut ──(300 ms)──► Removed       │
//! │              │                        ▲                                 │
//! │              └──── dismiss() ─────────┘                                 │
//! │                    (expiry timer aborted, removal in 300 ms)            │
//! │                                                                         │
//! │  One task per toast, keyed by id:                                      │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ timers: HashMap<ToastId, Timer { generation, handle }>           │  │
//! │  │   expiry task:  sleep_until(fade_at) → BeginFade                 │  │
//! │  │                 sleep_until(remove_at) → Remove                  │  │
//! │  │   removal task: sleep_until(remove_at) → Remove                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  cancel(id) / cancel_all() abort pending tasks. A cancelled toast      │
//! │  stays in the queue in whatever phase it reached.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Deadlines
//! Both deadlines are fixed when the timer is scheduled, so a slow wake-up
//! of the fade step never pushes the removal back. Removal lands one tick
//! inside the exit window: a reader that waits `duration + 300 ms` from
//! the moment the toast was queued always finds it gone.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use storefront_core::toast::EXIT_ANIMATION;
use storefront_core::{Toast, ToastAction, ToastId, ToastPhase};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::state::ToastStore;

/// How far inside the exit window the removal lands (one timer tick).
const REMOVAL_LEAD: Duration = Duration::from_millis(1);

/// A pending task and the generation it was spawned under.
struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

type TimerMap = Arc<Mutex<HashMap<ToastId, Timer>>>;

/// Owns the pending timer of every live toast.
///
/// Dropping the scheduler aborts all of them.
pub struct ToastScheduler {
    toasts: Arc<ToastStore>,
    runtime: Handle,
    timers: TimerMap,
    next_generation: AtomicU64,
}

impl ToastScheduler {
    pub fn new(toasts: Arc<ToastStore>, runtime: Handle) -> Self {
        ToastScheduler {
            toasts,
            runtime,
            timers: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Starts the expiry timer of a freshly queued toast.
    ///
    /// Fades it after its duration, removes it by the end of the exit
    /// animation. Both deadlines count from this call.
    pub fn schedule_expiry(&self, toast: &Toast) {
        let id = toast.id;
        let fade_at = Instant::now() + toast.duration();
        let remove_at = removal_deadline(fade_at);
        let toasts = Arc::clone(&self.toasts);

        self.spawn(id, async move {
            sleep_until(fade_at).await;
            debug!(toast_id = %id, "Toast expired, fading out");
            toasts.dispatch(ToastAction::BeginFade(id));
            sleep_until(remove_at).await;
            toasts.dispatch(ToastAction::Remove(id));
        });
    }

    /// Manual close: fade now, remove after the exit animation.
    ///
    /// Returns `false` (and does nothing) unless the toast is `Visible`.
    /// Other toasts keep their deadlines.
    pub fn dismiss(&self, id: ToastId) -> bool {
        {
            let mut queue = self.toasts.lock();
            if queue.phase(id) != ToastPhase::Visible {
                return false;
            }
            queue.dispatch(ToastAction::BeginFade(id));
        }

        self.remove_at(id, removal_deadline(Instant::now()));
        true
    }

    /// Aborts the pending timer of one toast. Returns whether one existed.
    pub fn cancel(&self, id: ToastId) -> bool {
        match self.timers().remove(&id) {
            Some(timer) => {
                timer.handle.abort();
                debug!(toast_id = %id, "Toast timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Aborts every pending timer.
    pub fn cancel_all(&self) {
        let mut timers = self.timers();
        let count = timers.len();
        for (_, timer) in timers.drain() {
            timer.handle.abort();
        }
        if count > 0 {
            debug!(count, "Toast timers cancelled");
        }
    }

    /// Number of toasts with a timer still pending.
    pub fn pending(&self) -> usize {
        self.timers().len()
    }

    /// Whether `id` has a timer still pending.
    pub fn is_pending(&self, id: ToastId) -> bool {
        self.timers().contains_key(&id)
    }

    /// Removes the toast at `deadline`, replacing any pending timer.
    fn remove_at(&self, id: ToastId, deadline: Instant) {
        let toasts = Arc::clone(&self.toasts);
        self.spawn(id, async move {
            sleep_until(deadline).await;
            toasts.dispatch(ToastAction::Remove(id));
        });
    }

    fn spawn<F>(&self, id: ToastId, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timers = Arc::clone(&self.timers);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        // Held across spawn + insert so a task that finishes immediately
        // cannot clear its entry before it exists.
        let mut map = self.timers();
        let handle = self.runtime.spawn(async move {
            work.await;
            let mut map = lock_timers(&timers);
            // A newer timer for the same toast owns the entry now.
            if matches!(map.get(&id), Some(timer) if timer.generation == generation) {
                map.remove(&id);
            }
        });
        if let Some(previous) = map.insert(id, Timer { generation, handle }) {
            previous.handle.abort();
        }
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<ToastId, Timer>> {
        lock_timers(&self.timers)
    }
}

fn removal_deadline(fade_at: Instant) -> Instant {
    fade_at + EXIT_ANIMATION - REMOVAL_LEAD
}

fn lock_timers(timers: &TimerMap) -> MutexGuard<'_, HashMap<ToastId, Timer>> {
    timers.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for ToastScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for ToastScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{NewToast, ToastQueue};
    use tokio::time::sleep;
    use crate::state::Store;

    fn setup() -> (Arc<ToastStore>, ToastScheduler) {
        let store = Arc::new(Store::new("toasts", ToastQueue::new()));
        let scheduler = ToastScheduler::new(Arc::clone(&store), Handle::current());
        (store, scheduler)
    }

    fn queue(store: &ToastStore, id: i64, duration_ms: u64) -> Toast {
        let toast = NewToast::new(format!("toast {}", id))
            .duration_ms(duration_ms)
            .into_toast(ToastId(id));
        store.dispatch(ToastAction::Add(toast.clone()));
        toast
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_fades_then_removes() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 1000);
        scheduler.schedule_expiry(&toast);

        sleep(Duration::from_millis(999)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Visible);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::FadingOut);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_skips_remaining_duration() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 5000);
        scheduler.schedule_expiry(&toast);

        sleep(Duration::from_millis(100)).await;
        assert!(scheduler.dismiss(ToastId(1)));
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::FadingOut);

        sleep(Duration::from_millis(301)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_while_fading_is_noop() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 100);
        scheduler.schedule_expiry(&toast);

        sleep(Duration::from_millis(150)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::FadingOut);
        assert!(!scheduler.dismiss(ToastId(1)));

        // The pending removal still lands within 300 ms of the fade.
        sleep(Duration::from_millis(251)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_unknown_toast_is_noop() {
        let (_store, scheduler) = setup();
        assert!(!scheduler.dismiss(ToastId(42)));
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_leaves_toast_in_place() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 1000);
        scheduler.schedule_expiry(&toast);

        assert!(scheduler.cancel(ToastId(1)));
        assert!(!scheduler.is_pending(ToastId(1)));

        sleep(Duration::from_millis(5000)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timers() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 1000);
        scheduler.schedule_expiry(&toast);
        drop(scheduler);

        sleep(Duration::from_millis(2000)).await;
        assert_eq!(store.select(|q| q.len()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_timers() {
        let (store, scheduler) = setup();
        let short = queue(&store, 1, 1000);
        let long = queue(&store, 2, 3000);
        scheduler.schedule_expiry(&short);
        scheduler.schedule_expiry(&long);
        assert_eq!(scheduler.pending(), 2);

        sleep(Duration::from_millis(1400)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::Visible);
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_done_exactly_at_duration_plus_exit() {
        let (store, scheduler) = setup();
        let toast = queue(&store, 1, 100);
        scheduler.schedule_expiry(&toast);

        sleep(Duration::from_millis(400)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_leaves_other_deadlines_alone() {
        let (store, scheduler) = setup();
        let start = Instant::now();
        let a = queue(&store, 1, 1000);
        let b = queue(&store, 2, 2000);
        scheduler.schedule_expiry(&a);
        scheduler.schedule_expiry(&b);

        sleep_until(start + Duration::from_millis(200)).await;
        assert!(scheduler.dismiss(ToastId(1)));
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::Visible);

        // A is gone 300 ms after the dismissal.
        sleep_until(start + Duration::from_millis(498)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::FadingOut);
        sleep_until(start + Duration::from_millis(500)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Removed);

        // B still fades at 2000 ms and is gone by 2300 ms.
        sleep_until(start + Duration::from_millis(1999)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::Visible);
        sleep_until(start + Duration::from_millis(2001)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::FadingOut);
        sleep_until(start + Duration::from_millis(2298)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::FadingOut);
        sleep_until(start + Duration::from_millis(2300)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(2))), ToastPhase::Removed);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_task_keeps_replacement_timer() {
        let (store, scheduler) = setup();
        let scheduler = Arc::new(scheduler);
        queue(&store, 1, 5000);

        // The first task schedules a replacement before its own cleanup runs.
        let replacer = Arc::clone(&scheduler);
        scheduler.spawn(ToastId(1), async move {
            let deadline = Instant::now() + Duration::from_millis(500);
            replacer.remove_at(ToastId(1), deadline);
        });

        sleep(Duration::from_millis(10)).await;
        assert!(scheduler.is_pending(ToastId(1)));
        assert_eq!(store.select(|q| q.len()), 1);

        assert!(scheduler.cancel(ToastId(1)));
        sleep(Duration::from_millis(1000)).await;
        assert_eq!(store.select(|q| q.phase(ToastId(1))), ToastPhase::Visible);
    }
}
