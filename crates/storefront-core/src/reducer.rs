//! # Reducer Trait
//!
//! Every store in the session is a plain value plus a transition function.
//!
//! ```text
//! ┌──────────────┐   action   ┌──────────────┐
//! │  state (n)   │ ─────────► │ state (n+1)  │
//! └──────────────┘  reduce()  └──────────────┘
//! ```
//!
//! Reducers are pure: no clock reads, no timers, no I/O. Anything that needs
//! the outside world (ids, dates, expiry) is resolved before the action is
//! built, so replaying the same actions always yields the same state.

/// A state container with an explicit `(state, action) -> state` transition.
pub trait Reducer: Clone + Default + Send + Sync + 'static {
    /// The intents this state accepts.
    type Action: std::fmt::Debug;

    /// Applies one action and returns the next state.
    fn reduce(self, action: Self::Action) -> Self;
}
