//! # Toast Queue
//!
//! Short-lived notifications and their lifecycle state.
//!
//! ## Toast Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Toast State Machine                                  │
//! │                                                                         │
//! │   Add                 duration elapsed                 300 ms           │
//! │  ─────► ┌─────────┐   or manual dismiss   ┌───────────┐  exit   ┌───────┐
//! │         │ Visible │ ────────────────────► │ FadingOut │ ──────► │Removed│
//! │         └─────────┘      BeginFade        └───────────┘ Remove  └───────┘
//! │                                                                         │
//! │  • Removed is "absent from the queue"; phase() reports it for any id    │
//! │    that is not (or no longer) queued                                    │
//! │  • BeginFade on a FadingOut toast and Remove on a removed toast are     │
//! │    no-ops, so a timer and a click racing each other are harmless        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The queue only records state. The session crate owns the timers that
//! dispatch `BeginFade` and `Remove`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use ts_rs::TS;

use crate::error::CoreError;
use crate::reducer::Reducer;

/// How long a toast stays visible when the caller does not say.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Exit animation window between `FadingOut` and removal.
pub const EXIT_ANIMATION_MS: u64 = 300;

/// [`EXIT_ANIMATION_MS`] as a `Duration`.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(EXIT_ANIMATION_MS);

// =============================================================================
// Toast Kind
// =============================================================================

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Warning => write!(f, "warning"),
            ToastKind::Info => write!(f, "info"),
        }
    }
}

impl FromStr for ToastKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(ToastKind::Success),
            "error" => Ok(ToastKind::Error),
            "warning" => Ok(ToastKind::Warning),
            "info" => Ok(ToastKind::Info),
            other => Err(CoreError::InvalidToastKind(other.to_string())),
        }
    }
}

// =============================================================================
// Toast Phase
// =============================================================================

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    /// On screen, expiry timer running.
    Visible,
    /// Exit animation playing; removal is scheduled.
    FadingOut,
    /// Gone from the queue.
    Removed,
}

// =============================================================================
// Toast
// =============================================================================

/// Key of a toast: its creation time in milliseconds, unique per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToastId(pub i64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to show a toast, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewToast {
    pub message: String,

    #[serde(rename = "type", default)]
    pub kind: ToastKind,

    /// Visible lifetime in milliseconds.
    #[serde(rename = "duration", default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

impl NewToast {
    /// An `info` toast with the default duration.
    pub fn new(message: impl Into<String>) -> Self {
        NewToast {
            message: message.into(),
            kind: ToastKind::default(),
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).kind(ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).kind(ToastKind::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).kind(ToastKind::Warning)
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Attaches an id, producing a visible toast.
    pub fn into_toast(self, id: ToastId) -> Toast {
        Toast {
            id,
            message: self.message,
            kind: self.kind,
            duration_ms: self.duration_ms,
            phase: ToastPhase::Visible,
        }
    }
}

/// A queued toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub phase: ToastPhase,
}

impl Toast {
    /// Visible lifetime before the exit animation starts.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// =============================================================================
// Toast Action
// =============================================================================

/// Intents accepted by [`ToastQueue`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
    /// Append a toast. An id already queued is ignored.
    Add(Toast),
    /// `Visible → FadingOut`.
    BeginFade(ToastId),
    /// `FadingOut | Visible → Removed`.
    Remove(ToastId),
}

// =============================================================================
// Toast Queue
// =============================================================================

/// Queued toasts in insertion (display) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Lifecycle phase; `Removed` for ids not in the queue.
    pub fn phase(&self, id: ToastId) -> ToastPhase {
        self.get(id).map_or(ToastPhase::Removed, |t| t.phase)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Reducer for ToastQueue {
    type Action = ToastAction;

    fn reduce(mut self, action: ToastAction) -> Self {
        match action {
            ToastAction::Add(toast) => {
                if self.get(toast.id).is_none() {
                    self.toasts.push(toast);
                }
            }
            ToastAction::BeginFade(id) => {
                if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
                    toast.phase = ToastPhase::FadingOut;
                }
            }
            ToastAction::Remove(id) => self.toasts.retain(|t| t.id != id),
        }
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with(ids: &[i64]) -> ToastQueue {
        ids.iter().fold(ToastQueue::new(), |q, &id| {
            q.reduce(ToastAction::Add(
                NewToast::success(format!("toast {}", id)).into_toast(ToastId(id)),
            ))
        })
    }

    #[test]
    fn test_new_toast_defaults() {
        let toast = NewToast::new("Hello");
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.duration_ms, 3000);
    }

    #[test]
    fn test_add_is_visible_in_order() {
        let queue = queue_with(&[1, 2, 3]);
        let ids: Vec<i64> = queue.toasts().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(queue.phase(ToastId(2)), ToastPhase::Visible);
    }

    #[test]
    fn test_duplicate_id_ignored() {
        let queue = queue_with(&[1]).reduce(ToastAction::Add(
            NewToast::error("other").into_toast(ToastId(1)),
        ));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(ToastId(1)).unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_full_lifecycle() {
        let queue = queue_with(&[1]).reduce(ToastAction::BeginFade(ToastId(1)));
        assert_eq!(queue.phase(ToastId(1)), ToastPhase::FadingOut);

        let queue = queue.reduce(ToastAction::Remove(ToastId(1)));
        assert_eq!(queue.phase(ToastId(1)), ToastPhase::Removed);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_double_remove_is_noop() {
        let queue = queue_with(&[1, 2])
            .reduce(ToastAction::Remove(ToastId(1)))
            .reduce(ToastAction::Remove(ToastId(1)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.phase(ToastId(2)), ToastPhase::Visible);
    }

    #[test]
    fn test_fade_only_touches_target() {
        let queue = queue_with(&[1, 2]).reduce(ToastAction::BeginFade(ToastId(2)));
        assert_eq!(queue.phase(ToastId(1)), ToastPhase::Visible);
        assert_eq!(queue.phase(ToastId(2)), ToastPhase::FadingOut);
    }

    #[test]
    fn test_fade_after_remove_does_not_resurrect() {
        let queue = queue_with(&[1])
            .reduce(ToastAction::Remove(ToastId(1)))
            .reduce(ToastAction::BeginFade(ToastId(1)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("Success".parse::<ToastKind>().unwrap(), ToastKind::Success);
        assert_eq!(ToastKind::Warning.to_string(), "warning");
        assert!(matches!(
            "loud".parse::<ToastKind>(),
            Err(CoreError::InvalidToastKind(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let toast = NewToast::success("m").duration_ms(100).into_toast(ToastId(5));
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["type"], "success");
        assert_eq!(json["duration"], 100);
        assert_eq!(json["phase"], "visible");
    }

    #[test]
    fn test_new_toast_decodes_with_defaults() {
        let toast: NewToast = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.duration_ms, DEFAULT_TOAST_DURATION_MS);
    }
}
