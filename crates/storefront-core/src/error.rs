//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Parsing failures at the UI edge                 │
//! │  └── ValidationError  - Restored data breaking an invariant             │
//! │                         (surfaces as SessionError::CorruptSnapshot)     │
//! │                                                                         │
//! │  storefront-session errors (separate crate)                             │
//! │  └── SessionError     - Config, snapshot files, runtime                 │
//! │                                                                         │
//! │  Store actions never fail. A bad id is a no-op, a bad order path is a   │
//! │  "not found" view; these errors only exist where text or saved data     │
//! │  enters the system.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    /// Toast type outside success/error/warning/info.
    #[error("Unknown toast type: '{0}'. Valid options: success, error, warning, info")]
    InvalidToastKind(String),

    /// Order-detail path segment that is not a list position.
    #[error("Invalid order path segment: '{0}'")]
    InvalidOrderPath(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Restored or externally supplied data that breaks a state invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A price below zero.
    #[error("{field} must not be negative, got {cents} cents")]
    NegativePrice { field: String, cents: i64 },

    /// A cart or order line with quantity 0.
    #[error("{field} must be at least 1")]
    ZeroQuantity { field: String },

    /// Two entries share a key that must be unique.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// An order whose stored total disagrees with its lines.
    #[error("order {order_id} total is {stored} cents but its items add up to {computed}")]
    TotalMismatch {
        order_id: String,
        stored: i64,
        computed: i64,
    },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidOrderPath("abc".to_string());
        assert_eq!(err.to_string(), "Invalid order path segment: 'abc'");

        let err = ValidationError::ZeroQuantity {
            field: "cartItems[0].quantity".to_string(),
        };
        assert_eq!(err.to_string(), "cartItems[0].quantity must be at least 1");
    }
}
