//! # Session Error Types
//!
//! Errors at the I/O edges of the session: config files, snapshot files and
//! the async runtime. Store operations themselves never fail.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Snapshot     │  │       Runtime           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Io             │  │  NoRuntime              │ │
//! │  │  ConfigLoad...  │  │  Serialization  │  │  (toast timers need     │ │
//! │  │  ConfigSave...  │  │  CorruptSnapshot│  │   a tokio runtime)      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values that fail validation.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Snapshot Errors
    // =========================================================================
    /// File system failure while reading or writing.
    #[error("I/O error: {0}")]
    Io(String),

    /// Snapshot JSON could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Snapshot decoded but breaks a state invariant.
    #[error("Snapshot rejected: {0}")]
    CorruptSnapshot(#[from] ValidationError),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// Built outside a tokio runtime without an explicit handle.
    #[error("No tokio runtime available for toast timers")]
    NoRuntime,
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(e: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(e.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(e: toml::ser::Error) -> Self {
        SessionError::ConfigSaveFailed(e.to_string())
    }
}

impl From<tokio::runtime::TryCurrentError> for SessionError {
    fn from(_: tokio::runtime::TryCurrentError) -> Self {
        SessionError::NoRuntime
    }
}
