//! # Storefront Configuration
//!
//! Tunables of the session: toast copy and durations, routes, persistence.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CHECKOUT_TOAST_MS=5000                                  │
//! │     STOREFRONT_PERSIST=true                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [toast]
//! checkout_message = "Order placed successfully!"
//! checkout_duration_ms = 3000
//! added_to_cart_duration_ms = 2000
//! default_duration_ms = 3000
//!
//! [routes]
//! order_detail_prefix = "/home/my-orders"
//!
//! [persistence]
//! enabled = false
//! path = "/var/lib/storefront/session.json"  # optional
//! ```
//!
//! The 300 ms toast exit animation is fixed and not configurable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storefront_core::toast::DEFAULT_TOAST_DURATION_MS;
use storefront_core::{ADDED_TO_CART_TOAST_MS, ORDER_PLACED_MESSAGE, ORDER_PLACED_TOAST_MS};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::navigation::order_detail_path;

const CONFIG_FILE: &str = "storefront.toml";
const SNAPSHOT_FILE: &str = "session.json";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "storefront", "storefront")
}

// =============================================================================
// Toast Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastSettings {
    /// Message of the toast shown after checkout.
    #[serde(default = "default_checkout_message")]
    pub checkout_message: String,

    #[serde(default = "default_checkout_duration")]
    pub checkout_duration_ms: u64,

    /// Lifetime of the "`{title}` added to cart" toast.
    #[serde(default = "default_added_to_cart_duration")]
    pub added_to_cart_duration_ms: u64,

    /// Lifetime of toasts raised without an explicit duration.
    #[serde(default = "default_toast_duration")]
    pub default_duration_ms: u64,
}

fn default_checkout_message() -> String {
    ORDER_PLACED_MESSAGE.to_string()
}

fn default_checkout_duration() -> u64 {
    ORDER_PLACED_TOAST_MS
}

fn default_added_to_cart_duration() -> u64 {
    ADDED_TO_CART_TOAST_MS
}

fn default_toast_duration() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

impl Default for ToastSettings {
    fn default() -> Self {
        ToastSettings {
            checkout_message: default_checkout_message(),
            checkout_duration_ms: default_checkout_duration(),
            added_to_cart_duration_ms: default_added_to_cart_duration(),
            default_duration_ms: default_toast_duration(),
        }
    }
}

// =============================================================================
// Route Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Order-detail views live at `{prefix}/{index}`.
    #[serde(default = "default_order_detail_prefix")]
    pub order_detail_prefix: String,
}

fn default_order_detail_prefix() -> String {
    "/home/my-orders".to_string()
}

impl Default for RouteSettings {
    fn default() -> Self {
        RouteSettings {
            order_detail_prefix: default_order_detail_prefix(),
        }
    }
}

impl RouteSettings {
    /// Route of the order at `index` in the history.
    pub fn order_detail(&self, index: usize) -> String {
        order_detail_path(&self.order_detail_prefix, index)
    }
}

// =============================================================================
// Persistence Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceSettings {
    /// Save cart and orders between runs.
    #[serde(default)]
    pub enabled: bool,

    /// Snapshot file. Defaults to `session.json` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PersistenceSettings {
    /// Where the snapshot lives, if persistence is on and a path resolves.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        self.path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE)))
    }
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub toast: ToastSettings,

    #[serde(default)]
    pub routes: RouteSettings,

    #[serde(default)]
    pub persistence: PersistenceSettings,
}

impl StorefrontConfig {
    /// Defaults, then the TOML file, then `STOREFRONT_*` variables, then validation.
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    pub fn validate(&self) -> SessionResult<()> {
        if self.toast.checkout_message.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "toast.checkout_message must not be empty".into(),
            ));
        }

        for (name, value) in [
            ("toast.checkout_duration_ms", self.toast.checkout_duration_ms),
            ("toast.added_to_cart_duration_ms", self.toast.added_to_cart_duration_ms),
            ("toast.default_duration_ms", self.toast.default_duration_ms),
        ] {
            if value == 0 {
                return Err(SessionError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        if !self.routes.order_detail_prefix.starts_with('/') {
            return Err(SessionError::InvalidConfig(format!(
                "routes.order_detail_prefix must start with '/', got: {}",
                self.routes.order_detail_prefix
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(message) = std::env::var("STOREFRONT_CHECKOUT_MESSAGE") {
            self.toast.checkout_message = message;
        }

        if let Ok(ms) = std::env::var("STOREFRONT_CHECKOUT_TOAST_MS") {
            match ms.parse::<u64>() {
                Ok(v) => {
                    debug!(ms = v, "Overriding checkout toast duration from environment");
                    self.toast.checkout_duration_ms = v;
                }
                Err(_) => warn!(value = %ms, "Ignoring invalid STOREFRONT_CHECKOUT_TOAST_MS"),
            }
        }

        if let Ok(ms) = std::env::var("STOREFRONT_ADDED_TO_CART_TOAST_MS") {
            match ms.parse::<u64>() {
                Ok(v) => self.toast.added_to_cart_duration_ms = v,
                Err(_) => warn!(value = %ms, "Ignoring invalid STOREFRONT_ADDED_TO_CART_TOAST_MS"),
            }
        }

        if let Ok(prefix) = std::env::var("STOREFRONT_ORDER_ROUTE_PREFIX") {
            debug!(prefix = %prefix, "Overriding order route prefix from environment");
            self.routes.order_detail_prefix = prefix;
        }

        if let Ok(flag) = std::env::var("STOREFRONT_PERSIST") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.persistence.enabled = true,
                "0" | "false" | "no" | "off" => self.persistence.enabled = false,
                _ => warn!(value = %flag, "Unknown STOREFRONT_PERSIST value"),
            }
        }

        if let Ok(path) = std::env::var("STOREFRONT_SESSION_PATH") {
            self.persistence.path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.persistence.snapshot_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.toast.checkout_message, "Order placed successfully!");
        assert_eq!(config.toast.checkout_duration_ms, 3000);
        assert_eq!(config.toast.added_to_cart_duration_ms, 2000);
        assert_eq!(config.toast.default_duration_ms, 3000);
        assert_eq!(config.routes.order_detail_prefix, "/home/my-orders");
        assert!(!config.persistence.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [toast]
            checkout_duration_ms = 5000

            [persistence]
            enabled = true
            path = "/tmp/storefront-session.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.toast.checkout_duration_ms, 5000);
        assert_eq!(config.toast.added_to_cart_duration_ms, 2000);
        assert_eq!(config.routes.order_detail_prefix, "/home/my-orders");
        assert_eq!(
            config.snapshot_path(),
            Some(PathBuf::from("/tmp/storefront-session.json"))
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.toast.checkout_duration_ms = 0;
        assert!(matches!(config.validate(), Err(SessionError::InvalidConfig(_))));

        config.toast.checkout_duration_ms = 3000;
        config.routes.order_detail_prefix = "orders".into();
        assert!(config.validate().is_err());

        config.routes.order_detail_prefix = "/orders".into();
        config.toast.checkout_message = "  ".into();
        assert!(config.validate().is_err());

        config.toast.checkout_message = "Thanks!".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_disabled_persistence_has_no_path() {
        let settings = PersistenceSettings {
            enabled: false,
            path: Some(PathBuf::from("/tmp/ignored.json")),
        };
        assert_eq!(settings.snapshot_path(), None);
    }

    #[test]
    fn test_order_detail_route() {
        let routes = RouteSettings::default();
        assert_eq!(routes.order_detail(4), "/home/my-orders/4");
    }

    #[test]
    fn test_save_then_load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-{}.toml",
            uuid::Uuid::new_v4()
        ));

        let mut config = StorefrontConfig::default();
        config.routes.order_detail_prefix = "/account/orders".into();
        config.save(Some(path.clone())).unwrap();

        let loaded = StorefrontConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.routes.order_detail_prefix, "/account/orders");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let path = std::env::temp_dir().join(format!(
            "storefront-bad-{}.toml",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "[toast\nbroken").unwrap();

        let err = StorefrontConfig::load(Some(path.clone())).unwrap_err();
        assert!(matches!(err, SessionError::ConfigLoadFailed(_)));

        std::fs::remove_file(path).ok();
    }
}
