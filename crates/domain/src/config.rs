//! Configuration structures
//!
//! Loaded by `localstore-infra::config` from the environment or a config
//! file; consumed by the application shell when wiring the client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_KEYCHAIN_SERVICE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WAKE_UP_DELAY_MS,
};
use crate::impl_domain_status_conversions;

/// Build mode the client runs in.
///
/// `Development` talks to the local backend and never arms the cold-start
/// timer; anything else is treated as a deployed backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl_domain_status_conversions!(BuildMode {
    Development => "development",
    Production => "production",
});

impl BuildMode {
    /// Whether the backend is a deployed (possibly sleeping) instance.
    #[must_use]
    pub fn is_deployed(self) -> bool {
        !matches!(self, Self::Development)
    }
}

/// Where session tokens are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// Process memory only; tokens vanish on exit.
    Memory,
    /// Platform keychain (macOS Keychain, Windows Credential Manager,
    /// Linux Secret Service).
    #[default]
    Keychain,
}

impl_domain_status_conversions!(TokenBackend {
    Memory => "memory",
    Keychain => "keychain",
});

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub mode: BuildMode,
    pub local_base_url: String,
    pub deploy_base_url: String,
    #[serde(default = "default_wake_up_delay_ms")]
    pub wake_up_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ApiConfig {
    /// Base address selected by build mode.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self.mode {
            BuildMode::Development => &self.local_base_url,
            BuildMode::Production => &self.deploy_base_url,
        }
    }

    #[must_use]
    pub fn wake_up_delay(&self) -> Duration {
        Duration::from_millis(self.wake_up_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Token storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: TokenBackend,
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: TokenBackend::default(), keychain_service: default_keychain_service() }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_wake_up_delay_ms() -> u64 {
    DEFAULT_WAKE_UP_DELAY_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}
