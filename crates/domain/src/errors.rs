//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LocalStore
///
/// Every layer above the transport converts into this type. The shell treats
/// [`LocalStoreError::SessionExpired`] as a navigation request rather than a
/// failure to display.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LocalStoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Refresh failed; stored credentials have been cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LocalStoreError {
    /// True when the caller should be sent back to the login entry point.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// True for "you are not allowed / this does not exist" answers, which
    /// the marketplace uses to tell job seekers apart from shop owners.
    #[must_use]
    pub fn is_not_permitted(&self) -> bool {
        matches!(self, Self::Forbidden(_) | Self::NotFound(_))
    }
}

/// Result type alias for LocalStore operations
pub type Result<T> = std::result::Result<T, LocalStoreError>;
