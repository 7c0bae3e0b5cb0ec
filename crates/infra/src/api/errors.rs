//! API-specific error types
//!
//! Provides error classification for API operations and extraction of the
//! REST framework's error messages.

use std::time::Duration;

use localstore_common::auth::StorageError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const MAX_TEXT_MESSAGE_LEN: usize = 256;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Credentials missing, rejected, or no longer refreshable
    Authentication,
    /// Authenticated but not allowed (403)
    Permission,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx) and unusable responses
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors and caller-initiated cancellation
    Config,
    /// Token storage failures
    Storage,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    /// Token refresh failed and stored credentials were cleared.
    #[error("Session expired")]
    SessionExpired,

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("request failed with status {status}"), str::to_string)
        });

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            s if s.is_server_error() => Self::Server { status: s.as_u16(), message },
            s => Self::Client { status: s.as_u16(), message },
        }
    }

    /// HTTP status behind this error, when it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::RateLimit(_) => Some(429),
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Unauthorized(_) | Self::SessionExpired => ApiErrorCategory::Authentication,
            Self::Forbidden(_) => ApiErrorCategory::Permission,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client { .. } | Self::Decode(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Cancelled => ApiErrorCategory::Config,
            Self::Storage(_) => ApiErrorCategory::Storage,
        }
    }

    /// A 401 that the client did not (or could not) recover from.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Whether a caller-level retry could succeed. The client itself never
    /// retries anything but a refreshed 401.
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }
}

/// Pull a human-readable message out of an error body.
///
/// Recognises `{"detail": "..."}`, field errors (`{"field": ["msg", ..]}`,
/// first field wins) and plain-text bodies.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(detail) = map.get("detail") {
                return value_message(detail);
            }
            map.values().next().and_then(value_message)
        }
        Ok(Value::Array(items)) => items.first().and_then(value_message),
        Ok(Value::String(text)) => non_empty(&text),
        Ok(_) => None,
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            non_empty(&text).map(|text| truncate(&text))
        }
    }
}

fn value_message(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_empty(text),
        Value::Array(items) => items.first().and_then(value_message),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_TEXT_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
