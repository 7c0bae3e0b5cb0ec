use std::time::Duration;

use localstore_domain::LocalStoreError;
use localstore_infra::config::loader::env_bool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Set
/// `LOCALSTORE_LOG_JSON=1` for JSON lines. Logs go to stderr so command
/// output on stdout stays clean.
///
/// # Errors
/// Returns `LocalStoreError::Config` if a subscriber is already installed.
pub fn init_logging() -> Result<(), LocalStoreError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if env_bool("LOCALSTORE_LOG_JSON", false) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| LocalStoreError::Config(format!("failed to install logger: {e}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a logical identifier such as `"jobs::list_jobs"`; callers
/// must not pass credentials or user input through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&LocalStoreError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            warn!(command, duration_ms, error_type = error_label(err), "command_execution_failure");
        }
    }
}

/// Convert a `LocalStoreError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &LocalStoreError) -> &'static str {
    match error {
        LocalStoreError::Config(_) => "config",
        LocalStoreError::Network(_) => "network",
        LocalStoreError::Auth(_) => "auth",
        LocalStoreError::SessionExpired => "session_expired",
        LocalStoreError::Forbidden(_) => "forbidden",
        LocalStoreError::NotFound(_) => "not_found",
        LocalStoreError::InvalidInput(_) => "invalid_input",
        LocalStoreError::Storage(_) => "storage",
        LocalStoreError::Cancelled => "cancelled",
        LocalStoreError::Internal(_) => "internal",
    }
}
