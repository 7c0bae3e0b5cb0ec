//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are missing, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `LOCALSTORE_API_BASE_URL_LOCAL`: Local backend address (required)
//! - `LOCALSTORE_API_BASE_URL_DEPLOY`: Deployed backend address (required)
//! - `LOCALSTORE_MODE`: `development` or `production` (default `production`)
//! - `LOCALSTORE_WAKE_UP_DELAY_MS`: Cold-start notice delay (default 4000)
//! - `LOCALSTORE_REQUEST_TIMEOUT_SECS`: Per-request deadline (default 30)
//! - `LOCALSTORE_USER_AGENT`: Overrides the HTTP user agent
//! - `LOCALSTORE_TOKEN_BACKEND`: `memory` or `keychain` (default `keychain`)
//! - `LOCALSTORE_KEYCHAIN_SERVICE`: Keychain service name
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./localstore.json` or `./localstore.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use localstore_domain::constants::{
    DEFAULT_KEYCHAIN_SERVICE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WAKE_UP_DELAY_MS,
};
use localstore_domain::{
    ApiConfig, BuildMode, Config, LocalStoreError, Result, StorageConfig, TokenBackend,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LocalStoreError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(mode = %config.api.mode, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Both base URLs must be present; everything else has a default.
///
/// # Errors
/// Returns `LocalStoreError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let local_base_url = env_var("LOCALSTORE_API_BASE_URL_LOCAL")?;
    let deploy_base_url = env_var("LOCALSTORE_API_BASE_URL_DEPLOY")?;

    let mode = env_parse::<BuildMode>("LOCALSTORE_MODE")?.unwrap_or_default();
    let wake_up_delay_ms =
        env_parse::<u64>("LOCALSTORE_WAKE_UP_DELAY_MS")?.unwrap_or(DEFAULT_WAKE_UP_DELAY_MS);
    let request_timeout_secs = env_parse::<u64>("LOCALSTORE_REQUEST_TIMEOUT_SECS")?
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let user_agent = env_opt("LOCALSTORE_USER_AGENT");

    let backend = env_parse::<TokenBackend>("LOCALSTORE_TOKEN_BACKEND")?.unwrap_or_default();
    let keychain_service = env_opt("LOCALSTORE_KEYCHAIN_SERVICE")
        .unwrap_or_else(|| DEFAULT_KEYCHAIN_SERVICE.to_string());

    Ok(Config {
        api: ApiConfig {
            mode,
            local_base_url,
            deploy_base_url,
            wake_up_delay_ms,
            request_timeout_secs,
            user_agent,
        },
        storage: StorageConfig { backend, keychain_service },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LocalStoreError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LocalStoreError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LocalStoreError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LocalStoreError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `LocalStoreError::Config` if format is invalid or parsing fails.
pub fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LocalStoreError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LocalStoreError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LocalStoreError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// executable's directory. Returns the first config file found.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("localstore.json"),
        dir.join("localstore.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `LocalStoreError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        LocalStoreError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| LocalStoreError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 8] = [
        "LOCALSTORE_API_BASE_URL_LOCAL",
        "LOCALSTORE_API_BASE_URL_DEPLOY",
        "LOCALSTORE_MODE",
        "LOCALSTORE_WAKE_UP_DELAY_MS",
        "LOCALSTORE_REQUEST_TIMEOUT_SECS",
        "LOCALSTORE_USER_AGENT",
        "LOCALSTORE_TOKEN_BACKEND",
        "LOCALSTORE_KEYCHAIN_SERVICE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("LOCALSTORE_TEST_BOOL_ON", "On");
        std::env::set_var("LOCALSTORE_TEST_BOOL_OFF", "0");
        std::env::remove_var("LOCALSTORE_TEST_BOOL_MISSING");

        assert!(env_bool("LOCALSTORE_TEST_BOOL_ON", false));
        assert!(!env_bool("LOCALSTORE_TEST_BOOL_OFF", true));
        assert!(env_bool("LOCALSTORE_TEST_BOOL_MISSING", true));

        std::env::remove_var("LOCALSTORE_TEST_BOOL_ON");
        std::env::remove_var("LOCALSTORE_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_with_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("LOCALSTORE_API_BASE_URL_LOCAL", "http://localhost:8000/api/");
        std::env::set_var("LOCALSTORE_API_BASE_URL_DEPLOY", "https://localstore.example.com/api/");

        let config = load_from_env().expect("base URLs are set");
        assert_eq!(config.api.mode, BuildMode::Production);
        assert_eq!(config.api.base_url(), "https://localstore.example.com/api/");
        assert_eq!(config.api.wake_up_delay_ms, DEFAULT_WAKE_UP_DELAY_MS);
        assert_eq!(config.api.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.storage.backend, TokenBackend::Keychain);
        assert_eq!(config.storage.keychain_service, DEFAULT_KEYCHAIN_SERVICE);

        clear_env();
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("LOCALSTORE_API_BASE_URL_LOCAL", "http://localhost:8000/api/");
        std::env::set_var("LOCALSTORE_API_BASE_URL_DEPLOY", "https://localstore.example.com/api/");
        std::env::set_var("LOCALSTORE_MODE", "development");
        std::env::set_var("LOCALSTORE_WAKE_UP_DELAY_MS", "2500");
        std::env::set_var("LOCALSTORE_REQUEST_TIMEOUT_SECS", "10");
        std::env::set_var("LOCALSTORE_USER_AGENT", "localstore-test");
        std::env::set_var("LOCALSTORE_TOKEN_BACKEND", "memory");
        std::env::set_var("LOCALSTORE_KEYCHAIN_SERVICE", "LocalStore.test");

        let config = load_from_env().expect("all vars are set");
        assert_eq!(config.api.mode, BuildMode::Development);
        assert_eq!(config.api.base_url(), "http://localhost:8000/api/");
        assert_eq!(config.api.wake_up_delay_ms, 2500);
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.api.user_agent.as_deref(), Some("localstore-test"));
        assert_eq!(config.storage.backend, TokenBackend::Memory);
        assert_eq!(config.storage.keychain_service, "LocalStore.test");

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("LOCALSTORE_API_BASE_URL_LOCAL", "http://localhost:8000/api/");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, LocalStoreError::Config(ref m) if m.contains("LOCALSTORE_API_BASE_URL_DEPLOY")));

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_mode() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("LOCALSTORE_API_BASE_URL_LOCAL", "http://localhost:8000/api/");
        std::env::set_var("LOCALSTORE_API_BASE_URL_DEPLOY", "https://localstore.example.com/api/");
        std::env::set_var("LOCALSTORE_MODE", "staging");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, LocalStoreError::Config(ref m) if m.contains("LOCALSTORE_MODE")));

        clear_env();
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
[api]
mode = "development"
local_base_url = "http://localhost:8000/api/"
deploy_base_url = "https://localstore.example.com/api/"

[storage]
backend = "memory"
"#;

        let config = parse_config(toml_content, Path::new("localstore.toml")).unwrap();
        assert_eq!(config.api.mode, BuildMode::Development);
        assert_eq!(config.storage.backend, TokenBackend::Memory);
        assert_eq!(config.api.wake_up_delay_ms, DEFAULT_WAKE_UP_DELAY_MS);
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("api: {}", Path::new("config.yaml"));
        assert!(matches!(result, Err(LocalStoreError::Config(_))));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(LocalStoreError::Config(_))));
    }
}
