//! OS credential storage for session tokens.
//!
//! Each token is a separate keyring entry under one service name, keyed by
//! [`TokenKind::storage_key`]. Backends: macOS Keychain Access, Windows
//! Credential Manager, Linux Secret Service.
//!
//! ```no_run
//! use localstore_common::auth::{KeychainTokenStore, TokenKind, TokenStore};
//!
//! # async fn demo() -> Result<(), localstore_common::auth::StorageError> {
//! let store = KeychainTokenStore::new("LocalStore.session");
//! store.set(TokenKind::Access, "eyJ...").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::store::{StorageError, TokenKind, TokenStore};

/// Token store backed by the platform keychain.
#[derive(Debug, Clone)]
pub struct KeychainTokenStore {
    service_name: String,
}

impl KeychainTokenStore {
    /// Create a store for a keychain service (e.g. `"LocalStore.session"`).
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    /// Service name entries are filed under.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, kind: TokenKind) -> Result<Entry, StorageError> {
        Entry::new(&self.service_name, kind.storage_key()).map_err(|e| {
            StorageError::AccessFailed(format!("Failed to open keychain entry {kind}: {e}"))
        })
    }
}

#[async_trait]
impl TokenStore for KeychainTokenStore {
    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StorageError> {
        debug!(service = %self.service_name, token = %kind, "Reading token from keychain");

        match self.entry(kind)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::AccessFailed(format!("Failed to read {kind}: {e}"))),
        }
    }

    async fn set(&self, kind: TokenKind, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, token = %kind, "Storing token in keychain");

        self.entry(kind)?
            .set_password(value)
            .map_err(|e| StorageError::AccessFailed(format!("Failed to store {kind}: {e}")))
    }

    async fn remove(&self, kind: TokenKind) -> Result<(), StorageError> {
        debug!(service = %self.service_name, token = %kind, "Deleting token from keychain");

        match self.entry(kind)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::AccessFailed(format!("Failed to delete {kind}: {e}"))),
        }
    }
}
