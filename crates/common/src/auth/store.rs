//! Token storage trait and the in-memory implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use localstore_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use localstore_domain::LocalStoreError;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

/// The two credentials a session keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived bearer credential attached to requests.
    Access,
    /// Longer-lived credential exchanged for a new access token.
    Refresh,
}

impl TokenKind {
    /// Key under which the token is persisted.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Access => ACCESS_TOKEN_KEY,
            Self::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Errors raised by token storage backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Entry does not exist in the backend.
    #[error("token not found")]
    NotFound,

    /// Backend refused or failed the operation.
    #[error("token storage access failed: {0}")]
    AccessFailed(String),
}

impl From<StorageError> for LocalStoreError {
    fn from(err: StorageError) -> Self {
        LocalStoreError::Storage(err.to_string())
    }
}

/// Durable key/value storage for the session's two tokens.
///
/// `get` returns `Ok(None)` for a missing token; `NotFound` is reserved for
/// backends that cannot distinguish absence from failure. `remove` is
/// idempotent.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read a token.
    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StorageError>;

    /// Write a token, replacing any previous value.
    async fn set(&self, kind: TokenKind, value: &str) -> Result<(), StorageError>;

    /// Delete a token. Deleting a missing token succeeds.
    async fn remove(&self, kind: TokenKind) -> Result<(), StorageError>;

    /// Delete both tokens.
    ///
    /// Attempts both removals and reports the first failure.
    async fn clear(&self) -> Result<(), StorageError> {
        let access = self.remove(TokenKind::Access).await;
        let refresh = self.remove(TokenKind::Refresh).await;
        access.and(refresh)
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<TokenKind, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with both tokens.
    #[must_use]
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let store = Self::new();
        {
            let mut tokens = store.tokens.write();
            tokens.insert(TokenKind::Access, access.into());
            tokens.insert(TokenKind::Refresh, refresh.into());
        }
        store
    }

    /// Synchronous read, convenient for assertions.
    #[must_use]
    pub fn peek(&self, kind: TokenKind) -> Option<String> {
        self.tokens.read().get(&kind).cloned()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StorageError> {
        Ok(self.peek(kind))
    }

    async fn set(&self, kind: TokenKind, value: &str) -> Result<(), StorageError> {
        debug!(token = %kind, "storing token in memory");
        self.tokens.write().insert(kind, value.to_string());
        Ok(())
    }

    async fn remove(&self, kind: TokenKind) -> Result<(), StorageError> {
        self.tokens.write().remove(&kind);
        Ok(())
    }
}
