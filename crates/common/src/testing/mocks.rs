//! Token store doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::auth::{MemoryTokenStore, StorageError, TokenKind, TokenStore};

/// Token store whose every operation fails with `AccessFailed`.
#[derive(Debug, Clone)]
pub struct FailingTokenStore {
    message: String,
}

impl FailingTokenStore {
    /// Create a store failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Failure message returned by every call.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn fail<T>(&self) -> Result<T, StorageError> {
        Err(StorageError::AccessFailed(self.message.clone()))
    }
}

#[async_trait]
impl TokenStore for FailingTokenStore {
    async fn get(&self, _kind: TokenKind) -> Result<Option<String>, StorageError> {
        self.fail()
    }

    async fn set(&self, _kind: TokenKind, _value: &str) -> Result<(), StorageError> {
        self.fail()
    }

    async fn remove(&self, _kind: TokenKind) -> Result<(), StorageError> {
        self.fail()
    }
}

/// In-memory store that counts writes and removals.
#[derive(Debug, Default)]
pub struct CountingTokenStore {
    inner: MemoryTokenStore,
    writes: AtomicUsize,
    removals: AtomicUsize,
}

impl CountingTokenStore {
    /// Create a store pre-populated with both tokens.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { inner: MemoryTokenStore::with_tokens(access, refresh), ..Self::default() }
    }

    /// Current value of a token.
    #[must_use]
    pub fn peek(&self, kind: TokenKind) -> Option<String> {
        self.inner.peek(kind)
    }

    /// Number of `set` calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.removals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for CountingTokenStore {
    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StorageError> {
        self.inner.get(kind).await
    }

    async fn set(&self, kind: TokenKind, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(kind, value).await
    }

    async fn remove(&self, kind: TokenKind) -> Result<(), StorageError> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_store_fails_everything() {
        let store = FailingTokenStore::new("denied");
        assert!(store.get(TokenKind::Access).await.is_err());
        assert!(store.set(TokenKind::Access, "x").await.is_err());
        assert_eq!(store.clear().await, Err(StorageError::AccessFailed("denied".into())));
    }

    #[tokio::test]
    async fn counting_store_counts() {
        let store = CountingTokenStore::with_tokens("a", "r");
        store.set(TokenKind::Access, "b").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.removals(), 2);
        assert_eq!(store.peek(TokenKind::Access), None);
    }
}
