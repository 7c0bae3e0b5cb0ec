//! Token store behaviour through the trait object the API client uses.

use std::sync::Arc;

use localstore_common::auth::{MemoryTokenStore, StorageError, TokenKind, TokenStore};

#[tokio::test]
async fn trait_object_store_is_shared_between_holders() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let other = Arc::clone(&store);

    store.set(TokenKind::Access, "access-1").await.unwrap();
    store.set(TokenKind::Refresh, "refresh-1").await.unwrap();

    assert_eq!(other.get(TokenKind::Access).await.unwrap().as_deref(), Some("access-1"));
    other.clear().await.unwrap();
    assert_eq!(store.get(TokenKind::Refresh).await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_writers_leave_one_value() {
    let store = Arc::new(MemoryTokenStore::new());

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.set(TokenKind::Access, &format!("t{i}")).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let value = store.peek(TokenKind::Access).unwrap();
    assert!(value.starts_with('t'));
}

#[test]
fn storage_error_messages_are_readable() {
    assert_eq!(StorageError::NotFound.to_string(), "token not found");
    assert_eq!(
        StorageError::AccessFailed("locked".into()).to_string(),
        "token storage access failed: locked"
    );
}
