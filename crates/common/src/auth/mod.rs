//! Session token storage.
//!
//! The API client reads the access token before every outbound request and
//! rewrites both tokens after a refresh, so storage is abstracted behind the
//! async [`TokenStore`] trait:
//!
//! - [`MemoryTokenStore`]: process-local storage (tests, headless runs)
//! - [`KeychainTokenStore`]: OS credential storage via `keyring` (requires the
//!   `platform` feature)

#[cfg(feature = "platform")]
pub mod keychain;
pub mod store;

#[cfg(feature = "platform")]
pub use keychain::KeychainTokenStore;
pub use store::{MemoryTokenStore, StorageError, TokenKind, TokenStore};
