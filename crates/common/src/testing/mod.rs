//! Testing utilities shared by the LocalStore crates.
//!
//! - **[`mocks`]**: token store doubles with injectable failures
//! - **[`signals`]**: collecting [`ServerSignal`](crate::activity::ServerSignal)s
//!
//! ```rust
//! use localstore_common::testing::FailingTokenStore;
//!
//! let store = FailingTokenStore::new("keychain locked");
//! assert_eq!(store.message(), "keychain locked");
//! ```

// Test utilities are self-explanatory; skip the error/panic docs.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod mocks;
pub mod signals;

pub use mocks::{CountingTokenStore, FailingTokenStore};
pub use signals::{drain_signals, SignalRecorder};
