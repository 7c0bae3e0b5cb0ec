//! Modular common utilities shared across LocalStore crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: async session infrastructure (token storage abstraction,
//!   request activity tracking, single-flight coordination)
//! - `platform`: OS keychain token storage
//! - `test-utils`: token store doubles and signal helpers for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod activity;
#[cfg(feature = "runtime")]
pub mod auth;
#[cfg(feature = "runtime")]
pub mod sync;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", all(test, feature = "runtime")))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use activity::{ActivityGuard, RequestTracker, ServerSignal, TrackerConfig};
#[cfg(feature = "platform")]
pub use auth::KeychainTokenStore;
#[cfg(feature = "runtime")]
pub use auth::{MemoryTokenStore, StorageError, TokenKind, TokenStore};
#[cfg(feature = "runtime")]
pub use sync::SingleFlight;
