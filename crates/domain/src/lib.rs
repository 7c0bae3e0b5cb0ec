//! # LocalStore Domain
//!
//! Business domain types and models for the LocalStore job marketplace.
//!
//! This crate contains:
//! - Marketplace data types (Job, Shop, Application, ...)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (storage keys, signal names, paging defaults)
//!
//! ## Architecture
//! - No dependencies on other LocalStore crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
