//! # LocalStore Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport (reqwest)
//! - The authenticated API client (bearer credentials, refresh-on-401,
//!   request activity tracking)
//! - The marketplace REST adapter implementing `localstore-core` ports
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `localstore-core`
//! - Depends on `localstore-common`, `localstore-domain` and `localstore-core`
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiErrorCategory, MarketplaceApi, MultipartForm,
    RequestBody, RequestOptions, RequestState, TokenRefresher,
};
pub use http::HttpClient;
