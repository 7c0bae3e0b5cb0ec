//! Marketplace API client
//!
//! This module provides the authenticated HTTP client and the REST adapter
//! behind the `localstore-core` ports.
//!
//! # Architecture
//!
//! - [`HttpClient`](crate::http::HttpClient) sends exactly once; no retries
//! - [`ApiClient`] attaches the stored access token, counts in-flight
//!   requests and re-issues a request once after a 401 and a successful
//!   refresh
//! - [`TokenRefresher`] keeps at most one refresh call in flight
//! - [`MarketplaceApi`] maps port calls onto REST paths

pub mod auth;
pub mod client;
pub mod errors;
pub mod marketplace;
pub mod request;

pub use auth::{RefreshFailure, TokenRefresher};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, RequestScope};
pub use errors::{extract_error_message, ApiError, ApiErrorCategory};
pub use marketplace::MarketplaceApi;
pub use request::{FormValue, MultipartForm, RequestBody, RequestOptions, RequestState};
