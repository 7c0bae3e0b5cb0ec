//! Conversions from external infrastructure errors into API and domain
//! errors.

use localstore_domain::LocalStoreError;
use reqwest::Error as HttpError;

use crate::api::errors::ApiError;

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        if err.is_builder() {
            return ApiError::Config(format!("invalid request: {err}"));
        }
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        if err.is_timeout() {
            return ApiError::Network(format!("request timed out: {err}"));
        }
        if err.is_connect() {
            return ApiError::Network(format!("connection failed: {err}"));
        }
        if let Some(status) = err.status() {
            return ApiError::from_response(status, b"");
        }
        ApiError::Network(err.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → LocalStoreError */
/* -------------------------------------------------------------------------- */

impl From<ApiError> for LocalStoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::SessionExpired => LocalStoreError::SessionExpired,
            ApiError::Unauthorized(message) => LocalStoreError::Auth(message),
            ApiError::Forbidden(message) => LocalStoreError::Forbidden(message),
            ApiError::NotFound(message) => LocalStoreError::NotFound(message),
            ApiError::Client { message, .. } => LocalStoreError::InvalidInput(message),
            ApiError::RateLimit(message) => {
                LocalStoreError::Network(format!("rate limited: {message}"))
            }
            ApiError::Server { status, message } => {
                LocalStoreError::Network(format!("server error {status}: {message}"))
            }
            ApiError::Network(message) => LocalStoreError::Network(message),
            ApiError::Timeout(after) => {
                LocalStoreError::Network(format!("request timed out after {after:?}"))
            }
            ApiError::Cancelled => LocalStoreError::Cancelled,
            ApiError::Config(message) => LocalStoreError::Config(message),
            ApiError::Storage(err) => LocalStoreError::Storage(err.to_string()),
            ApiError::Decode(message) => {
                LocalStoreError::Internal(format!("unexpected response: {message}"))
            }
        }
    }
}
