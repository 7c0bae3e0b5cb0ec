//! Access token refresh
//!
//! Exchanges the stored refresh token for a new access token. The refresh
//! call bypasses the authenticated client entirely: no bearer header, no
//! activity tracking, no recursive refresh. Concurrent callers share one
//! refresh through a single-flight slot.

use std::sync::Arc;

use localstore_common::auth::{StorageError, TokenKind, TokenStore};
use localstore_common::sync::SingleFlight;
use localstore_domain::{RefreshRequest, RefreshResponse};
use reqwest::Method;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Why a refresh did not produce a new access token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshFailure {
    /// No refresh token stored; nothing was attempted or cleared.
    #[error("no refresh token stored")]
    MissingRefreshToken,

    /// The refresh endpoint refused or could not be reached; both tokens
    /// have been removed.
    #[error("token refresh rejected: {0}")]
    Rejected(String),

    /// Token storage failed while reading or persisting.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

type RefreshResult = Result<String, RefreshFailure>;

/// Single-flight access token refresher.
pub struct TokenRefresher {
    http: HttpClient,
    refresh_url: Url,
    tokens: Arc<dyn TokenStore>,
    flight: SingleFlight<RefreshResult>,
}

impl TokenRefresher {
    /// Create a refresher posting to `refresh_url`.
    pub fn new(http: HttpClient, refresh_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self { http, refresh_url, tokens, flight: SingleFlight::new() }
    }

    /// Endpoint the refresh token is posted to.
    pub fn refresh_url(&self) -> &Url {
        &self.refresh_url
    }

    /// Obtain a usable access token after a request carrying
    /// `rejected_token` got a 401.
    ///
    /// If storage already holds a different access token, another request
    /// refreshed in the meantime and that token is returned without a
    /// network call.
    pub async fn refresh_after(&self, rejected_token: Option<&str>) -> RefreshResult {
        let current = self.tokens.get(TokenKind::Access).await?;
        if let Some(current) = current {
            if rejected_token != Some(current.as_str()) {
                debug!("access token already replaced; skipping refresh");
                return Ok(current);
            }
        }

        let http = self.http.clone();
        let url = self.refresh_url.clone();
        let tokens = Arc::clone(&self.tokens);
        self.flight.run(move || refresh_once(http, url, tokens)).await
    }

    /// Whether a refresh call is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.flight.is_in_flight()
    }
}

async fn refresh_once(http: HttpClient, url: Url, tokens: Arc<dyn TokenStore>) -> RefreshResult {
    let Some(refresh) = tokens.get(TokenKind::Refresh).await? else {
        debug!("no refresh token stored; cannot refresh");
        return Err(RefreshFailure::MissingRefreshToken);
    };

    match exchange(&http, url, refresh).await {
        Ok(access) => {
            tokens.set(TokenKind::Access, &access).await?;
            info!("access token refreshed");
            Ok(access)
        }
        Err(err) => {
            warn!(error = %err, "token refresh failed; clearing stored session");
            if let Err(clear_err) = tokens.clear().await {
                warn!(error = %clear_err, "failed to clear stored tokens");
            }
            Err(RefreshFailure::Rejected(err.to_string()))
        }
    }
}

async fn exchange(http: &HttpClient, url: Url, refresh: String) -> Result<String, ApiError> {
    let builder = http.request(Method::POST, url).json(&RefreshRequest { refresh });
    let response = http.send(builder).await?;

    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(ApiError::from_response(status, &body));
    }

    let parsed: RefreshResponse =
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(parsed.access)
}
