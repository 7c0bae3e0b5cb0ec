//! Authenticated API client
//!
//! Every request reads the access token from storage, is counted by the
//! [`RequestTracker`] while in flight, and is re-issued once after a
//! successful token refresh when the backend answers 401.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use localstore_common::activity::RequestTracker;
use localstore_common::auth::{TokenKind, TokenStore};
use localstore_domain::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, TOKEN_REFRESH_PATH};
use localstore_domain::ApiConfig;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{RefreshFailure, TokenRefresher};
use super::errors::ApiError;
use super::request::{MultipartForm, PreparedRequest, RequestBody, RequestOptions, RequestState};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://localstore.example.com/api/")
    pub base_url: String,
    /// Default deadline for a request, refresh and re-issue included
    pub timeout: Duration,
    /// Overrides the default `User-Agent`
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            timeout: config.request_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Status and body of one exchange, plus the token it carried.
struct Attempt {
    status: StatusCode,
    body: Bytes,
    token: Option<String>,
}

/// API client with bearer credentials and refresh-on-401
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    tracker: RequestTracker,
    refresher: TokenRefresher,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not absolute or the
    /// HTTP client cannot be built.
    pub fn new(
        config: ApiClientConfig,
        tokens: Arc<dyn TokenStore>,
        tracker: RequestTracker,
    ) -> Result<Self, ApiError> {
        let mut http = HttpClient::builder();
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http.build()?;

        let base_url = normalize_base_url(&config.base_url)?;
        let refresh_url = base_url
            .join(TOKEN_REFRESH_PATH)
            .map_err(|e| ApiError::Config(format!("invalid refresh endpoint: {e}")))?;
        let refresher = TokenRefresher::new(http.clone(), refresh_url, Arc::clone(&tokens));

        debug!(base_url = %base_url, timeout = ?config.timeout, "API client configured");
        Ok(Self { http, base_url, tokens, tracker, refresher, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Normalized base address (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// In-flight request counter shared with the rest of the application.
    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Token storage this client reads credentials from.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Whether a token refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refresher.is_refreshing()
    }

    /// Issue requests with per-request options.
    pub fn with_options(&self, options: RequestOptions) -> RequestScope<'_> {
        RequestScope { client: self, options }
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.with_options(RequestOptions::default()).get(path).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_options(RequestOptions::default()).post(path, body).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_options(RequestOptions::default()).put(path, body).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_options(RequestOptions::default()).patch(path, body).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.with_options(RequestOptions::default()).delete(path).await
    }

    /// Send a multipart form
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.with_options(RequestOptions::default()).multipart(method, path, form).await
    }

    /// GET a raw (non-JSON) body such as a CSV export
    ///
    /// # Errors
    ///
    /// Returns error if request fails
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes, ApiError> {
        self.with_options(RequestOptions::default()).get_bytes(path).await
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid request path {path}: {e}")))
    }

    /// Run a request under the timeout and cancellation of `options`.
    async fn execute(
        &self,
        mut request: PreparedRequest,
        options: &RequestOptions,
    ) -> Result<(StatusCode, Bytes), ApiError> {
        request.anonymous = options.anonymous;
        let timeout = options.timeout.unwrap_or(self.config.timeout);
        let exchange = tokio::time::timeout(timeout, self.dispatch(request));

        let outcome = match &options.cancel {
            Some(cancel) => tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!("request cancelled by caller");
                    return Err(ApiError::Cancelled);
                }
                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        outcome.map_err(|_| {
            debug!(?timeout, "request timed out");
            ApiError::Timeout(timeout)
        })?
    }

    async fn dispatch(&self, mut request: PreparedRequest) -> Result<(StatusCode, Bytes), ApiError> {
        let mut state = RequestState::Pending;
        advance(&request, &mut state, RequestState::Sent);

        let attempt = match self.send_once(&request).await {
            Ok(attempt) => attempt,
            Err(err) => {
                advance(&request, &mut state, RequestState::Failed);
                return Err(err);
            }
        };

        if attempt.status.is_success() {
            advance(&request, &mut state, RequestState::Success);
            return Ok((attempt.status, attempt.body));
        }

        advance(&request, &mut state, RequestState::Failed);
        let original = ApiError::from_response(attempt.status, &attempt.body);
        if attempt.status != StatusCode::UNAUTHORIZED || request.retried || request.anonymous {
            return Err(original);
        }

        request.retried = true;
        advance(&request, &mut state, RequestState::Refreshing);

        match self.refresher.refresh_after(attempt.token.as_deref()).await {
            Ok(_) => {}
            Err(RefreshFailure::MissingRefreshToken) => {
                debug!(path = %request.path, "no refresh token; returning original 401");
                return Err(original);
            }
            Err(RefreshFailure::Rejected(reason)) => {
                advance(&request, &mut state, RequestState::RedirectLogin);
                warn!(path = %request.path, %reason, "session expired");
                return Err(ApiError::SessionExpired);
            }
            Err(RefreshFailure::Storage(err)) => return Err(err.into()),
        }

        match self.send_once(&request).await {
            Ok(retry) if retry.status.is_success() => {
                advance(&request, &mut state, RequestState::RetriedSuccess);
                Ok((retry.status, retry.body))
            }
            Ok(retry) => {
                advance(&request, &mut state, RequestState::RetriedFailed);
                Err(ApiError::from_response(retry.status, &retry.body))
            }
            Err(err) => {
                advance(&request, &mut state, RequestState::RetriedFailed);
                Err(err)
            }
        }
    }

    /// One tracked exchange. The activity guard settles on every exit path,
    /// including when this future is dropped.
    async fn send_once(&self, request: &PreparedRequest) -> Result<Attempt, ApiError> {
        let guard = self.tracker.track();

        let url = self.url_for(&request.path)?;
        let token = if request.anonymous { None } else { self.tokens.get(TokenKind::Access).await? };

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };

        let response = self.http.send(builder).await?;
        let status = response.status();
        let body = response.bytes().await?;
        guard.finish();

        Ok(Attempt { status, body, token })
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .field("active_requests", &self.tracker.active_requests())
            .finish_non_exhaustive()
    }
}

/// Verbs bound to one set of [`RequestOptions`].
#[derive(Debug)]
pub struct RequestScope<'a> {
    client: &'a ApiClient,
    options: RequestOptions,
}

impl RequestScope<'_> {
    /// Send `body` with `method` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        let request = PreparedRequest::new(method, path, body);
        let (status, bytes) = self.client.execute(request, &self.options).await?;
        decode(status, &bytes)
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, RequestBody::Empty).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, json_body(body)?).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, json_body(body)?).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, json_body(body)?).await
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, RequestBody::Empty).await
    }

    #[instrument(skip(self, method, form), fields(path = %path, method = %method))]
    pub async fn multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.send(method, path, RequestBody::Multipart(form)).await
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes, ApiError> {
        let request = PreparedRequest::new(Method::GET, path, RequestBody::Empty);
        let (_, bytes) = self.client.execute(request, &self.options).await?;
        Ok(bytes)
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    tokens: Option<Arc<dyn TokenStore>>,
    tracker: Option<RequestTracker>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.base_url = base_url.into();
        self.config = Some(config);
        self
    }

    pub fn token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn tracker(mut self, tracker: RequestTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when no token store was provided or the
    /// configuration is invalid.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let tokens =
            self.tokens.ok_or_else(|| ApiError::Config("Token store not set".to_string()))?;
        let tracker = self.tracker.unwrap_or_default();

        ApiClient::new(config, tokens, tracker)
    }
}

fn advance(request: &PreparedRequest, state: &mut RequestState, next: RequestState) {
    debug!(method = %request.method, path = %request.path, from = %state, to = %next, "request state");
    *state = next;
}

fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("invalid base URL {raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("base URL {raw} cannot be joined")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Config(format!("Failed to serialize body: {e}")))
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    // 204/205 have no body by RFC
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT || body.is_empty() {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "empty response ({}) cannot be deserialized into the requested type",
                status.as_u16()
            ))
        });
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}
