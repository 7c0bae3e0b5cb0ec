use std::sync::Arc;
use std::time::Duration;

use localstore_common::activity::{RequestTracker, TrackerConfig};
use localstore_common::auth::MemoryTokenStore;
use localstore_infra::{ApiClient, MarketplaceApi};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// An [`ApiClient`] wired to a mock backend and an in-memory session.
pub struct TestBackend {
    pub server: MockServer,
    pub store: Arc<MemoryTokenStore>,
    pub tracker: RequestTracker,
    pub client: Arc<ApiClient>,
}

impl TestBackend {
    /// Backend with a signed-in session holding `access` and `refresh`.
    pub async fn signed_in(access: &str, refresh: &str) -> Self {
        Self::with_store(MemoryTokenStore::with_tokens(access, refresh), TrackerConfig::local())
            .await
    }

    /// Backend with no stored tokens.
    pub async fn signed_out() -> Self {
        Self::with_store(MemoryTokenStore::new(), TrackerConfig::local()).await
    }

    pub async fn with_store(store: MemoryTokenStore, tracker: TrackerConfig) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let tracker = RequestTracker::new(tracker);
        let client = ApiClient::builder()
            .base_url(server.uri())
            .token_store(store.clone())
            .tracker(tracker.clone())
            .build()
            .expect("client should build against mock server");

        Self { server, store, tracker, client: Arc::new(client) }
    }

    pub fn marketplace(&self) -> MarketplaceApi {
        MarketplaceApi::new(Arc::clone(&self.client))
    }

    /// Answer `POST token/refresh/` with a new access token.
    pub async fn mount_refresh(&self, access: &str, delay: Duration, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/token/refresh/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access": access }))
                    .set_delay(delay),
            )
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Reject `POST token/refresh/`.
    pub async fn mount_refresh_rejected(&self) {
        Mock::given(method("POST"))
            .and(path("/token/refresh/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "detail": "Token is invalid or expired" })),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Requests received for `path`, in arrival order.
    pub async fn requests_to(&self, target: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == target)
            .collect()
    }
}

/// Value of the Authorization header, if any.
pub fn bearer(request: &Request) -> Option<String> {
    request.headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string)
}

pub fn job_json(id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "shop": { "id": 1, "company_name": "Corner Bakery" },
        "is_active": true
    })
}
