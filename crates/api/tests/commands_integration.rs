//! End-to-end tests for the shell commands against a mock backend

use std::sync::Arc;
use std::time::Duration;

use localstore_common::auth::{MemoryTokenStore, TokenKind, TokenStore};
use localstore_core::Decision;
use localstore_domain::{
    ApiConfig, ApplicationStatus, BuildMode, Config, LocalStoreError, StorageConfig, TokenBackend,
};
use localstore_lib::commands::{self, JobQuery, ViewerKind};
use localstore_lib::{AppContext, Navigation};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, mode: BuildMode, wake_up_delay_ms: u64) -> Config {
    Config {
        api: ApiConfig {
            mode,
            local_base_url: server.uri(),
            deploy_base_url: server.uri(),
            wake_up_delay_ms,
            request_timeout_secs: 5,
            user_agent: None,
        },
        storage: StorageConfig { backend: TokenBackend::Memory, ..StorageConfig::default() },
    }
}

async fn context(server: &MockServer, store: MemoryTokenStore) -> (AppContext, Arc<MemoryTokenStore>) {
    let store = Arc::new(store);
    let ctx = AppContext::with_token_store(
        config_for(server, BuildMode::Development, 0),
        store.clone(),
    )
    .await
    .expect("context should build");
    (ctx, store)
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn shop_json() -> serde_json::Value {
    json!({ "id": 1, "company_name": "Harbour Cafe", "latitude": "-33.8688", "longitude": "151.2093" })
}

fn application_json(id: i64, job: i64, status: &str) -> serde_json::Value {
    json!({ "id": id, "job": job, "status": status, "applicant": { "id": id + 100, "username": format!("seeker{id}") } })
}

#[tokio::test]
async fn login_then_list_jobs_as_job_seeker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(body_json(json!({ "username": "sam", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A1", "refresh": "R1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/jobs/",
        json!([
            { "id": 7, "title": "Baker", "shop": shop_json(), "is_active": true },
            { "id": 8, "title": "Barista", "shop": shop_json(), "is_active": true }
        ]),
    )
    .await;
    mount_json(&server, "GET", "/shops/", json!([shop_json()])).await;
    Mock::given(method("GET"))
        .and(path("/shops/my_shop/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/applications/", json!([application_json(3, 7, "SHORTLISTED")]))
        .await;

    let (ctx, store) = context(&server, MemoryTokenStore::new()).await;
    commands::login(&ctx, "sam", "hunter2").await.unwrap();
    assert_eq!(store.get(TokenKind::Access).await.unwrap().as_deref(), Some("A1"));

    let query = JobQuery { search: "bak".into(), ..JobQuery::default() };
    let listing = commands::list_jobs(&ctx, &query).await.unwrap();

    assert_eq!(listing.viewer, ViewerKind::JobSeeker);
    assert_eq!(listing.jobs.len(), 1);
    assert_eq!(listing.jobs[0].title, "Baker");
    assert_eq!(listing.total_items, 1);
    assert_eq!(listing.statuses.get(&7), Some(&ApplicationStatus::Shortlisted));
    assert!(listing.shops.is_empty());
}

#[tokio::test]
async fn guests_see_every_job_without_credentials() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/jobs/", json!([{ "id": 7, "title": "Baker", "shop": shop_json() }]))
        .await;
    mount_json(&server, "GET", "/shops/", json!([shop_json()])).await;

    let (ctx, _store) = context(&server, MemoryTokenStore::new()).await;
    let query = JobQuery {
        near: Some(localstore_domain::GeoPoint::new(-33.87, 151.21)),
        ..JobQuery::default()
    };
    let listing = commands::list_jobs(&ctx, &query).await.unwrap();

    assert_eq!(listing.viewer, ViewerKind::Guest);
    assert_eq!(listing.jobs.len(), 1);
    assert_eq!(listing.shops.len(), 1);
    assert!(listing.shops[0].distance_km.is_some_and(|km| km < 1.0));

    let received = server.received_requests().await.unwrap();
    assert!(received.iter().all(|r| !r.headers.contains_key("authorization")));
}

#[tokio::test]
async fn session_expiry_navigates_to_login_once() {
    let server = MockServer::start().await;
    for route in ["/users/me/", "/applications/"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "detail": "Given token not valid for any token type" })),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Token is invalid or expired" }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, store) = context(&server, MemoryTokenStore::with_tokens("A1", "R1")).await;
    let mut navigations = ctx.session_guard.subscribe();

    let (me, applications) =
        tokio::join!(commands::current_user(&ctx), commands::my_applications(&ctx));

    assert!(matches!(me, Err(LocalStoreError::SessionExpired)));
    assert!(matches!(applications, Err(LocalStoreError::SessionExpired)));
    assert_eq!(store.get(TokenKind::Access).await.unwrap(), None);
    assert_eq!(store.get(TokenKind::Refresh).await.unwrap(), None);

    assert!(navigations.has_changed().unwrap());
    assert_eq!(*navigations.borrow_and_update(), Some(Navigation::Login));
    assert_eq!(ctx.session_guard.pending(), Some(Navigation::Login));
    assert_eq!(ctx.session_guard.observe(&LocalStoreError::SessionExpired), None);
}

#[tokio::test]
async fn signing_in_again_clears_the_pending_redirect() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/token/", json!({ "access": "A2", "refresh": "R2" })).await;

    let (ctx, _store) = context(&server, MemoryTokenStore::new()).await;
    ctx.session_guard.observe(&LocalStoreError::SessionExpired);
    assert!(ctx.session_guard.is_expired());

    commands::login(&ctx, "sam", "hunter2").await.unwrap();

    assert!(!ctx.session_guard.is_expired());
    assert_eq!(ctx.session_guard.pending(), None);
}

#[tokio::test]
async fn failed_login_does_not_touch_the_guard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({ "detail": "No active account found with the given credentials" }),
        ))
        .mount(&server)
        .await;

    let (ctx, _store) = context(&server, MemoryTokenStore::new()).await;
    let err = commands::login(&ctx, "sam", "wrong").await.unwrap_err();

    assert!(matches!(err, LocalStoreError::Auth(ref msg) if msg.contains("No active account")));
    assert_eq!(ctx.session_guard.pending(), None);
}

#[tokio::test]
async fn accepting_with_reject_others_updates_the_whole_posting() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/applications/",
        json!([
            application_json(12, 4, "PENDING"),
            application_json(13, 4, "SHORTLISTED"),
            application_json(14, 9, "PENDING")
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path("/applications/12/"))
        .and(body_json(json!({ "status": "ACCEPTED", "owner_note": "Welcome aboard" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(application_json(12, 4, "ACCEPTED")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/jobs/4/bulk_reject_pending/"))
        .and(body_json(json!({ "owner_note": "Position filled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rejected": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _store) = context(&server, MemoryTokenStore::with_tokens("A1", "R1")).await;
    let decision = Decision::new(ApplicationStatus::Accepted)
        .with_note("Welcome aboard")
        .rejecting_others("Position filled");

    let updated = commands::decide(&ctx, 4, 12, &decision).await.unwrap();

    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0].status, ApplicationStatus::Accepted);
    assert_eq!(updated[1].status, ApplicationStatus::Rejected);
}

#[tokio::test]
async fn deployed_backend_shows_the_wake_up_banner_while_slow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let ctx = AppContext::with_token_store(config_for(&server, BuildMode::Production, 50), store)
        .await
        .unwrap();
    assert!(!ctx.wake_up_banner.is_visible());

    let client = Arc::clone(&ctx.client);
    let request = tokio::spawn(async move { client.get::<serde_json::Value>("jobs/").await });

    let mut banner = ctx.wake_up_banner.subscribe();
    tokio::time::timeout(Duration::from_secs(2), banner.wait_for(|visible| *visible))
        .await
        .expect("banner should appear")
        .unwrap();

    request.await.unwrap().unwrap();
    tokio::time::timeout(Duration::from_secs(2), banner.wait_for(|visible| !*visible))
        .await
        .expect("banner should hide")
        .unwrap();
    assert_eq!(ctx.tracker.active_requests(), 0);
}
