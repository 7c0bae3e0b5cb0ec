//! Application context - dependency injection container

use std::sync::Arc;

use localstore_common::activity::{RequestTracker, TrackerConfig};
use localstore_common::auth::{KeychainTokenStore, MemoryTokenStore, TokenStore};
use localstore_core::{ApplicantService, HomeFeedService, JobDetailService, SessionService};
use localstore_domain::{Config, Result, TokenBackend};
use localstore_infra::{ApiClient, ApiClientConfig, MarketplaceApi};
use tracing::info;

use crate::session::{SessionGuard, WakeUpBanner};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<dyn TokenStore>,
    pub tracker: RequestTracker,
    pub client: Arc<ApiClient>,
    pub api: Arc<MarketplaceApi>,

    // Core services
    pub session: Arc<SessionService>,
    pub home_feed: Arc<HomeFeedService>,
    pub job_details: Arc<JobDetailService>,
    pub applicants: Arc<ApplicantService>,

    // Shell state
    pub session_guard: Arc<SessionGuard>,
    pub wake_up_banner: WakeUpBanner,
}

impl AppContext {
    /// Build the context from configuration, using the configured token
    /// backend.
    ///
    /// # Errors
    /// Returns `LocalStoreError::Config` if the API client cannot be built.
    pub async fn new(config: Config) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = match config.storage.backend {
            TokenBackend::Memory => Arc::new(MemoryTokenStore::new()),
            TokenBackend::Keychain => {
                Arc::new(KeychainTokenStore::new(config.storage.keychain_service.clone()))
            }
        };
        Self::with_token_store(config, tokens).await
    }

    /// Build the context around an existing token store.
    ///
    /// # Errors
    /// Returns `LocalStoreError::Config` if the API client cannot be built.
    pub async fn with_token_store(config: Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let tracker_config = if config.api.mode.is_deployed() {
            TrackerConfig::deployed(config.api.wake_up_delay())
        } else {
            TrackerConfig::local()
        };
        let tracker = RequestTracker::new(tracker_config);

        let client = Arc::new(ApiClient::new(
            ApiClientConfig::from(&config.api),
            Arc::clone(&tokens),
            tracker.clone(),
        )?);
        let api = Arc::new(MarketplaceApi::new(Arc::clone(&client)));

        let session = Arc::new(SessionService::new(api.clone(), Arc::clone(&tokens)));
        let home_feed = Arc::new(HomeFeedService::new(api.clone(), api.clone(), api.clone()));
        let job_details = Arc::new(JobDetailService::new(api.clone(), api.clone(), api.clone()));
        let applicants = Arc::new(ApplicantService::new(api.clone(), api.clone()));

        let wake_up_banner = WakeUpBanner::attach(&tracker);

        info!(
            mode = %config.api.mode,
            base_url = %client.base_url(),
            backend = %config.storage.backend,
            "application context ready"
        );

        Ok(Self {
            config,
            tokens,
            tracker,
            client,
            api,
            session,
            home_feed,
            job_details,
            applicants,
            session_guard: Arc::new(SessionGuard::new()),
            wake_up_banner,
        })
    }
}
