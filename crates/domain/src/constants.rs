//! Application constants
//!
//! Centralized location for domain-level constants shared by the client,
//! the session layer and the application shell.

// Persistent storage keys
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

// Endpoints owned by the auth flow
pub const TOKEN_OBTAIN_PATH: &str = "token/";
pub const TOKEN_REFRESH_PATH: &str = "token/refresh/";

// Cold-start notice for sleep-on-idle backends
pub const DEFAULT_WAKE_UP_DELAY_MS: u64 = 4000;
pub const EVENT_SERVER_WAKING_UP: &str = "server-waking-up";
pub const EVENT_SERVER_AWAKE: &str = "server-awake";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "localstore-client/0.1.0";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "LocalStore.session";

// Listings
pub const JOBS_PER_PAGE: usize = 20;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Shell routes
pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";
