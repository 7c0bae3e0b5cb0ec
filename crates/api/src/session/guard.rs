//! Session expiry handling
//!
//! The client reports an unrecoverable 401 as `SessionExpired`. The guard
//! turns the first such error into a login navigation and swallows repeats
//! until the user signs in again.
//!
//! Stored tokens are already gone by then (the refresher clears them). The
//! guard holds no session data itself; whoever consumes the navigation
//! discards any other in-memory session state.

use std::sync::atomic::{AtomicBool, Ordering};

use localstore_domain::constants::LOGIN_ROUTE;
use localstore_domain::LocalStoreError;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the shell should send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
}

impl Navigation {
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Login => LOGIN_ROUTE,
        }
    }
}

/// Converts session expiry into at most one [`Navigation::Login`].
#[derive(Debug)]
pub struct SessionGuard {
    redirected: AtomicBool,
    pending: watch::Sender<Option<Navigation>>,
}

impl SessionGuard {
    #[must_use]
    pub fn new() -> Self {
        let (pending, _) = watch::channel(None);
        Self { redirected: AtomicBool::new(false), pending }
    }

    /// Inspect a command error. Returns the navigation to perform, if any.
    pub fn observe(&self, err: &LocalStoreError) -> Option<Navigation> {
        if !err.is_session_expired() {
            return None;
        }
        if self.redirected.swap(true, Ordering::SeqCst) {
            debug!("session already expired; login navigation pending");
            return None;
        }

        warn!(route = LOGIN_ROUTE, "session expired; redirecting to login");
        self.pending.send_replace(Some(Navigation::Login));
        Some(Navigation::Login)
    }

    /// Forget a previous expiry. Called after a successful sign-in.
    pub fn reset(&self) {
        if self.redirected.swap(false, Ordering::SeqCst) {
            info!("session restored");
        }
        self.pending.send_replace(None);
    }

    /// Whether the session expired since the last sign-in.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    /// The navigation scheduled by the last expiry, if not yet reset.
    #[must_use]
    pub fn pending(&self) -> Option<Navigation> {
        *self.pending.borrow()
    }

    /// Watch for pending navigations.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Navigation>> {
        self.pending.subscribe()
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}
