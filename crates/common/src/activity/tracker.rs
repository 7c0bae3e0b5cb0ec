//! Request activity tracker.
//!
//! Counts in-flight API requests. When the first request of a busy period
//! starts against a deployed backend, a one-shot timer is armed; if requests
//! are still outstanding when it fires, [`ServerSignal::WakingUp`] is
//! broadcast so the UI can explain a cold start. When the count returns to
//! zero the timer is cancelled and [`ServerSignal::Awake`] is broadcast.
//!
//! The counter never goes negative. Timer arm/cancel happens under the same
//! lock as the counter so a late timer can never fire into an idle period.

use std::sync::Arc;
use std::time::Duration;

use localstore_domain::constants::{
    DEFAULT_WAKE_UP_DELAY_MS, EVENT_SERVER_AWAKE, EVENT_SERVER_WAKING_UP,
};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const SIGNAL_CHANNEL_CAPACITY: usize = 32;

/// Process-wide notifications about backend responsiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerSignal {
    /// Requests have been outstanding longer than the wake-up delay.
    WakingUp,
    /// All outstanding requests have settled.
    Awake,
}

impl ServerSignal {
    /// Stable event name for UI listeners.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::WakingUp => EVENT_SERVER_WAKING_UP,
            Self::Awake => EVENT_SERVER_AWAKE,
        }
    }
}

/// Tracker behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Arm the wake-up timer at all (deployed backends only).
    pub wake_up_enabled: bool,
    /// How long requests may be outstanding before `WakingUp` fires.
    pub wake_up_delay: Duration,
}

impl TrackerConfig {
    /// Configuration for a deployed backend with the given delay.
    #[must_use]
    pub const fn deployed(wake_up_delay: Duration) -> Self {
        Self { wake_up_enabled: true, wake_up_delay }
    }

    /// Configuration for a local backend; no wake-up signalling.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            wake_up_enabled: false,
            wake_up_delay: Duration::from_millis(DEFAULT_WAKE_UP_DELAY_MS),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::deployed(Duration::from_millis(DEFAULT_WAKE_UP_DELAY_MS))
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    active: usize,
    generation: u64,
    wake_timer: Option<(u64, CancellationToken)>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<TrackerState>,
    signals: broadcast::Sender<ServerSignal>,
    config: TrackerConfig,
}

/// Shared in-flight request counter. Cloning is cheap and shares state.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    inner: Arc<Inner>,
}

impl RequestTracker {
    /// Create a tracker.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner { state: Mutex::new(TrackerState::default()), signals, config }),
        }
    }

    /// Subscribe to server signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ServerSignal> {
        self.inner.signals.subscribe()
    }

    /// Tracker configuration.
    #[must_use]
    pub fn config(&self) -> TrackerConfig {
        self.inner.config
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn active_requests(&self) -> usize {
        self.inner.state.lock().active
    }

    /// Whether a wake-up timer is currently pending.
    #[must_use]
    pub fn is_wake_timer_armed(&self) -> bool {
        self.inner.state.lock().wake_timer.is_some()
    }

    /// Record that a request started. Returns the new in-flight count.
    pub fn begin(&self) -> usize {
        let mut state = self.inner.state.lock();
        state.active += 1;
        let active = state.active;

        if active == 1 && self.inner.config.wake_up_enabled {
            self.arm_wake_timer(&mut state);
        }
        debug!(active, "request started");
        active
    }

    /// Record that a request settled. Returns the new in-flight count.
    ///
    /// Unbalanced calls at zero are ignored and emit nothing.
    pub fn end(&self) -> usize {
        let mut state = self.inner.state.lock();
        if state.active == 0 {
            warn!("request end recorded with no request in flight");
            return 0;
        }

        state.active -= 1;
        let active = state.active;
        if active == 0 {
            if let Some((_, timer)) = state.wake_timer.take() {
                timer.cancel();
            }
            // No receivers is fine.
            let _ = self.inner.signals.send(ServerSignal::Awake);
        }
        debug!(active, "request settled");
        active
    }

    /// Start tracking a request; it ends when the guard drops.
    #[must_use = "the request is marked settled as soon as the guard is dropped"]
    pub fn track(&self) -> ActivityGuard {
        self.begin();
        ActivityGuard { tracker: Some(self.clone()) }
    }

    fn arm_wake_timer(&self, state: &mut TrackerState) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime available; wake-up timer not armed");
            return;
        };

        if let Some((_, stale)) = state.wake_timer.take() {
            stale.cancel();
        }
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let token = CancellationToken::new();
        state.wake_timer = Some((generation, token.clone()));

        let inner = Arc::clone(&self.inner);
        let delay = self.inner.config.wake_up_delay;
        runtime.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let mut state = inner.state.lock();
                    let current = matches!(state.wake_timer, Some((g, _)) if g == generation);
                    if current && !token.is_cancelled() && state.active > 0 {
                        state.wake_timer = None;
                        debug!(active = state.active, "backend slow to respond; signalling wake-up");
                        let _ = inner.signals.send(ServerSignal::WakingUp);
                    }
                }
            }
        });
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

/// Marks a tracked request settled on drop, including when the request
/// future is dropped mid-flight.
#[derive(Debug)]
pub struct ActivityGuard {
    tracker: Option<RequestTracker>,
}

impl ActivityGuard {
    /// Settle now instead of at drop.
    pub fn finish(mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.end();
        }
    }
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.end();
        }
    }
}
