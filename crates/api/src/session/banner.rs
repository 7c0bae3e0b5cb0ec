//! Cold-start notice
//!
//! Mirrors tracker signals into a boolean: shown on `server-waking-up`,
//! hidden on `server-awake`.

use localstore_common::activity::{RequestTracker, ServerSignal};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug)]
pub struct WakeUpBanner {
    visible: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl WakeUpBanner {
    /// Start following `tracker`. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn attach(tracker: &RequestTracker) -> Self {
        let mut signals = tracker.subscribe();
        let (tx, visible) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                match signals.recv().await {
                    Ok(ServerSignal::WakingUp) => {
                        info!("server is waking up; this can take up to a minute");
                        tx.send_replace(true);
                    }
                    Ok(ServerSignal::Awake) => {
                        if tx.send_replace(false) {
                            debug!("server awake");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => debug!(skipped, "banner lagged behind"),
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { visible, task }
    }

    /// Whether the cold-start notice should be shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.clone()
    }
}

impl Drop for WakeUpBanner {
    fn drop(&mut self) {
        self.task.abort();
    }
}
