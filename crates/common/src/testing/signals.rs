//! Helpers for observing [`ServerSignal`]s in tests.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::activity::{RequestTracker, ServerSignal};

/// Drain every signal already queued on a receiver.
pub fn drain_signals(rx: &mut broadcast::Receiver<ServerSignal>) -> Vec<ServerSignal> {
    let mut out = Vec::new();
    while let Ok(signal) = rx.try_recv() {
        out.push(signal);
    }
    out
}

/// Records every signal a tracker emits from a background task.
#[derive(Debug)]
pub struct SignalRecorder {
    seen: Arc<Mutex<Vec<ServerSignal>>>,
    task: JoinHandle<()>,
}

impl SignalRecorder {
    /// Subscribe to `tracker` and start recording.
    #[must_use]
    pub fn attach(tracker: &RequestTracker) -> Self {
        let mut rx = tracker.subscribe();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(signal) => sink.lock().push(signal),
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Self { seen, task }
    }

    /// Signals recorded so far.
    #[must_use]
    pub fn signals(&self) -> Vec<ServerSignal> {
        self.seen.lock().clone()
    }

    /// Number of times `signal` was recorded.
    #[must_use]
    pub fn count(&self, signal: ServerSignal) -> usize {
        self.seen.lock().iter().filter(|s| **s == signal).count()
    }
}

impl Drop for SignalRecorder {
    fn drop(&mut self) {
        self.task.abort();
    }
}
