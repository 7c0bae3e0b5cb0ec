//! Single-flight execution.
//!
//! Concurrent callers of [`SingleFlight::run`] share one execution of the
//! operation: the first caller starts it, later callers join it, and all of
//! them receive a clone of the same output. The slot is cleared as soon as
//! the execution settles, or when every caller waiting on it has been
//! dropped. An abandoned execution is dropped with the slot and never
//! completes in the background.

use std::future::Future;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::debug;

struct Flight<T> {
    id: u64,
    future: Shared<BoxFuture<'static, T>>,
    waiters: usize,
}

struct State<T> {
    current: Option<Flight<T>>,
    next_id: u64,
}

/// Deduplicates concurrent executions of an async operation.
pub struct SingleFlight<T: Clone> {
    state: Mutex<State<T>>,
}

/// Registered interest in one execution. Dropping the last waiter before the
/// execution settles clears the slot.
struct Waiter<'a, T: Clone> {
    state: &'a Mutex<State<T>>,
    id: u64,
    settled: bool,
}

impl<T: Clone> Drop for Waiter<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        let Some(flight) = state.current.as_mut().filter(|flight| flight.id == self.id) else {
            return;
        };
        flight.waiters = flight.waiters.saturating_sub(1);
        if self.settled || flight.waiters == 0 {
            if !self.settled {
                debug!("all waiters gone; abandoning in-flight operation");
            }
            state.current = None;
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle single-flight slot.
    #[must_use]
    pub fn new() -> Self {
        Self { state: Mutex::new(State { current: None, next_id: 0 }) }
    }

    /// Whether an execution is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.state.lock().current.is_some()
    }

    /// Run `make()` unless an execution is already in flight, in which case
    /// await that one instead. `make` is only invoked by the leading caller.
    pub async fn run<F, Fut>(&self, make: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (shared, mut waiter) = {
            let mut state = self.state.lock();
            let (id, shared) = match state.current.as_mut() {
                Some(flight) => {
                    debug!("joining in-flight operation");
                    flight.waiters += 1;
                    (flight.id, flight.future.clone())
                }
                None => {
                    let id = state.next_id;
                    state.next_id = state.next_id.wrapping_add(1);
                    let future = make().boxed().shared();
                    state.current = Some(Flight { id, future: future.clone(), waiters: 1 });
                    (id, future)
                }
            };
            (shared, Waiter { state: &self.state, id, settled: false })
        };

        let output = shared.await;
        waiter.settled = true;
        output
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> std::fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.state.lock().current.is_some())
            .finish()
    }
}
