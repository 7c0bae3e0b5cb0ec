//! In-flight request accounting and server wake-up signalling.

pub mod tracker;

pub use tracker::{ActivityGuard, RequestTracker, ServerSignal, TrackerConfig};
