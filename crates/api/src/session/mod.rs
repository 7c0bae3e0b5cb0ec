//! Session-level shell state: login redirects and the cold-start notice.

pub mod banner;
pub mod guard;

pub use banner::WakeUpBanner;
pub use guard::{Navigation, SessionGuard};
