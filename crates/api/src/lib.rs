//! LocalStore application shell
//!
//! Wires the layered crates together for the `localstore` binary:
//!
//! - [`context`]: builds the token store, request tracker, API client and
//!   core services from configuration
//! - [`commands`]: user-facing operations, each routed through
//!   [`utils::execute_command`] for logging and session expiry handling
//! - [`session`]: the login redirect guard and the wake-up banner state
//! - [`cli`]: argument parsing for the binary

pub mod cli;
pub mod commands;
pub mod context;
pub mod session;
pub mod utils;

pub use context::AppContext;
pub use session::{Navigation, SessionGuard, WakeUpBanner};
