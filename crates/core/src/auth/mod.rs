//! Session lifecycle: login, logout, registration.

pub mod ports;
pub mod service;

pub use service::SessionService;
