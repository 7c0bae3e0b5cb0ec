//! Shop-owner decisions on applications.

pub mod service;

pub use service::{application_status_map, ApplicantService, Decision};
