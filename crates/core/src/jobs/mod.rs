//! Job detail view.

pub mod service;

pub use service::{JobDetailService, JobView, JobViewer};
