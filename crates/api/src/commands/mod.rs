//! Shell commands
//!
//! Thin wrappers over the core services. Each one runs through
//! [`execute_command`](crate::utils::execute_command), so an expired session
//! is reported to the session guard no matter which command hit it.

pub mod analytics;
pub mod applications;
pub mod auth;
pub mod jobs;

pub use analytics::shop_analytics;
pub use applications::{decide, my_applications};
pub use auth::{current_user, login, logout};
pub use jobs::{job_detail, list_jobs, JobListing, JobQuery, NearbyShop, ViewerKind};
