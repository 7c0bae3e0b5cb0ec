//! # LocalStore Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the marketplace API
//! - Listing logic (search filtering, distance ranking, pagination)
//! - Use cases and services (home feed, job detail, applicant decisions,
//!   session)
//!
//! ## Architecture Principles
//! - Only depends on `localstore-common` and `localstore-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod applicants;
pub mod auth;
pub mod jobs;
pub mod listings;
pub mod marketplace;

// Re-export specific items to avoid ambiguity
pub use applicants::{application_status_map, ApplicantService, Decision};
pub use auth::ports::AuthPort;
pub use auth::SessionService;
pub use jobs::{JobDetailService, JobView, JobViewer};
pub use listings::{
    filter_jobs, filter_shops, haversine_km, paginate, rank_shops_by_distance, FeedViewer,
    HomeFeed, HomeFeedService, Page, RankedShop,
};
pub use marketplace::ports::{ApplicationPort, JobBoardPort, ProfilePort, ShopPort};
