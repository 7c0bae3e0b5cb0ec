//! Marketplace domain types
//!
//! Shapes mirror the REST API's JSON (snake_case field names, upper-case
//! status strings). Optional fields are optional on the wire too.

pub mod analytics;
pub mod application;
pub mod auth;
pub mod forms;
pub mod geo;
pub mod job;
pub mod shop;
pub mod user;

pub use analytics::{AnalyticsKpis, JobPerformance, ShopAnalytics, StatusBreakdown};
pub use application::{Applicant, Application, ApplicationStatus, ApplicationUpdate, JobSummary};
pub use auth::{Credentials, RefreshRequest, RefreshResponse, TokenPair};
pub use forms::{
    CommentDraft, JobApplicationForm, NewJob, PasswordChange, Registration, ShopOwnerSignup,
    Upload,
};
pub use geo::GeoPoint;
pub use job::{Comment, Job, JobType};
pub use shop::Shop;
pub use user::{UserProfile, UserRole};

/// Server-assigned identifier.
pub type Id = i64;
