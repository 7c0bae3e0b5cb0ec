//! Job applications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::impl_domain_status_conversions;

/// Lifecycle of an application as decided by the shop owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Accepted,
    Rejected,
}

impl_domain_status_conversions!(ApplicationStatus {
    Pending => "PENDING",
    Shortlisted => "SHORTLISTED",
    Accepted => "ACCEPTED",
    Rejected => "REJECTED",
});

impl ApplicationStatus {
    /// Still waiting on a final decision.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Shortlisted)
    }
}

/// Condensed job reference embedded in an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Applicant details visible to the shop owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: Id,
    pub job: Id,
    #[serde(default)]
    pub job_details: Option<JobSummary>,
    #[serde(default)]
    pub applicant: Option<Applicant>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cv: Option<String>,
    #[serde(default)]
    pub owner_note: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub meets_requirements: bool,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
}

impl Application {
    /// A bare application as returned right after applying.
    #[must_use]
    pub fn new(id: Id, job: Id, status: ApplicationStatus) -> Self {
        Self {
            id,
            job,
            job_details: None,
            applicant: None,
            notes: None,
            cv: None,
            owner_note: None,
            status,
            meets_requirements: true,
            applied_at: None,
        }
    }

    /// The job this application belongs to, preferring the embedded summary.
    #[must_use]
    pub fn job_id(&self) -> Id {
        self.job_details.as_ref().map_or(self.job, |details| details.id)
    }
}

/// Body of `PATCH applications/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_note: Option<String>,
}
