//! Applicant decision service with optimistic local updates

use std::collections::HashMap;
use std::sync::Arc;

use localstore_domain::{
    Application, ApplicationStatus, ApplicationUpdate, Id, LocalStoreError, Result,
};
use tracing::{info, instrument};

use crate::marketplace::ports::{ApplicationPort, JobBoardPort};

/// Job id to application status, for badges on job listings.
#[must_use]
pub fn application_status_map(applications: &[Application]) -> HashMap<Id, ApplicationStatus> {
    applications.iter().map(|app| (app.job_id(), app.status)).collect()
}

/// A shop owner's verdict on one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: ApplicationStatus,
    /// Note shown to the applicant. Blank notes are not sent.
    pub owner_note: Option<String>,
    /// When accepting, reject every other open application with this note.
    pub reject_others: Option<String>,
}

impl Decision {
    #[must_use]
    pub fn new(status: ApplicationStatus) -> Self {
        Self { status, owner_note: None, reject_others: None }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.owner_note = Some(note.into());
        self
    }

    #[must_use]
    pub fn rejecting_others(mut self, note: impl Into<String>) -> Self {
        self.reject_others = Some(note.into());
        self
    }

    fn update(&self) -> ApplicationUpdate {
        ApplicationUpdate {
            status: self.status,
            owner_note: self
                .owner_note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(str::to_string),
        }
    }
}

/// Reviews applications for a shop owner's postings.
pub struct ApplicantService {
    applications: Arc<dyn ApplicationPort>,
    jobs: Arc<dyn JobBoardPort>,
}

impl ApplicantService {
    /// Create a new applicant service
    pub fn new(applications: Arc<dyn ApplicationPort>, jobs: Arc<dyn JobBoardPort>) -> Self {
        Self { applications, jobs }
    }

    /// Applications received for one posting.
    pub async fn applications_for_job(&self, job_id: Id) -> Result<Vec<Application>> {
        let all = self.applications.list_applications().await?;
        Ok(all.into_iter().filter(|app| app.job_id() == job_id).collect())
    }

    /// Apply `decision` to `application_id` and return the updated local
    /// list.
    ///
    /// The decided application is replaced with the server's copy. When an
    /// acceptance also rejects the others, the remaining open applications
    /// are marked rejected locally without refetching.
    ///
    /// # Errors
    /// `NotFound` if the application is not in `local`; API errors otherwise.
    /// If the bulk rejection fails the single update has still been applied
    /// on the server.
    #[instrument(skip(self, local, decision), fields(status = %decision.status))]
    pub async fn decide(
        &self,
        job_id: Id,
        local: &[Application],
        application_id: Id,
        decision: &Decision,
    ) -> Result<Vec<Application>> {
        if !local.iter().any(|app| app.id == application_id) {
            return Err(LocalStoreError::NotFound(format!(
                "application {application_id} is not listed for job {job_id}"
            )));
        }

        let updated =
            self.applications.update_application(application_id, &decision.update()).await?;
        let mut result: Vec<Application> = local
            .iter()
            .map(|app| if app.id == application_id { updated.clone() } else { app.clone() })
            .collect();

        if let (ApplicationStatus::Accepted, Some(note)) = (decision.status, &decision.reject_others)
        {
            self.jobs.bulk_reject_pending(job_id, note).await?;
            let mut rejected = 0usize;
            for app in result.iter_mut().filter(|app| app.id != application_id && app.status.is_open())
            {
                app.status = ApplicationStatus::Rejected;
                app.owner_note = Some(note.clone());
                rejected += 1;
            }
            info!(job_id, rejected, "rejected remaining open applications");
        }

        Ok(result)
    }
}
