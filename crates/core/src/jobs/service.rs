//! Job detail service - a posting plus what the viewer may do with it

use std::sync::Arc;

use localstore_domain::{Application, Id, Job, Result};
use tracing::debug;

use crate::marketplace::ports::{ApplicationPort, JobBoardPort, ShopPort};

/// The viewer's relationship to a posting.
#[derive(Debug, Clone, PartialEq)]
pub enum JobViewer {
    Guest,
    /// The posting belongs to the viewer's shop.
    Owner { applications: Vec<Application> },
    /// Any other signed-in user; `application` is set once they applied.
    Seeker { application: Option<Application> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub job: Job,
    pub viewer: JobViewer,
}

/// Loads a [`JobView`].
pub struct JobDetailService {
    jobs: Arc<dyn JobBoardPort>,
    shops: Arc<dyn ShopPort>,
    applications: Arc<dyn ApplicationPort>,
}

impl JobDetailService {
    /// Create a new job detail service
    pub fn new(
        jobs: Arc<dyn JobBoardPort>,
        shops: Arc<dyn ShopPort>,
        applications: Arc<dyn ApplicationPort>,
    ) -> Self {
        Self { jobs, shops, applications }
    }

    /// Fetch the posting and resolve ownership.
    pub async fn load(&self, job_id: Id, signed_in: bool) -> Result<JobView> {
        let job = self.jobs.get_job(job_id).await?;
        if !signed_in {
            return Ok(JobView { job, viewer: JobViewer::Guest });
        }

        let owns_job = match self.shops.my_shop().await {
            Ok(shop) => shop.is_some_and(|shop| shop.id == job.shop.id),
            Err(err) if err.is_session_expired() => return Err(err),
            Err(err) => {
                debug!(error = %err, "shop lookup failed; treating viewer as job seeker");
                false
            }
        };

        let applications = self.applications.list_applications().await?;
        let mut for_job = applications.into_iter().filter(|app| app.job_id() == job_id);

        let viewer = if owns_job {
            JobViewer::Owner { applications: for_job.collect() }
        } else {
            JobViewer::Seeker { application: for_job.next() }
        };
        Ok(JobView { job, viewer })
    }
}
