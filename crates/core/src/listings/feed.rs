//! Home feed service - jobs, shops and the viewer's relationship to them

use std::collections::HashMap;
use std::sync::Arc;

use localstore_domain::{ApplicationStatus, GeoPoint, Id, Job, Result, Shop};
use tracing::{debug, warn};

use super::filter::{filter_jobs, filter_shops};
use super::geo::{rank_shops_by_distance, RankedShop};
use super::paging::{paginate, Page};
use crate::applicants::application_status_map;
use crate::marketplace::ports::{ApplicationPort, JobBoardPort, ShopPort};

/// Who is looking at the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedViewer {
    /// Not signed in.
    Guest,
    /// Signed-in shop owner; the feed only holds their own postings.
    ShopOwner { shop: Shop },
    /// Signed-in job seeker with the status of each job applied to.
    JobSeeker { statuses: HashMap<Id, ApplicationStatus> },
}

/// Everything the landing page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub jobs: Vec<Job>,
    pub shops: Vec<Shop>,
    pub viewer: FeedViewer,
}

impl HomeFeed {
    /// Jobs matching `term`, one page at a time.
    #[must_use]
    pub fn search_jobs(&self, term: &str, page: usize, per_page: usize) -> Page<&Job> {
        paginate(&filter_jobs(&self.jobs, term), page, per_page)
    }

    /// Shops matching `term`, nearest first when an origin is known.
    #[must_use]
    pub fn search_shops(&self, term: &str, origin: Option<GeoPoint>) -> Vec<RankedShop<'_>> {
        let hits = filter_shops(&self.shops, term);
        match origin {
            Some(origin) => rank_shops_by_distance(hits, origin),
            None => hits.into_iter().map(|shop| RankedShop { shop, distance_km: None }).collect(),
        }
    }

    /// Application status for a job, when the viewer is a job seeker who
    /// applied.
    #[must_use]
    pub fn status_for(&self, job_id: Id) -> Option<ApplicationStatus> {
        match &self.viewer {
            FeedViewer::JobSeeker { statuses } => statuses.get(&job_id).copied(),
            _ => None,
        }
    }

    /// Flip a posting's active flag locally after the server accepted it.
    pub fn mark_active(&mut self, job_id: Id, active: bool) {
        if let Some(job) = self.jobs.iter_mut().find(|job| job.id == job_id) {
            job.is_active = active;
        }
    }
}

/// Builds the [`HomeFeed`].
pub struct HomeFeedService {
    jobs: Arc<dyn JobBoardPort>,
    shops: Arc<dyn ShopPort>,
    applications: Arc<dyn ApplicationPort>,
}

impl HomeFeedService {
    /// Create a new home feed service
    pub fn new(
        jobs: Arc<dyn JobBoardPort>,
        shops: Arc<dyn ShopPort>,
        applications: Arc<dyn ApplicationPort>,
    ) -> Self {
        Self { jobs, shops, applications }
    }

    /// Fetch jobs and shops concurrently, then resolve the viewer.
    ///
    /// Failing to resolve the viewer degrades to the job seeker view, except
    /// for an expired session, which always propagates.
    pub async fn load(&self, signed_in: bool) -> Result<HomeFeed> {
        let (mut jobs, shops) = futures::try_join!(self.jobs.list_jobs(), self.shops.list_shops())?;
        debug!(jobs = jobs.len(), shops = shops.len(), "home feed fetched");

        if !signed_in {
            return Ok(HomeFeed { jobs, shops, viewer: FeedViewer::Guest });
        }

        let my_shop = match self.shops.my_shop().await {
            Ok(shop) => shop,
            Err(err) if err.is_session_expired() => return Err(err),
            Err(err) => {
                debug!(error = %err, "shop lookup failed; treating viewer as job seeker");
                None
            }
        };

        let viewer = match my_shop {
            Some(shop) => {
                jobs.retain(|job| job.shop.id == shop.id);
                FeedViewer::ShopOwner { shop }
            }
            None => {
                let statuses = match self.applications.list_applications().await {
                    Ok(applications) => application_status_map(&applications),
                    Err(err) if err.is_session_expired() => return Err(err),
                    Err(err) => {
                        warn!(error = %err, "failed to fetch application statuses");
                        HashMap::new()
                    }
                };
                FeedViewer::JobSeeker { statuses }
            }
        };

        Ok(HomeFeed { jobs, shops, viewer })
    }
}
