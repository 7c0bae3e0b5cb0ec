//! Job listing commands

use std::collections::HashMap;

use localstore_core::{FeedViewer, JobView};
use localstore_domain::constants::JOBS_PER_PAGE;
use localstore_domain::{ApplicationStatus, GeoPoint, Id, Job, Result as DomainResult, Shop};

use crate::context::AppContext;
use crate::utils::execute_command;

/// Listing filters.
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    pub search: String,
    /// 1-based page number.
    pub page: usize,
    /// When set, shops are ranked by distance from this point.
    pub near: Option<GeoPoint>,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self { search: String::new(), page: 1, near: None }
    }
}

/// Who the listing was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKind {
    Guest,
    ShopOwner,
    JobSeeker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyShop {
    pub shop: Shop,
    pub distance_km: Option<f64>,
}

/// One page of the home feed.
#[derive(Debug, Clone, PartialEq)]
pub struct JobListing {
    pub jobs: Vec<Job>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub viewer: ViewerKind,
    /// Application status per job for job seekers.
    pub statuses: HashMap<Id, ApplicationStatus>,
    /// Matching shops, nearest first; empty unless a location was given.
    pub shops: Vec<NearbyShop>,
}

/// Load the home feed and slice one page of matching jobs.
pub async fn list_jobs(ctx: &AppContext, query: &JobQuery) -> DomainResult<JobListing> {
    execute_command(ctx, "jobs::list_jobs", || async {
        let signed_in = ctx.session.is_authenticated().await?;
        let feed = ctx.home_feed.load(signed_in).await?;

        let page = feed.search_jobs(&query.search, query.page, JOBS_PER_PAGE);
        let shops = match query.near {
            Some(origin) => feed
                .search_shops(&query.search, Some(origin))
                .into_iter()
                .map(|ranked| NearbyShop { shop: ranked.shop.clone(), distance_km: ranked.distance_km })
                .collect(),
            None => Vec::new(),
        };
        let (viewer, statuses) = match &feed.viewer {
            FeedViewer::Guest => (ViewerKind::Guest, HashMap::new()),
            FeedViewer::ShopOwner { .. } => (ViewerKind::ShopOwner, HashMap::new()),
            FeedViewer::JobSeeker { statuses } => (ViewerKind::JobSeeker, statuses.clone()),
        };

        Ok(JobListing {
            jobs: page.items.into_iter().cloned().collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            viewer,
            statuses,
            shops,
        })
    })
    .await
}

/// A posting with the viewer's relationship to it.
pub async fn job_detail(ctx: &AppContext, job_id: Id) -> DomainResult<JobView> {
    execute_command(ctx, "jobs::job_detail", || async {
        let signed_in = ctx.session.is_authenticated().await?;
        ctx.job_details.load(job_id, signed_in).await
    })
    .await
}
