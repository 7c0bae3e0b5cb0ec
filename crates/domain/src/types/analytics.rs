//! Shop owner dashboard analytics

use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsKpis {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_applications: u64,
}

/// Per-job views and applications, for the performance chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPerformance {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub applications: u64,
}

/// Count of applications in one status, for the status breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub name: String,
    pub value: u64,
}

/// Response of `shops/analytics/`. Only shop owners may read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAnalytics {
    #[serde(default)]
    pub shop_verified: bool,
    #[serde(default)]
    pub kpis: AnalyticsKpis,
    #[serde(default)]
    pub jobs_performance: Vec<JobPerformance>,
    #[serde(default)]
    pub applications_status: Vec<StatusBreakdown>,
}

impl ShopAnalytics {
    /// Whether there is anything to show in the status breakdown.
    #[must_use]
    pub fn has_applications(&self) -> bool {
        self.kpis.total_applications > 0
    }
}
