//! Job postings and their comment threads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shop::Shop;
use super::Id;

/// Employment type. Values the client does not know are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
    Other(String),
}

impl From<String> for JobType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FULL_TIME" => Self::FullTime,
            "PART_TIME" => Self::PartTime,
            "CONTRACT" => Self::Contract,
            "INTERNSHIP" => Self::Internship,
            "TEMPORARY" => Self::Temporary,
            _ => Self::Other(value),
        }
    }
}

impl From<JobType> for String {
    fn from(value: JobType) -> Self {
        match value {
            JobType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl JobType {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Contract => "CONTRACT",
            Self::Internship => "INTERNSHIP",
            Self::Temporary => "TEMPORARY",
            Self::Other(other) => other,
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comment on a job posting; replies are nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    #[serde(default)]
    pub user: Option<Id>,
    #[serde(default)]
    pub username: Option<String>,
    pub text: String,
    #[serde(default)]
    pub parent: Option<Id>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Id,
    pub shop: Shop,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills_required: Option<String>,
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub education_required: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Job {
    /// An active posting with no optional details.
    pub fn new(id: Id, title: impl Into<String>, shop: Shop) -> Self {
        Self {
            id,
            shop,
            title: title.into(),
            description: String::new(),
            skills_required: None,
            experience_required: None,
            education_required: None,
            salary_range: None,
            job_type: JobType::default(),
            image: None,
            is_active: true,
            views: 0,
            created_at: None,
            comments: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
