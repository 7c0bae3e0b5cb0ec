//! Write-side payloads
//!
//! Multipart forms are described here as plain data; the transport decides
//! how to encode them so a request can be rebuilt when it is re-issued.

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::job::JobType;
use super::Id;
use crate::errors::{LocalStoreError, Result};

/// A file attached to a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A job posting as created by a shop owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub skills_required: String,
    pub experience_required: String,
    pub education_required: String,
    pub salary_range: String,
    pub job_type: JobType,
    pub image: Option<Upload>,
}

impl NewJob {
    /// Text fields in the order the API form declares them.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("skills_required", self.skills_required.clone()),
            ("experience_required", self.experience_required.clone()),
            ("education_required", self.education_required.clone()),
            ("salary_range", self.salary_range.clone()),
            ("job_type", String::from(self.job_type.clone())),
        ]
    }
}

/// An application submitted by a job seeker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplicationForm {
    pub notes: Option<String>,
    pub cv: Option<Upload>,
    pub meets_requirements: bool,
}

impl Default for JobApplicationForm {
    fn default() -> Self {
        Self { notes: None, cv: None, meets_requirements: true }
    }
}

/// Shop owner registration details.
#[derive(Clone, PartialEq)]
pub struct ShopOwnerSignup {
    pub username: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    pub company_name: String,
    pub description: String,
    pub location: String,
    pub coordinates: Option<GeoPoint>,
    pub logo: Option<Upload>,
}

impl std::fmt::Debug for ShopOwnerSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopOwnerSignup")
            .field("username", &self.username)
            .field("company_name", &self.company_name)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Account registration. Job seekers send JSON; shop owners send a
/// multipart form so a logo can be attached.
#[derive(Clone, PartialEq)]
pub enum Registration {
    JobSeeker { username: String, email: String, mobile_number: String, password: String },
    ShopOwner(ShopOwnerSignup),
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JobSeeker { username, .. } => {
                f.debug_struct("JobSeeker").field("username", username).finish_non_exhaustive()
            }
            Self::ShopOwner(signup) => signup.fmt(f),
        }
    }
}

/// Body of `POST jobs/{id}/comment/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
}

impl CommentDraft {
    /// Builds a comment (or a reply when `parent` is set).
    ///
    /// # Errors
    /// Returns `InvalidInput` for blank text.
    pub fn new(text: &str, parent: Option<Id>) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LocalStoreError::InvalidInput("comment text is empty".into()));
        }
        Ok(Self { text: text.to_string(), parent })
    }
}

/// Body of `POST users/change_password/`.
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_is_trimmed_and_required() {
        let draft = CommentDraft::new("  Still hiring?  ", None).unwrap();
        assert_eq!(draft.text, "Still hiring?");
        assert!(matches!(CommentDraft::new("   ", Some(3)), Err(LocalStoreError::InvalidInput(_))));
    }

    #[test]
    fn reply_serializes_parent() {
        let reply = CommentDraft::new("Yes", Some(7)).unwrap();
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"text": "Yes", "parent": 7})
        );
    }

    #[test]
    fn new_job_fields_include_wire_job_type() {
        let job = NewJob { title: "Baker".into(), job_type: JobType::Contract, ..NewJob::default() };
        let fields = job.text_fields();
        assert!(fields.contains(&("job_type", "CONTRACT".to_string())));
        assert_eq!(fields[0], ("title", "Baker".to_string()));
    }

    #[test]
    fn upload_debug_hides_content() {
        let upload = Upload::new("cv.pdf", vec![1, 2, 3]).with_content_type("application/pdf");
        let rendered = format!("{upload:?}");
        assert!(rendered.contains("cv.pdf"));
        assert!(rendered.contains("len: 3"));
    }
}
