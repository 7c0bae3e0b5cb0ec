//! Port interfaces for the marketplace REST API
//!
//! These traits define the boundaries between core business logic and the
//! HTTP adapter. All calls go through the authenticated client, so any of
//! them may fail with `LocalStoreError::SessionExpired`.

use async_trait::async_trait;
use localstore_domain::{
    Application, ApplicationUpdate, CommentDraft, Id, Job, JobApplicationForm, NewJob,
    PasswordChange, Result, Shop, ShopAnalytics, Upload, UserProfile,
};

/// Job postings, applications to them, and their comment threads.
#[async_trait]
pub trait JobBoardPort: Send + Sync {
    /// All visible job postings.
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// A single posting with its comments.
    async fn get_job(&self, id: Id) -> Result<Job>;

    /// Publish a posting for the signed-in shop owner.
    async fn create_job(&self, job: &NewJob) -> Result<()>;

    /// Open or close a posting.
    async fn set_job_active(&self, id: Id, active: bool) -> Result<()>;

    /// Apply to a posting as the signed-in job seeker.
    async fn apply(&self, job_id: Id, form: &JobApplicationForm) -> Result<()>;

    /// Post a comment, or a reply when the draft has a parent.
    async fn comment(&self, job_id: Id, draft: &CommentDraft) -> Result<()>;

    /// Remove one of the user's comments.
    async fn delete_comment(&self, comment_id: Id) -> Result<()>;

    /// Applicants for a posting as CSV bytes.
    async fn export_applicants_csv(&self, job_id: Id) -> Result<Vec<u8>>;

    /// Reject every still-open application for a posting.
    async fn bulk_reject_pending(&self, job_id: Id, owner_note: &str) -> Result<()>;
}

/// Shops and shop-owner views.
#[async_trait]
pub trait ShopPort: Send + Sync {
    /// All shops.
    async fn list_shops(&self) -> Result<Vec<Shop>>;

    /// A single shop.
    async fn get_shop(&self, id: Id) -> Result<Shop>;

    /// The signed-in user's shop, `None` when the user owns no shop.
    async fn my_shop(&self) -> Result<Option<Shop>>;

    /// Dashboard analytics for the signed-in shop owner.
    async fn analytics(&self) -> Result<ShopAnalytics>;
}

/// Applications visible to the signed-in user (own applications for job
/// seekers, received applications for shop owners).
#[async_trait]
pub trait ApplicationPort: Send + Sync {
    async fn list_applications(&self) -> Result<Vec<Application>>;

    /// Change an application's status, optionally leaving a note.
    async fn update_application(&self, id: Id, update: &ApplicationUpdate)
        -> Result<Application>;
}

/// The signed-in user's account.
#[async_trait]
pub trait ProfilePort: Send + Sync {
    async fn current_user(&self) -> Result<UserProfile>;

    async fn update_profile_photo(&self, photo: Upload) -> Result<UserProfile>;

    /// Change the password; returns the server's confirmation message.
    async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>>;
}
