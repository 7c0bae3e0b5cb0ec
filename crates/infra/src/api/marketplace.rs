//! Marketplace REST adapter
//!
//! Implements the `localstore-core` ports on top of [`ApiClient`]. Paths are
//! relative to the configured base address.

use std::sync::Arc;

use async_trait::async_trait;
use localstore_core::{ApplicationPort, AuthPort, JobBoardPort, ProfilePort, ShopPort};
use localstore_domain::constants::TOKEN_OBTAIN_PATH;
use localstore_domain::{
    Application, ApplicationUpdate, CommentDraft, Credentials, Id, Job, JobApplicationForm,
    LocalStoreError, NewJob, PasswordChange, Registration, Result, Shop, ShopAnalytics,
    ShopOwnerSignup, TokenPair, Upload, UserProfile, UserRole,
};
use reqwest::Method;
use serde::de::IgnoredAny;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::client::ApiClient;
use super::request::{MultipartForm, RequestOptions};

const USERS_PATH: &str = "users/";

/// REST implementation of the marketplace ports.
#[derive(Debug, Clone)]
pub struct MarketplaceApi {
    client: Arc<ApiClient>,
}

impl MarketplaceApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}

fn shop_owner_form(signup: &ShopOwnerSignup) -> MultipartForm {
    let (latitude, longitude) = match signup.coordinates {
        Some(point) => (Some(point.lat.to_string()), Some(point.lng.to_string())),
        None => (None, None),
    };

    MultipartForm::new()
        .text("username", signup.username.clone())
        .text("email", signup.email.clone())
        .text("mobile_number", signup.mobile_number.clone())
        .text("password", signup.password.clone())
        .text("role", UserRole::ShopOwner.to_string())
        .text("company_name", signup.company_name.clone())
        .text("description", signup.description.clone())
        .text("location", signup.location.clone())
        .optional_text("latitude", latitude)
        .optional_text("longitude", longitude)
        .optional_file("logo", signup.logo.clone())
}

fn new_job_form(job: &NewJob) -> MultipartForm {
    job.text_fields()
        .into_iter()
        .fold(MultipartForm::new(), |form, (name, value)| form.optional_text(name, Some(value)))
        .optional_file("image", job.image.clone())
}

fn application_form(form: &JobApplicationForm) -> MultipartForm {
    let meets = if form.meets_requirements { "True" } else { "False" };
    MultipartForm::new()
        .text("meets_requirements", meets)
        .optional_text("notes", form.notes.clone())
        .optional_file("cv", form.cv.clone())
}

#[async_trait]
impl AuthPort for MarketplaceApi {
    async fn obtain_tokens(&self, credentials: &Credentials) -> Result<TokenPair> {
        let pair = self
            .client
            .with_options(RequestOptions::anonymous())
            .post(TOKEN_OBTAIN_PATH, credentials)
            .await?;
        debug!(username = %credentials.username, "obtained token pair");
        Ok(pair)
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let scope = self.client.with_options(RequestOptions::anonymous());
        match registration {
            Registration::JobSeeker { username, email, mobile_number, password } => {
                let body = json!({
                    "username": username,
                    "email": email,
                    "mobile_number": mobile_number,
                    "password": password,
                    "role": UserRole::JobSeeker.to_string(),
                });
                let _: IgnoredAny = scope.post(USERS_PATH, &body).await?;
            }
            Registration::ShopOwner(signup) => {
                let _: IgnoredAny =
                    scope.multipart(Method::POST, USERS_PATH, shop_owner_form(signup)).await?;
            }
        }
        info!("account registered");
        Ok(())
    }
}

#[async_trait]
impl JobBoardPort for MarketplaceApi {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.client.get("jobs/").await?)
    }

    async fn get_job(&self, id: Id) -> Result<Job> {
        Ok(self.client.get(&format!("jobs/{id}/")).await?)
    }

    async fn create_job(&self, job: &NewJob) -> Result<()> {
        if job.title.trim().is_empty() {
            return Err(LocalStoreError::InvalidInput("job title is required".into()));
        }
        let _: IgnoredAny = self.client.multipart(Method::POST, "jobs/", new_job_form(job)).await?;
        info!(title = %job.title, "job posted");
        Ok(())
    }

    async fn set_job_active(&self, id: Id, active: bool) -> Result<()> {
        let _: IgnoredAny =
            self.client.patch(&format!("jobs/{id}/"), &json!({ "is_active": active })).await?;
        Ok(())
    }

    async fn apply(&self, job_id: Id, form: &JobApplicationForm) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .multipart(Method::POST, &format!("jobs/{job_id}/apply/"), application_form(form))
            .await?;
        info!(job_id, "application submitted");
        Ok(())
    }

    async fn comment(&self, job_id: Id, draft: &CommentDraft) -> Result<()> {
        let _: IgnoredAny = self.client.post(&format!("jobs/{job_id}/comment/"), draft).await?;
        Ok(())
    }

    async fn delete_comment(&self, comment_id: Id) -> Result<()> {
        let _: IgnoredAny = self.client.delete(&format!("comments/{comment_id}/")).await?;
        Ok(())
    }

    async fn export_applicants_csv(&self, job_id: Id) -> Result<Vec<u8>> {
        let bytes =
            self.client.get_bytes(&format!("jobs/{job_id}/export_applicants_csv/")).await?;
        Ok(bytes.to_vec())
    }

    async fn bulk_reject_pending(&self, job_id: Id, owner_note: &str) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .post(&format!("jobs/{job_id}/bulk_reject_pending/"), &json!({ "owner_note": owner_note }))
            .await?;
        info!(job_id, "pending applications rejected");
        Ok(())
    }
}

#[async_trait]
impl ShopPort for MarketplaceApi {
    async fn list_shops(&self) -> Result<Vec<Shop>> {
        Ok(self.client.get("shops/").await?)
    }

    async fn get_shop(&self, id: Id) -> Result<Shop> {
        Ok(self.client.get(&format!("shops/{id}/")).await?)
    }

    async fn my_shop(&self) -> Result<Option<Shop>> {
        match self.client.get::<Shop>("shops/my_shop/").await.map_err(LocalStoreError::from) {
            Ok(shop) => Ok(Some(shop)),
            // Users without a shop get 403 or 404.
            Err(err) if err.is_not_permitted() => {
                debug!(error = %err, "user owns no shop");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn analytics(&self) -> Result<ShopAnalytics> {
        Ok(self.client.get("shops/analytics/").await?)
    }
}

#[async_trait]
impl ApplicationPort for MarketplaceApi {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        Ok(self.client.get("applications/").await?)
    }

    async fn update_application(&self, id: Id, update: &ApplicationUpdate) -> Result<Application> {
        Ok(self.client.patch(&format!("applications/{id}/"), update).await?)
    }
}

#[async_trait]
impl ProfilePort for MarketplaceApi {
    async fn current_user(&self) -> Result<UserProfile> {
        Ok(self.client.get("users/me/").await?)
    }

    async fn update_profile_photo(&self, photo: Upload) -> Result<UserProfile> {
        let form = MultipartForm::new().file("profile_photo", photo);
        Ok(self.client.multipart(Method::PATCH, "users/update_profile/", form).await?)
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>> {
        let response: Value = self.client.post("users/change_password/", change).await?;
        info!("password changed");
        Ok(["detail", "message"]
            .iter()
            .find_map(|key| response.get(key).and_then(Value::as_str))
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use localstore_domain::{GeoPoint, JobType};

    use super::*;

    #[test]
    fn shop_owner_form_carries_role_and_coordinates() {
        let signup = ShopOwnerSignup {
            username: "corner".into(),
            email: "owner@example.com".into(),
            mobile_number: "9800000000".into(),
            password: "secret".into(),
            company_name: "Corner Bakery".into(),
            description: "Fresh bread".into(),
            location: "MG Road".into(),
            coordinates: Some(GeoPoint::new(12.5, 77.25)),
            logo: Some(Upload::new("logo.png", vec![0x89])),
        };

        let form = shop_owner_form(&signup);
        assert_eq!(form.text_value("role"), Some("SHOP_OWNER"));
        assert_eq!(form.text_value("latitude"), Some("12.5"));
        assert_eq!(form.text_value("longitude"), Some("77.25"));
        assert!(form.field_names().any(|name| name == "logo"));
    }

    #[test]
    fn shop_owner_form_omits_missing_coordinates() {
        let signup = ShopOwnerSignup {
            username: "corner".into(),
            email: "owner@example.com".into(),
            mobile_number: String::new(),
            password: "secret".into(),
            company_name: "Corner Bakery".into(),
            description: String::new(),
            location: String::new(),
            coordinates: None,
            logo: None,
        };

        let names: Vec<_> = shop_owner_form(&signup).field_names().map(str::to_string).collect();
        assert!(!names.iter().any(|n| n == "latitude" || n == "longitude" || n == "logo"));
    }

    #[test]
    fn job_form_skips_blank_fields() {
        let job = NewJob {
            title: "Baker".into(),
            salary_range: "  ".into(),
            job_type: JobType::PartTime,
            ..NewJob::default()
        };

        let form = new_job_form(&job);
        assert_eq!(form.text_value("title"), Some("Baker"));
        assert_eq!(form.text_value("salary_range"), None);
        assert_eq!(form.text_value("job_type"), Some("PART_TIME"));
    }

    #[test]
    fn application_form_always_sends_requirements_flag() {
        let form = application_form(&JobApplicationForm::default());
        assert_eq!(form.text_value("meets_requirements"), Some("True"));
        assert_eq!(form.field_names().count(), 1);
    }
}
