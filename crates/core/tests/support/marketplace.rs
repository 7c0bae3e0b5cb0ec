//! In-memory marketplace implementing every core port.
//!
//! Records mutating calls so tests can assert on what reached the "server".

use std::sync::Arc;

use async_trait::async_trait;
use localstore_core::{ApplicationPort, JobBoardPort, ShopPort};
use localstore_domain::{
    Application, ApplicationStatus, ApplicationUpdate, CommentDraft, Id, Job,
    JobApplicationForm, LocalStoreError, NewJob, Result, Shop, ShopAnalytics,
};
use parking_lot::Mutex;

pub fn shop(id: Id, name: &str) -> Shop {
    Shop { id, company_name: name.into(), description: format!("{name} description"), ..Shop::default() }
}

pub fn job(id: Id, title: &str, shop: &Shop) -> Job {
    Job::new(id, title, shop.clone())
}

pub fn application(id: Id, job: Id, status: ApplicationStatus) -> Application {
    Application::new(id, job, status)
}

#[derive(Default)]
struct State {
    jobs: Vec<Job>,
    shops: Vec<Shop>,
    my_shop: Option<Shop>,
    my_shop_error: Option<LocalStoreError>,
    applications: Vec<Application>,
    applications_error: Option<LocalStoreError>,
    updates: Vec<(Id, ApplicationUpdate)>,
    bulk_rejections: Vec<(Id, String)>,
    bulk_reject_error: Option<LocalStoreError>,
}

/// Fake REST backend.
#[derive(Clone, Default)]
pub struct FakeMarketplace {
    state: Arc<Mutex<State>>,
}

impl FakeMarketplace {
    pub fn new(shops: Vec<Shop>, jobs: Vec<Job>) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock();
            state.shops = shops;
            state.jobs = jobs;
        }
        fake
    }

    pub fn owning(self, shop: Shop) -> Self {
        self.state.lock().my_shop = Some(shop);
        self
    }

    pub fn with_applications(self, applications: Vec<Application>) -> Self {
        self.state.lock().applications = applications;
        self
    }

    pub fn failing_my_shop(self, err: LocalStoreError) -> Self {
        self.state.lock().my_shop_error = Some(err);
        self
    }

    pub fn failing_applications(self, err: LocalStoreError) -> Self {
        self.state.lock().applications_error = Some(err);
        self
    }

    pub fn failing_bulk_reject(self, err: LocalStoreError) -> Self {
        self.state.lock().bulk_reject_error = Some(err);
        self
    }

    pub fn updates(&self) -> Vec<(Id, ApplicationUpdate)> {
        self.state.lock().updates.clone()
    }

    pub fn bulk_rejections(&self) -> Vec<(Id, String)> {
        self.state.lock().bulk_rejections.clone()
    }

    pub fn ports(&self) -> (Arc<dyn JobBoardPort>, Arc<dyn ShopPort>, Arc<dyn ApplicationPort>) {
        (Arc::new(self.clone()), Arc::new(self.clone()), Arc::new(self.clone()))
    }
}

#[async_trait]
impl JobBoardPort for FakeMarketplace {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.state.lock().jobs.clone())
    }

    async fn get_job(&self, id: Id) -> Result<Job> {
        self.state
            .lock()
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| LocalStoreError::NotFound(format!("job {id}")))
    }

    async fn create_job(&self, _job: &NewJob) -> Result<()> {
        Ok(())
    }

    async fn set_job_active(&self, id: Id, active: bool) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(job) = state.jobs.iter_mut().find(|job| job.id == id) {
            job.is_active = active;
        }
        Ok(())
    }

    async fn apply(&self, _job_id: Id, _form: &JobApplicationForm) -> Result<()> {
        Ok(())
    }

    async fn comment(&self, _job_id: Id, _draft: &CommentDraft) -> Result<()> {
        Ok(())
    }

    async fn delete_comment(&self, _comment_id: Id) -> Result<()> {
        Ok(())
    }

    async fn export_applicants_csv(&self, _job_id: Id) -> Result<Vec<u8>> {
        Ok(b"username,status\n".to_vec())
    }

    async fn bulk_reject_pending(&self, job_id: Id, owner_note: &str) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(err) = state.bulk_reject_error.clone() {
            return Err(err);
        }
        state.bulk_rejections.push((job_id, owner_note.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ShopPort for FakeMarketplace {
    async fn list_shops(&self) -> Result<Vec<Shop>> {
        Ok(self.state.lock().shops.clone())
    }

    async fn get_shop(&self, id: Id) -> Result<Shop> {
        self.state
            .lock()
            .shops
            .iter()
            .find(|shop| shop.id == id)
            .cloned()
            .ok_or_else(|| LocalStoreError::NotFound(format!("shop {id}")))
    }

    async fn my_shop(&self) -> Result<Option<Shop>> {
        let state = self.state.lock();
        match &state.my_shop_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.my_shop.clone()),
        }
    }

    async fn analytics(&self) -> Result<ShopAnalytics> {
        Err(LocalStoreError::Forbidden("not a shop owner".into()))
    }
}

#[async_trait]
impl ApplicationPort for FakeMarketplace {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        let state = self.state.lock();
        match &state.applications_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.applications.clone()),
        }
    }

    async fn update_application(&self, id: Id, update: &ApplicationUpdate) -> Result<Application> {
        let mut state = self.state.lock();
        state.updates.push((id, update.clone()));
        let app = state
            .applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or_else(|| LocalStoreError::NotFound(format!("application {id}")))?;
        app.status = update.status;
        app.owner_note.clone_from(&update.owner_note);
        Ok(app.clone())
    }
}
