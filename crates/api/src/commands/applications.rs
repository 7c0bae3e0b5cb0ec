//! Application commands for job seekers and shop owners

use localstore_core::{ApplicationPort, Decision};
use localstore_domain::{Application, Id, Result as DomainResult};

use crate::context::AppContext;
use crate::utils::execute_command;

/// Applications visible to the signed-in user.
pub async fn my_applications(ctx: &AppContext) -> DomainResult<Vec<Application>> {
    execute_command(ctx, "applications::my_applications", || ctx.api.list_applications()).await
}

/// Decide on one application of a posting and return the posting's
/// applications as they now stand.
pub async fn decide(
    ctx: &AppContext,
    job_id: Id,
    application_id: Id,
    decision: &Decision,
) -> DomainResult<Vec<Application>> {
    execute_command(ctx, "applications::decide", || async {
        let current = ctx.applicants.applications_for_job(job_id).await?;
        ctx.applicants.decide(job_id, &current, application_id, decision).await
    })
    .await
}
