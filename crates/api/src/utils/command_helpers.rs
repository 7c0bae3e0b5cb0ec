//! Command execution helpers
//!
//! Every shell command runs through [`execute_command`] so timing, logging
//! and session expiry handling stay in one place.

use std::future::Future;
use std::time::Instant;

use localstore_domain::Result as DomainResult;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Execute a command with logging and session expiry handling
///
/// A `SessionExpired` error is reported to the session guard (which
/// schedules the login navigation once) and still returned to the caller.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext) -> Result<MyResponse> {
///     execute_command(ctx, "my_module::my_command", || async {
///         ctx.some_service.do_something().await
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(
    ctx: &AppContext,
    command_name: &str,
    command_fn: F,
) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());
    if let Err(err) = &result {
        ctx.session_guard.observe(err);
    }

    result
}
