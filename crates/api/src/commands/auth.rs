//! Sign-in, sign-out and account commands

use localstore_core::ProfilePort;
use localstore_domain::{Result as DomainResult, UserProfile};

use crate::context::AppContext;
use crate::utils::execute_command;

/// Sign in and persist the token pair. Clears any pending login redirect.
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> DomainResult<()> {
    execute_command(ctx, "auth::login", || ctx.session.login(username, password)).await?;
    ctx.session_guard.reset();
    Ok(())
}

/// Remove both stored tokens.
pub async fn logout(ctx: &AppContext) -> DomainResult<()> {
    execute_command(ctx, "auth::logout", || ctx.session.logout()).await
}

/// Profile of the signed-in user.
pub async fn current_user(ctx: &AppContext) -> DomainResult<UserProfile> {
    execute_command(ctx, "auth::current_user", || ctx.api.current_user()).await
}
