use localstore_core::ShopPort;
use localstore_domain::{Result as DomainResult, ShopAnalytics};

use crate::context::AppContext;
use crate::utils::execute_command;

/// Dashboard figures for the signed-in shop owner.
pub async fn shop_analytics(ctx: &AppContext) -> DomainResult<ShopAnalytics> {
    execute_command(ctx, "analytics::shop_analytics", || ctx.api.analytics()).await
}
