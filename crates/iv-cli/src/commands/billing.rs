use serde::Serialize;

use iv_core::entities::{Plan, Subscription};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BillingCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PlanListResponse {
    plans: Vec<Plan>,
}

#[derive(Serialize)]
struct SubscriptionResponse {
    subscribed: bool,
    subscription: Option<Subscription>,
}

/// Handle `ivr billing`.
pub async fn handle(
    action: &BillingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        BillingCommands::Plans => {
            let plans = ctx.api.list_plans().await?;
            output(&PlanListResponse { plans }, flags.format)
        }
        BillingCommands::Subscription => {
            let subscription = ctx.api.subscription().await?;
            output(
                &SubscriptionResponse {
                    subscribed: subscription.is_some(),
                    subscription,
                },
                flags.format,
            )
        }
    }
}
