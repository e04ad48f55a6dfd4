use clap::Subcommand;

/// Billing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BillingCommands {
    /// List available plans.
    Plans,
    /// Show the current subscription.
    Subscription,
}
