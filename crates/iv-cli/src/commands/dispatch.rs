use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Interview { action } => commands::interview::handle(&action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Token { action } => commands::token::handle(&action, ctx, flags).await,
        Commands::Result { action } => commands::result::handle(&action, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::Billing { action } => commands::billing::handle(&action, ctx, flags).await,
        Commands::Admin { action } => commands::admin::handle(&action, ctx, flags).await,
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
    }
}
