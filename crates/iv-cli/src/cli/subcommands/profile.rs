use clap::Subcommand;

/// Profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show your profile.
    Get,
    /// Update your profile.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Change your password.
    Password {
        #[arg(long, env = "INTERVUE_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "INTERVUE_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
}
