use clap::Subcommand;

/// Admin console commands. Require `ivr auth login --admin`.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Show system settings.
    Settings,
    /// Change settings: `key=value` pairs, values parsed as JSON when possible.
    Set {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// List users.
    Users,
    /// Show backend health.
    Health,
}
