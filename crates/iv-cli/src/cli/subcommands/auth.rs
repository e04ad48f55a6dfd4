use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout(AuthLogoutArgs),
    /// Show stored credentials.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Prefer `INTERVUE_PASSWORD` over passing this on the command line.
    #[arg(long, env = "INTERVUE_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Log in to the admin console instead.
    #[arg(long)]
    pub admin: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLogoutArgs {
    /// Only clear the admin login.
    #[arg(long)]
    pub admin: bool,
}
