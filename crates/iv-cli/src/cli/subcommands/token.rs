use clap::Subcommand;

/// Candidate token commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TokenCommands {
    /// List tokens.
    List {
        #[arg(long)]
        interview: Option<String>,
        /// active, used or expired.
        #[arg(long)]
        status: Option<String>,
    },
    /// Generate tokens for an interview.
    Generate {
        interview_id: String,
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Days until the tokens expire.
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    /// Revoke a token.
    Revoke { id: String },
}
