use clap::Subcommand;

/// Candidate result commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResultCommands {
    /// List results.
    List {
        #[arg(long)]
        interview: Option<String>,
        /// Only starred results.
        #[arg(long)]
        starred: bool,
    },
    /// Get a result with its answers.
    Get { id: String },
    /// Star a result.
    Star { id: String },
    /// Remove the star from a result.
    Unstar { id: String },
    /// Replace a result's notes.
    Note { id: String, text: String },
    /// Delete a result.
    Delete { id: String },
}
