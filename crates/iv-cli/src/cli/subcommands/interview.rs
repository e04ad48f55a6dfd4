use clap::{Args, Subcommand};

/// Interview commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InterviewCommands {
    /// List interviews.
    List {
        /// Only interviews in this status (draft, active, closed).
        #[arg(long)]
        status: Option<String>,
    },
    /// Get an interview by ID.
    Get { id: String },
    /// Create an interview.
    Create(InterviewFields),
    /// Update an interview.
    Update {
        id: String,
        #[command(flatten)]
        fields: InterviewFields,
    },
    /// Delete an interview.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct InterviewFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// draft, active or closed.
    #[arg(long)]
    pub status: Option<String>,
    /// Expected length in minutes.
    #[arg(long)]
    pub duration: Option<u32>,
}
