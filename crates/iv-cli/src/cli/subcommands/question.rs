use clap::{Args, Subcommand};

/// Question commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// List an interview's questions in presentation order.
    List { interview_id: String },
    /// Add a question to an interview.
    Add {
        interview_id: String,
        #[command(flatten)]
        fields: QuestionFields,
    },
    /// Update a question.
    Update {
        id: String,
        #[command(flatten)]
        fields: QuestionFields,
    },
    /// Delete a question.
    Delete { id: String },
    /// Set the question order; list every question ID in the new order.
    Reorder {
        interview_id: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct QuestionFields {
    #[arg(long)]
    pub text: Option<String>,
    /// Preparation time in seconds.
    #[arg(long)]
    pub prep: Option<u32>,
    /// Recording time in seconds.
    #[arg(long)]
    pub record: Option<u32>,
    #[arg(long)]
    pub order: Option<u32>,
}
