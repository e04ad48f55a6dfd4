use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AdminCommands, AuthCommands, BillingCommands, InterviewCommands, ProfileCommands,
    QuestionCommands, ResultCommands, TokenCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in and out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Interviews.
    Interview {
        #[command(subcommand)]
        action: InterviewCommands,
    },
    /// Questions of an interview.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Candidate access tokens.
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },
    /// Candidate results.
    Result {
        #[command(subcommand)]
        action: ResultCommands,
    },
    /// Your profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Plans and subscription.
    Billing {
        #[command(subcommand)]
        action: BillingCommands,
    },
    /// Admin console.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Take an interview as a candidate.
    Run(RunArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Interview token received from the recruiter.
    #[arg(long)]
    pub token: String,
    /// Name shown to the recruiter.
    #[arg(long)]
    pub name: Option<String>,
    /// Use a synthetic capture instead of the configured capture program.
    #[arg(long)]
    pub simulate: bool,
    /// Continue to the next question automatically after each recording.
    #[arg(long)]
    pub auto: bool,
}
