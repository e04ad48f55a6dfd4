use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ivr` binary.
#[derive(Debug, Parser)]
#[command(name = "ivr", version, about = "Intervue - asynchronous video interviews")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows for list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{
        AdminCommands, AuthCommands, QuestionCommands, ResultCommands, TokenCommands,
    };
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["ivr", "--format", "table", "--verbose", "auth", "status"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ivr", "interview", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["ivr", "--format", "xml", "auth", "status"]).is_err());
    }

    #[test]
    fn admin_login_flag() {
        let cli = Cli::try_parse_from([
            "ivr",
            "auth",
            "login",
            "--email",
            "ops@example.com",
            "--password",
            "pw",
            "--admin",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Auth {
                action: AuthCommands::Login(args),
            } => {
                assert!(args.admin);
                assert_eq!(args.email, "ops@example.com");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reorder_takes_ids_in_order() {
        let cli = Cli::try_parse_from(["ivr", "question", "reorder", "int-1", "q3", "q1", "q2"])
            .expect("cli should parse");
        match cli.command {
            Commands::Question {
                action: QuestionCommands::Reorder { interview_id, ids },
            } => {
                assert_eq!(interview_id, "int-1");
                assert_eq!(ids, vec!["q3", "q1", "q2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reorder_requires_ids() {
        assert!(Cli::try_parse_from(["ivr", "question", "reorder", "int-1"]).is_err());
    }

    #[test]
    fn token_list_filters() {
        let cli = Cli::try_parse_from([
            "ivr",
            "token",
            "list",
            "--interview",
            "int-1",
            "--status",
            "expired",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Token {
                action: TokenCommands::List { .. }
            }
        ));
    }

    #[test]
    fn result_note_and_star() {
        let cli = Cli::try_parse_from(["ivr", "result", "note", "r-1", "strong answer"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Result {
                action: ResultCommands::Note { .. }
            }
        ));
        assert!(Cli::try_parse_from(["ivr", "result", "star", "r-1"]).is_ok());
    }

    #[test]
    fn admin_set_takes_key_value_pairs() {
        let cli = Cli::try_parse_from([
            "ivr",
            "admin",
            "set",
            "maxTokensPerInterview=50",
            "maintenance=false",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Admin {
                action: AdminCommands::Set { pairs },
            } => assert_eq!(pairs.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_requires_token() {
        assert!(Cli::try_parse_from(["ivr", "run"]).is_err());
        let cli = Cli::try_parse_from(["ivr", "run", "--token", "abc", "--simulate", "--auto"])
            .expect("cli should parse");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.token, "abc");
                assert!(args.simulate);
                assert!(args.auto);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
