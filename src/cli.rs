//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Build and normalize a recipe ingredient catalog.
///
/// Recipe-taxonomy ingests exported recipe rows, splits their ingredient
/// listings into named items, and maps every stored ingredient onto a small
/// vocabulary of base ingredients.
#[derive(Parser, Debug)]
#[command(name = "recipe-taxonomy")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// SQLite database file (overrides `database_path` in config)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import recipe records from a JSON Lines file
    Ingest(IngestArgs),
    /// Map stored ingredients onto base ingredients
    Normalize(NormalizeArgs),
    /// Clear every ingredient's parent assignment
    Reset,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `ingest`.
#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// JSON Lines file, one recipe record per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Label stored in each recipe's source column
    #[arg(long, value_name = "LABEL")]
    pub source: Option<String>,

    /// Leading ingredients per record that get the main category (1-50)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=50))]
    pub main_limit: Option<u8>,
}

/// Arguments for `normalize`.
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// JSON base-ingredient table to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub table: Option<PathBuf>,
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_ingest_parses_file_and_defaults() {
        let cli = Cli::try_parse_from(["recipe-taxonomy", "ingest", "recipes.jsonl"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.db.is_none());
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest command");
        };
        assert_eq!(args.file, PathBuf::from("recipes.jsonl"));
        assert!(args.source.is_none());
        assert!(args.main_limit.is_none());
    }

    #[test]
    fn test_cli_ingest_overrides() {
        let cli = Cli::try_parse_from([
            "recipe-taxonomy",
            "ingest",
            "in.jsonl",
            "--source",
            "feed",
            "--main-limit",
            "5",
        ])
        .unwrap();
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest command");
        };
        assert_eq!(args.source.as_deref(), Some("feed"));
        assert_eq!(args.main_limit, Some(5));
    }

    #[test]
    fn test_cli_main_limit_out_of_range_rejected() {
        for value in ["0", "51"] {
            let err = Cli::try_parse_from([
                "recipe-taxonomy",
                "ingest",
                "in.jsonl",
                "--main-limit",
                value,
            ])
            .unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cli_ingest_requires_file() {
        let err = Cli::try_parse_from(["recipe-taxonomy", "ingest"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["recipe-taxonomy", "normalize", "-vv", "--db", "x.db"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Command::Normalize(NormalizeArgs { table: None })));
    }

    #[test]
    fn test_cli_normalize_table_flag() {
        let cli =
            Cli::try_parse_from(["recipe-taxonomy", "normalize", "--table", "bases.json"]).unwrap();
        let Command::Normalize(args) = cli.command else {
            panic!("expected normalize command");
        };
        assert_eq!(args.table, Some(PathBuf::from("bases.json")));
    }

    #[test]
    fn test_cli_reset_and_config_show() {
        let cli = Cli::try_parse_from(["recipe-taxonomy", "-q", "reset"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Reset));

        let cli = Cli::try_parse_from(["recipe-taxonomy", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Show
            }
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let err = Cli::try_parse_from(["recipe-taxonomy"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | clap::error::ErrorKind::MissingSubcommand
        ));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Cli::try_parse_from(["recipe-taxonomy", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Cli::try_parse_from(["recipe-taxonomy", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Cli::try_parse_from(["recipe-taxonomy", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
