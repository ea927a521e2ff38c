//! CLI entry point for the recipe-taxonomy tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod config_runtime;
mod terminal;

use app_config::load_default_file_config;
use cli::{Cli, Command, ConfigCommand};
use config_runtime::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded_config = load_default_file_config()?;
    let settings = Settings::resolve(&cli, &loaded_config);

    // Priority: RUST_LOG env var > -q/-v flags > config verbosity > default (info)
    terminal::init_tracing(settings.verbosity.filter_level());
    debug!(?cli, "CLI arguments parsed");

    match &cli.command {
        Command::Ingest(args) => commands::run_ingest_command(args, &settings).await,
        Command::Normalize(args) => commands::run_normalize_command(args, &settings).await,
        Command::Reset => commands::run_reset_command(&settings).await,
        Command::Config {
            command: ConfigCommand::Show,
        } => {
            commands::run_config_show_command(&settings);
            Ok(())
        }
    }
}
