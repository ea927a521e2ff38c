//! Effective runtime settings: CLI flags layered over the config file.
//!
//! Priority is CLI flag, then config file, then built-in default.

use std::path::PathBuf;

use recipe_taxonomy::DatabaseOptions;
use recipe_taxonomy::ingest::{DEFAULT_MAIN_INGREDIENT_LIMIT, DEFAULT_SOURCE_LABEL, IngestOptions};

use crate::app_config::{FileConfig, LoadedConfig, VerbositySetting};
use crate::cli::Cli;

/// Database file used when neither `--db` nor `database_path` is set.
pub(crate) const DEFAULT_DATABASE_PATH: &str = "recipes.db";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub config_path: Option<PathBuf>,
    pub loaded_from_file: bool,
    pub database_path: PathBuf,
    pub base_table: Option<PathBuf>,
    pub source_label: String,
    pub main_ingredient_limit: usize,
    pub verbosity: VerbositySetting,
    pub db_options: DatabaseOptions,
}

impl Settings {
    pub(crate) fn resolve(cli: &Cli, loaded: &LoadedConfig) -> Self {
        let empty = FileConfig::default();
        let file = loaded.config.as_ref().unwrap_or(&empty);
        let defaults = DatabaseOptions::default();

        Self {
            config_path: loaded.path.clone(),
            loaded_from_file: loaded.loaded_from_file,
            database_path: cli
                .db
                .clone()
                .or_else(|| file.database_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            base_table: file.base_table.clone(),
            source_label: file
                .source_label
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
            main_ingredient_limit: file
                .main_ingredient_limit
                .unwrap_or(DEFAULT_MAIN_INGREDIENT_LIMIT),
            verbosity: VerbositySetting::from_flags(cli.verbose, cli.quiet, file.verbosity),
            db_options: DatabaseOptions {
                max_connections: file.db_max_connections.unwrap_or(defaults.max_connections),
                busy_timeout_ms: file.db_busy_timeout_ms.unwrap_or(defaults.busy_timeout_ms),
            },
        }
    }

    /// Ingest options with optional per-command overrides applied.
    pub(crate) fn ingest_options(&self, source: Option<&str>, main_limit: Option<u8>) -> IngestOptions {
        IngestOptions {
            source_label: source.map_or_else(|| self.source_label.clone(), str::to_string),
            main_ingredient_limit: main_limit.map_or(self.main_ingredient_limit, usize::from),
            ..IngestOptions::default()
        }
    }
}
