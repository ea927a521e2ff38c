//! CLI command handlers.

mod config;
mod ingest;
mod normalize;
mod reset;

pub(crate) use config::run_config_show_command;
pub(crate) use ingest::run_ingest_command;
pub(crate) use normalize::run_normalize_command;
pub(crate) use reset::run_reset_command;

use anyhow::{Context, Result};
use recipe_taxonomy::{Catalog, CatalogError, Database};
use tracing::debug;

use crate::config_runtime::Settings;

/// Opens (creating if needed) the configured database and wraps it in a catalog.
async fn open_catalog(settings: &Settings) -> Result<Catalog> {
    let path = &settings.database_path;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory '{}'", parent.display())
        })?;
    }

    let db = Database::with_options(path, &settings.db_options)
        .await
        .with_context(|| format!("Failed to open database '{}'", path.display()))?;
    debug!(path = %path.display(), "database opened");
    Ok(Catalog::new(db))
}

/// Wraps a failed catalog call, adding a hint when the database was locked.
fn catalog_failure<E>(error: E, catalog_error: Option<&CatalogError>, action: &str) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = if catalog_error.is_some_and(CatalogError::is_busy_or_locked) {
        format!(
            "{action}\n  Suggestion: Another process is writing to the database; wait for it to finish or raise db_busy_timeout_ms"
        )
    } else {
        action.to_string()
    };
    anyhow::Error::new(error).context(message)
}
