//! Config command handlers: show effective configuration.

use crate::config_runtime::Settings;

pub(crate) fn run_config_show_command(settings: &Settings) {
    let resolved_path = settings.config_path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if settings.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("database_path = {}", settings.database_path.display());
    println!(
        "base_table = {}",
        settings
            .base_table
            .as_ref()
            .map_or_else(|| "builtin".to_string(), |path| path.display().to_string())
    );
    println!("main_ingredient_limit = {}", settings.main_ingredient_limit);
    println!("source_label = {}", settings.source_label);
    println!("verbosity = {}", settings.verbosity.as_str());
    println!("db_max_connections = {}", settings.db_options.max_connections);
    println!("db_busy_timeout_ms = {}", settings.db_options.busy_timeout_ms);
}
