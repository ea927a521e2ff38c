//! Normalize command handler: map stored ingredients onto base ingredients.

use anyhow::{Context, Result};
use recipe_taxonomy::taxonomy::find_keyword_conflicts;
use recipe_taxonomy::{BaseIngredientTable, normalize_ingredients};
use tracing::info;

use crate::cli::NormalizeArgs;
use crate::config_runtime::Settings;

/// Ingredients listed per base in the summary.
const CHILD_PREVIEW_LIMIT: i64 = 5;

/// Unmapped ingredients listed after the summary.
const UNMAPPED_PREVIEW_LIMIT: i64 = 20;

pub(crate) async fn run_normalize_command(args: &NormalizeArgs, settings: &Settings) -> Result<()> {
    let table_path = args.table.as_ref().or(settings.base_table.as_ref());
    let table = match table_path {
        Some(path) => BaseIngredientTable::from_json_file(path)
            .with_context(|| format!("Failed to load base-ingredient table '{}'", path.display()))?,
        None => BaseIngredientTable::builtin(),
    };
    let table_label =
        table_path.map_or_else(|| "builtin".to_string(), |path| path.display().to_string());
    info!(bases = table.len(), table = %table_label, "Loaded base-ingredient table");

    let conflicts = find_keyword_conflicts(&table);
    for conflict in &conflicts {
        println!("Shared keyword: {conflict}");
    }

    let catalog = super::open_catalog(settings).await?;
    let report = normalize_ingredients(&catalog, &table).await.map_err(|err| {
        let hint = err.clone();
        super::catalog_failure(err, Some(&hint), "Normalization failed")
    })?;

    for outcome in report.bases.iter().filter(|outcome| outcome.mapped > 0) {
        let children = catalog.children_of(&outcome.name, CHILD_PREVIEW_LIMIT).await?;
        let preview: Vec<_> = children.iter().map(|child| child.name.as_str()).collect();
        println!("  {}: {} ({})", outcome.name, outcome.mapped, preview.join(", "));
    }

    let unmapped = catalog.unmapped_ingredients(UNMAPPED_PREVIEW_LIMIT).await?;
    let stats = catalog.taxonomy_stats().await?;
    catalog.database().clone().close().await;

    println!("{report}");
    println!("Taxonomy: {stats}");
    if !unmapped.is_empty() {
        let names: Vec<_> = unmapped.iter().map(|row| row.name.as_str()).collect();
        println!("Unmapped sample: {}", names.join(", "));
    }
    Ok(())
}
