//! Ingest command handler: import JSON Lines recipe records.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use recipe_taxonomy::ingest::{IngestError, RecordReader};
use recipe_taxonomy::{IngestStats, Ingestor};
use tracing::{info, warn};

use crate::cli::IngestArgs;
use crate::config_runtime::Settings;
use crate::terminal;

pub(crate) async fn run_ingest_command(args: &IngestArgs, settings: &Settings) -> Result<()> {
    if !args.file.is_file() {
        bail!(
            "Input file not found: '{}'\n  Suggestion: Pass a JSON Lines file with one recipe record per line",
            args.file.display()
        );
    }
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open input file '{}'", args.file.display()))?;

    let catalog = super::open_catalog(settings).await?;
    let options = settings.ingest_options(args.source.as_deref(), args.main_limit);
    info!(
        file = %args.file.display(),
        source = %options.source_label,
        main_limit = options.main_ingredient_limit,
        "Ingesting records"
    );
    let ingestor = Ingestor::new(&catalog, options);

    let progress = if terminal::progress_enabled(settings.verbosity.is_quiet()) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed}] {pos} records {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut stats = IngestStats::default();
    let mut malformed = 0_usize;
    for item in RecordReader::new(BufReader::new(file)) {
        let record = match item {
            Ok((_, record)) => record,
            Err(err @ IngestError::Malformed { .. }) => {
                progress.suspend(|| warn!(error = %err, "Skipping malformed record"));
                malformed += 1;
                continue;
            }
            Err(err) => {
                progress.abandon();
                return Err(err)
                    .with_context(|| format!("Failed to read '{}'", args.file.display()));
            }
        };

        let outcome = ingestor.process_record(&record).await.map_err(|err| {
            progress.abandon();
            let catalog_error = match &err {
                IngestError::Catalog(inner) => Some(inner.clone()),
                _ => None,
            };
            super::catalog_failure(err, catalog_error.as_ref(), "Failed to store record")
        })?;
        stats.record(&outcome);
        progress.inc(1);
        if stats.total % 1000 == 0 {
            progress.set_message(format!("({} dishes)", stats.dishes));
        }
    }
    progress.finish_and_clear();

    let counts = (
        catalog.count_dishes().await?,
        catalog.count_ingredients().await?,
        catalog.count_links().await?,
        catalog.count_recipes().await?,
    );
    catalog.database().clone().close().await;

    info!(
        total = stats.total,
        skipped = stats.skipped,
        malformed,
        new_links = stats.new_links,
        "Ingest complete"
    );
    println!("Ingested {stats}");
    if malformed > 0 {
        println!("Skipped {malformed} malformed lines");
    }
    println!(
        "Database: {} dishes, {} ingredients, {} dish-ingredient links, {} recipes",
        counts.0, counts.1, counts.2, counts.3
    );

    Ok(())
}
