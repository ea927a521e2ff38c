//! Recipe row ingestion.
//!
//! Each [`SourceRecord`] becomes one dish (get-or-create by normalized
//! title), one ingredient row per parsed clause, a dish-ingredient link per
//! ingredient, and an appended raw recipe row. Every repository call commits
//! on its own; there is no batch transaction around a record.

mod record;

pub use record::{RecordReader, SourceRecord, parse_count};

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::catalog::{CatalogError, CatalogRepository, NewDish, NewRecipe};
use crate::parser::{normalize_dish_name, parse_ingredients};

/// Source label stamped on recipes when none is configured.
pub const DEFAULT_SOURCE_LABEL: &str = "만개의레시피";

/// Section whose leading items are flagged as main ingredients.
pub const DEFAULT_PRIMARY_SECTION: &str = "ingredients";

/// Korean label for the primary section, always treated as primary.
pub const KOREAN_PRIMARY_SECTION: &str = "재료";

/// Number of leading items that receive the row's main category.
pub const DEFAULT_MAIN_INGREDIENT_LIMIT: usize = 3;

/// Errors raised while reading or ingesting records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A line could not be read from the input.
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid JSON record.
    #[error("malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A repository write failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Ingestion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Label stored in each recipe's `source` column.
    pub source_label: String,
    /// Section label treated as the primary ingredient list.
    pub primary_section: String,
    /// Leading items per record that get the main category and may be main.
    pub main_ingredient_limit: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            primary_section: DEFAULT_PRIMARY_SECTION.to_string(),
            main_ingredient_limit: DEFAULT_MAIN_INGREDIENT_LIMIT,
        }
    }
}

impl IngestOptions {
    fn is_primary_section(&self, section: &str) -> bool {
        section == self.primary_section || section == KOREAN_PRIMARY_SECTION
    }
}

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The dish title was empty after normalization; nothing was written.
    Skipped,
    /// The record was stored.
    Imported {
        dish_id: i64,
        recipe_id: i64,
        /// Ingredient clauses linked (new or already present).
        ingredients: usize,
        /// Links that did not exist before.
        new_links: usize,
    },
}

/// Running totals for an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Records seen.
    pub total: usize,
    /// Records skipped for an empty dish title.
    pub skipped: usize,
    /// Records stored (one dish lookup each).
    pub dishes: usize,
    /// Ingredient links attempted.
    pub ingredient_links: usize,
    /// Ingredient links newly written.
    pub new_links: usize,
}

impl IngestStats {
    /// Folds one record outcome into the totals.
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Imported {
                ingredients,
                new_links,
                ..
            } => {
                self.dishes += 1;
                self.ingredient_links += ingredients;
                self.new_links += new_links;
            }
        }
    }
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} skipped), {} dishes, {} ingredient links ({} new)",
            self.total, self.skipped, self.dishes, self.ingredient_links, self.new_links
        )
    }
}

/// Writes source records through a [`CatalogRepository`].
pub struct Ingestor<'a, R: ?Sized> {
    repo: &'a R,
    options: IngestOptions,
}

impl<'a, R> Ingestor<'a, R>
where
    R: CatalogRepository + ?Sized,
{
    /// Creates an ingestor with the given options.
    pub fn new(repo: &'a R, options: IngestOptions) -> Self {
        Self { repo, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Stores one record.
    ///
    /// The first `main_ingredient_limit` parsed items receive the record's
    /// main category and, when they sit in the primary section, the main flag.
    /// The raw recipe row is appended even when no ingredient parses.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Catalog`] if a repository write fails. Writes
    /// made for the record before the failure stay committed.
    #[instrument(skip(self, record), fields(dish = record.dish_name.as_deref().unwrap_or("")))]
    pub async fn process_record(&self, record: &SourceRecord) -> Result<RecordOutcome, IngestError> {
        let dish_name = normalize_dish_name(record.dish_name.as_deref().unwrap_or(""));
        if dish_name.is_empty() {
            debug!("skipping record with empty dish name");
            return Ok(RecordOutcome::Skipped);
        }

        let dish_id = self
            .repo
            .get_or_create_dish(&NewDish {
                name: &dish_name,
                category: non_blank(record.dish_category.as_deref()),
                image_url: non_blank(record.image_url.as_deref()),
                description: non_blank(record.description.as_deref()),
            })
            .await?;

        let items = parse_ingredients(record.ingredients.as_deref());
        let main_category = non_blank(record.main_category.as_deref());
        let limit = self.options.main_ingredient_limit;

        let mut new_links = 0;
        for (i, item) in items.iter().enumerate() {
            let leading = i < limit;
            let ingredient_id = self
                .repo
                .get_or_create_ingredient(&item.name, if leading { main_category } else { None })
                .await?;

            let is_main = leading && self.options.is_primary_section(&item.section);
            if self
                .repo
                .link_dish_ingredient(dish_id, ingredient_id, is_main, item.amount.as_deref())
                .await?
            {
                new_links += 1;
            }
        }

        let recipe_id = self
            .repo
            .save_recipe(&NewRecipe {
                dish_id,
                title: record.title.as_deref(),
                source: Some(self.options.source_label.as_str()),
                source_id: record.source_id.as_deref(),
                description: record.description.as_deref(),
                ingredients_raw: record.ingredients.as_deref(),
                cooking_method: record.cooking_method.as_deref(),
                cooking_time: record.cooking_time.as_deref(),
                servings: record.servings.as_deref(),
                difficulty: record.difficulty.as_deref(),
                image_url: record.image_url.as_deref(),
                view_count: record.view_count,
                recommend_count: record.recommend_count,
            })
            .await?;

        debug!(dish_id, recipe_id, items = items.len(), new_links, "record stored");
        Ok(RecordOutcome::Imported {
            dish_id,
            recipe_id,
            ingredients: items.len(),
            new_links,
        })
    }

    /// Stores every record in order and returns the totals.
    ///
    /// # Errors
    ///
    /// Stops at the first repository failure; earlier records stay stored.
    pub async fn ingest<'r, I>(&self, records: I) -> Result<IngestStats, IngestError>
    where
        I: IntoIterator<Item = &'r SourceRecord>,
    {
        let mut stats = IngestStats::default();
        for record in records {
            let outcome = self.process_record(record).await?;
            stats.record(&outcome);
        }
        Ok(stats)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
