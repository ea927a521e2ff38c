//! Taxonomy normalization: assigns stored ingredients to base ingredients.
//!
//! The pass runs in two phases over the table in priority order:
//!
//! 1. Every base ingredient row is resolved or created (and flagged `is_base`,
//!    with its category stamped).
//! 2. For each base, each of its keywords sweeps the unmapped non-base rows
//!    whose name contains it and assigns them to the base.
//!
//! Because a sweep only ever touches rows without a parent, the first base
//! (in table order) whose keyword matches a name keeps it, and a second run
//! over the same store maps nothing. Resolving all bases before any sweep
//! keeps base rows from being claimed as children of an earlier base.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::conflicts::find_keyword_conflicts;
use super::table::BaseIngredientTable;
use crate::catalog::{CatalogRepository, Result};

/// Outcome of normalization for one base ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseOutcome {
    /// Base ingredient name.
    pub name: String,
    /// Id of the base ingredient row.
    pub id: i64,
    /// Rows newly assigned to this base during the run.
    pub mapped: u64,
}

/// Summary of a normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Per-base outcomes in table order.
    pub bases: Vec<BaseOutcome>,
}

impl NormalizeReport {
    /// Total rows newly mapped across all bases and keywords.
    #[must_use]
    pub fn total_mapped(&self) -> u64 {
        self.bases.iter().map(|base| base.mapped).sum()
    }

    /// Outcome for a base by name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&BaseOutcome> {
        self.bases.iter().find(|base| base.name == name)
    }
}

impl fmt::Display for NormalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mapped {} ingredients onto {} base ingredients",
            self.total_mapped(),
            self.bases.len()
        )
    }
}

/// Assigns every unmapped ingredient to the first base whose keyword it contains.
///
/// See the module docs for the ordering rules. Existing parent assignments
/// and categories are never cleared; re-running is safe and maps only rows
/// that appeared since the last run.
///
/// # Errors
///
/// Returns [`crate::catalog::CatalogError`] if a repository call fails. Work
/// committed before the failure (bases created, sweeps done) is kept.
#[instrument(skip(repo, table), fields(bases = table.len()))]
pub async fn normalize_ingredients<R>(repo: &R, table: &BaseIngredientTable) -> Result<NormalizeReport>
where
    R: CatalogRepository + ?Sized,
{
    for conflict in find_keyword_conflicts(table) {
        warn!(
            keyword = %conflict.keyword,
            winner = %conflict.winner,
            shadowed = ?conflict.shadowed,
            "keyword shared by several base ingredients; earlier base wins"
        );
    }

    let mut base_ids = Vec::with_capacity(table.len());
    for base in table {
        let id = repo.upsert_base_ingredient(&base.name, &base.category).await?;
        debug!(base = %base.name, id, "base ingredient resolved");
        base_ids.push(id);
    }

    let mut report = NormalizeReport::default();
    for (base, id) in table.iter().zip(base_ids) {
        let mut mapped = 0;
        for keyword in base.claiming_keywords() {
            let swept = repo
                .assign_parent_by_keyword(id, &base.name, &base.category, keyword)
                .await?;
            if swept > 0 {
                debug!(base = %base.name, keyword, swept, "keyword claimed ingredients");
            }
            mapped += swept;
        }

        report.bases.push(BaseOutcome {
            name: base.name.clone(),
            id,
            mapped,
        });
    }

    info!(mapped = report.total_mapped(), "Normalization complete");
    Ok(report)
}
