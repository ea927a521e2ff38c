//! Row types for the recipe catalog.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

/// A stored ingredient, possibly mapped onto a base ingredient.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Ingredient {
    /// Surrogate identifier.
    pub id: i64,
    /// Unique ingredient name.
    pub name: String,
    /// Category label, if known.
    pub category: Option<String>,
    /// Base ingredient this row is mapped to. `0` is treated like `NULL`.
    pub parent_id: Option<i64>,
    /// Whether this row is itself a base ingredient.
    pub is_base: bool,
}

impl Ingredient {
    /// Returns true when the row has a parent assigned.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.parent_id.is_some_and(|id| id != 0)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name,
            self.category.as_deref().unwrap_or("uncategorized")
        )
    }
}

/// A stored dish.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Insert payload for a dish.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewDish<'a> {
    /// Normalized dish name (lookup key).
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl<'a> NewDish<'a> {
    /// Creates a dish payload with only a name.
    #[must_use]
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

/// An ingredient attached to a dish.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DishIngredient {
    pub dish_id: i64,
    pub ingredient_id: i64,
    /// Ingredient name, joined in for convenience.
    pub name: String,
    pub is_main: bool,
    pub amount: Option<String>,
}

/// Insert payload for an append-only recipe row.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewRecipe<'a> {
    pub dish_id: i64,
    pub title: Option<&'a str>,
    /// Name of the recipe source (site or dataset).
    pub source: Option<&'a str>,
    /// Identifier of the record in its source.
    pub source_id: Option<&'a str>,
    pub description: Option<&'a str>,
    /// Ingredient blob exactly as received.
    pub ingredients_raw: Option<&'a str>,
    pub cooking_method: Option<&'a str>,
    pub cooking_time: Option<&'a str>,
    pub servings: Option<&'a str>,
    pub difficulty: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub view_count: i64,
    pub recommend_count: i64,
}

/// Counts describing how much of the ingredient table is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaxonomyStats {
    /// Rows flagged as base ingredients.
    pub base: i64,
    /// Rows with a parent assigned.
    pub mapped: i64,
    /// Non-base rows without a parent.
    pub unmapped: i64,
    /// All ingredient rows.
    pub total: i64,
}

impl TaxonomyStats {
    /// Share of rows that are either base or mapped, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.base + self.mapped) as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for TaxonomyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} base, {} mapped, {} unmapped of {} ingredients ({:.1}% covered)",
            self.base,
            self.mapped,
            self.unmapped,
            self.total,
            self.coverage()
        )
    }
}
