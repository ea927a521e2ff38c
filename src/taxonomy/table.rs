//! Ordered base-ingredient tables.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::builtin::BUILTIN_BASES;

/// Errors raised while building or loading a base-ingredient table.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The table has no entries.
    #[error("base-ingredient table is empty\n  Suggestion: Add at least one base ingredient")]
    EmptyTable,

    /// An entry has a blank name.
    #[error("base ingredient at position {position} has an empty name")]
    EmptyName {
        /// Zero-based position in the table.
        position: usize,
    },

    /// An entry has a blank category.
    #[error("base ingredient '{name}' has an empty category")]
    EmptyCategory {
        /// Base ingredient name.
        name: String,
    },

    /// The same base name appears twice.
    #[error("base ingredient '{name}' is declared more than once")]
    DuplicateBase {
        /// Base ingredient name.
        name: String,
    },

    /// A keyword is blank; as a substring it would match every ingredient.
    #[error(
        "base ingredient '{name}' has an empty keyword\n  Suggestion: Remove blank entries from its keyword list"
    )]
    EmptyKeyword {
        /// Base ingredient name.
        name: String,
    },

    /// Reading the table file failed.
    #[error("failed to read base-ingredient table '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The table JSON is malformed.
    #[error("invalid base-ingredient table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One canonical base ingredient and the keywords that claim ingredients for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseIngredientSpec {
    /// Canonical name, stored as the base ingredient row.
    pub name: String,
    /// Category stamped on the base and on every ingredient it claims.
    pub category: String,
    /// Substrings that claim ingredient names, in order.
    pub keywords: Vec<String>,
}

impl BaseIngredientSpec {
    /// Creates an entry from string slices.
    #[must_use]
    pub fn new(name: &str, category: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// Keywords that can claim other rows: every keyword except the base's own name.
    pub fn claiming_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .filter(move |keyword| *keyword != self.name)
    }
}

/// Priority-ordered list of base ingredients.
///
/// Order is part of the contract: when an ingredient name contains keywords
/// of several bases, the base that comes first in the table claims it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BaseIngredientTable {
    bases: Vec<BaseIngredientSpec>,
}

impl BaseIngredientTable {
    /// Builds a validated table from entries in priority order.
    ///
    /// # Errors
    ///
    /// Returns a [`TaxonomyError`] when the table is empty, an entry has a
    /// blank name, category or keyword, or a base name repeats.
    pub fn new(bases: Vec<BaseIngredientSpec>) -> Result<Self, TaxonomyError> {
        if bases.is_empty() {
            return Err(TaxonomyError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for (position, base) in bases.iter().enumerate() {
            if base.name.trim().is_empty() {
                return Err(TaxonomyError::EmptyName { position });
            }
            if base.category.trim().is_empty() {
                return Err(TaxonomyError::EmptyCategory {
                    name: base.name.clone(),
                });
            }
            if base.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(TaxonomyError::EmptyKeyword {
                    name: base.name.clone(),
                });
            }
            if !seen.insert(base.name.as_str()) {
                return Err(TaxonomyError::DuplicateBase {
                    name: base.name.clone(),
                });
            }
        }

        Ok(Self { bases })
    }

    /// The built-in Korean vocabulary, in its declared priority order.
    #[must_use]
    pub fn builtin() -> Self {
        let bases = BUILTIN_BASES
            .iter()
            .map(|(name, category, keywords)| BaseIngredientSpec::new(name, category, keywords))
            .collect();
        Self { bases }
    }

    /// Parses a JSON array of `{name, category, keywords}` objects.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Json`] for malformed JSON, or a validation error.
    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let bases: Vec<BaseIngredientSpec> = serde_json::from_str(raw)?;
        Self::new(bases)
    }

    /// Loads a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Io`] if the file can't be read, otherwise as
    /// [`Self::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Returns the entries in priority order.
    #[must_use]
    pub fn bases(&self) -> &[BaseIngredientSpec] {
        &self.bases
    }

    /// Iterates the entries in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, BaseIngredientSpec> {
        self.bases.iter()
    }

    /// Looks up an entry by base name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BaseIngredientSpec> {
        self.bases.iter().find(|base| base.name == name)
    }

    /// Zero-based priority of a base, lower wins.
    #[must_use]
    pub fn priority_of(&self, name: &str) -> Option<usize> {
        self.bases.iter().position(|base| base.name == name)
    }

    /// Number of base ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always false for a validated table; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl<'a> IntoIterator for &'a BaseIngredientTable {
    type Item = &'a BaseIngredientSpec;
    type IntoIter = std::slice::Iter<'a, BaseIngredientSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.bases.iter()
    }
}
