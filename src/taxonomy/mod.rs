//! Base-ingredient taxonomy: ordered tables and the normalization pass.
//!
//! - [`BaseIngredientTable`] - priority-ordered base ingredients and their keywords
//! - [`normalize_ingredients`] - maps stored ingredients onto their base
//! - [`find_keyword_conflicts`] - reports keywords shared by several bases

mod builtin;
mod conflicts;
mod normalizer;
mod table;

pub use conflicts::{KeywordConflict, find_keyword_conflicts};
pub use normalizer::{BaseOutcome, NormalizeReport, normalize_ingredients};
pub use table::{BaseIngredientSpec, BaseIngredientTable, TaxonomyError};
