//! Ingredient listing parser.
//!
//! This module turns the semi-structured ingredient text found in recipe
//! records into ordered `(section, name, amount)` records.
//!
//! # Components
//!
//! - [`find_quantity_boundary`] - locates where a quantity begins in one clause
//! - [`parse_item`] - splits one clause into name and amount
//! - [`parse_ingredients`] - splits a whole blob into sections and clauses
//! - [`normalize_dish_name`] - cleans dish titles used as dish keys
//!
//! # Example
//!
//! ```
//! use recipe_taxonomy::parser::parse_ingredients;
//!
//! let records = parse_ingredients(Some("[재료] 떡국떡400g| 소고기100g [양념] 간장2T"));
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[0].name, "떡국떡");
//! assert_eq!(records[0].amount.as_deref(), Some("400g"));
//! assert_eq!(records[2].section, "양념");
//! ```

mod dish_name;
mod item;
mod quantity;
mod section;

pub use dish_name::normalize_dish_name;
pub use item::{ItemParts, ParsedIngredient, parse_item};
pub use quantity::{
    FRACTION_GLYPHS, QUANTITY_WORDS, QuantityBoundary, QuantityTrigger, classify_at,
    find_quantity_boundary,
};
pub use section::{DEFAULT_SECTION, parse_ingredient_blob, parse_ingredients};
