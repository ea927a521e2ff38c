//! Recipe Taxonomy Core Library
//!
//! This library turns exported recipe rows into a normalized ingredient
//! catalog: ingredient listings are tokenized into `(section, name, amount)`
//! records, persisted alongside dishes and recipes, and every stored
//! ingredient is mapped onto a small vocabulary of base ingredients.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`db`] - Database connection and schema management
//! - [`parser`] - Ingredient blob tokenizer and dish title cleanup
//! - [`catalog`] - Ingredient, dish and recipe persistence
//! - [`ingest`] - Record ingestion through the catalog
//! - [`taxonomy`] - Base-ingredient tables and the normalization pass

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod db;
pub mod ingest;
pub mod parser;
pub mod taxonomy;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CatalogRepository, Ingredient, TaxonomyStats};
pub use db::{Database, DatabaseOptions, DbError};
pub use ingest::{IngestOptions, IngestStats, Ingestor, RecordOutcome, SourceRecord};
pub use parser::{ParsedIngredient, parse_ingredients};
pub use taxonomy::{BaseIngredientTable, NormalizeReport, normalize_ingredients};
