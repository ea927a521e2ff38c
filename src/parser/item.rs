//! Types for parsed ingredient clauses and the single-clause tokenizer.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::quantity::find_quantity_boundary;

/// Name/amount split of a single ingredient clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemParts {
    /// Ingredient name, trimmed and never empty.
    pub name: String,
    /// Verbatim quantity expression, if the clause had one.
    pub amount: Option<String>,
}

/// One ingredient record extracted from a raw ingredient blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIngredient {
    /// Section label the clause appeared under (e.g. `ingredients`, `seasoning`).
    pub section: String,
    /// Ingredient name.
    pub name: String,
    /// Quantity expression as written, `None` when unspecified.
    pub amount: Option<String>,
}

impl ParsedIngredient {
    /// Creates a parsed ingredient from tokenized parts under a section label.
    #[must_use]
    pub fn new(section: impl Into<String>, parts: ItemParts) -> Self {
        Self {
            section: section.into(),
            name: parts.name,
            amount: parts.amount,
        }
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.amount {
            Some(amount) => write!(f, "[{}] {} ({amount})", self.section, self.name),
            None => write!(f, "[{}] {}", self.section, self.name),
        }
    }
}

/// Splits one ingredient clause into a name and an optional amount.
///
/// Returns `None` when the clause is blank, or when nothing is left for the
/// name once the quantity has been cut off (e.g. a bare `"100g"`).
///
/// # Examples
///
/// ```
/// use recipe_taxonomy::parser::parse_item;
///
/// let parts = parse_item("beef100g").unwrap();
/// assert_eq!(parts.name, "beef");
/// assert_eq!(parts.amount.as_deref(), Some("100g"));
///
/// assert!(parse_item("  ").is_none());
/// ```
#[must_use]
pub fn parse_item(clause: &str) -> Option<ItemParts> {
    let clause = clause.trim();
    if clause.is_empty() {
        return None;
    }

    let (name, amount) = match find_quantity_boundary(clause) {
        Some(boundary) => {
            trace!(clause, trigger = %boundary.trigger, "quantity boundary found");
            let (name, amount) = clause.split_at(boundary.offset);
            (name.trim(), Some(amount.trim().to_string()))
        }
        None => (clause, None),
    };

    if name.is_empty() {
        trace!(clause, "clause has no name before its quantity");
        return None;
    }

    Some(ItemParts {
        name: name.to_string(),
        amount,
    })
}
