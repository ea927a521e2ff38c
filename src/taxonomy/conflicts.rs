//! Detection of keywords shared between base ingredients.
//!
//! A shared keyword is not an error: the earlier base in the table claims every
//! ingredient the keyword matches and the later base never sees them. Surfacing
//! these overlaps lets table authors check that the outcome is the one they want.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::table::BaseIngredientTable;

/// A keyword listed under more than one base ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordConflict {
    /// The shared keyword.
    pub keyword: String,
    /// Base that claims the matches (first in table order).
    pub winner: String,
    /// Later bases whose copy of the keyword can never claim anything new.
    pub shadowed: Vec<String>,
}

impl fmt::Display for KeywordConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is claimed by '{}' before {}",
            self.keyword,
            self.winner,
            self.shadowed
                .iter()
                .map(|name| format!("'{name}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Lists keywords that appear under more than one base, in first-seen order.
///
/// Only keywords that actually claim rows are considered, so a base's own
/// name in its keyword list does not count.
#[must_use]
pub fn find_keyword_conflicts(table: &BaseIngredientTable) -> Vec<KeywordConflict> {
    let mut owners: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for base in table {
        for keyword in base.claiming_keywords() {
            match index.get(keyword) {
                Some(&slot) => {
                    let bases = &mut owners[slot].1;
                    if !bases.contains(&base.name.as_str()) {
                        bases.push(base.name.as_str());
                    }
                }
                None => {
                    index.insert(keyword, owners.len());
                    owners.push((keyword, vec![base.name.as_str()]));
                }
            }
        }
    }

    owners
        .into_iter()
        .filter(|(_, bases)| bases.len() > 1)
        .map(|(keyword, bases)| KeywordConflict {
            keyword: keyword.to_string(),
            winner: bases[0].to_string(),
            shadowed: bases[1..].iter().map(|name| (*name).to_string()).collect(),
        })
        .collect()
}
