//! Quantity boundary detection for single ingredient clauses.
//!
//! A clause such as `"beef100g"` or `"salt a pinch"` is split where the
//! quantity expression begins. The start of a quantity is recognised by a
//! closed set of triggers, checked at every character position from left to
//! right: an ASCII digit, a vulgar-fraction glyph, or one of a fixed list of
//! quantity words. The first position with any trigger is the boundary.

use std::fmt;

/// Vulgar-fraction glyphs that start a quantity.
pub const FRACTION_GLYPHS: [char; 5] = ['½', '⅓', '¼', '⅔', '¾'];

/// Words that stand in for an unmeasured quantity.
///
/// Korean source data uses the first group; the English equivalents cover
/// translated listings.
pub const QUANTITY_WORDS: [&str; 14] = [
    "약간",
    "적당량",
    "조금",
    "적당히",
    "소량",
    "다량",
    "충분히",
    "a little",
    "a pinch",
    "a small amount",
    "some",
    "enough",
    "plenty",
    "sufficient",
];

/// Category of token that opened a quantity expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityTrigger {
    /// ASCII digit `0`-`9`.
    Digit,
    /// One of [`FRACTION_GLYPHS`].
    FractionGlyph,
    /// One of [`QUANTITY_WORDS`].
    QuantityWord(&'static str),
}

impl fmt::Display for QuantityTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit => write!(f, "digit"),
            Self::FractionGlyph => write!(f, "fraction glyph"),
            Self::QuantityWord(word) => write!(f, "quantity word '{word}'"),
        }
    }
}

/// Position where a quantity expression begins inside a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBoundary {
    /// Byte offset into the clause; always on a char boundary.
    pub offset: usize,
    /// What was found at `offset`.
    pub trigger: QuantityTrigger,
}

/// Classifies the token starting at the beginning of `text`, if it opens a quantity.
#[must_use]
pub fn classify_at(text: &str) -> Option<QuantityTrigger> {
    let first = text.chars().next()?;

    if first.is_ascii_digit() {
        return Some(QuantityTrigger::Digit);
    }
    if FRACTION_GLYPHS.contains(&first) {
        return Some(QuantityTrigger::FractionGlyph);
    }

    QUANTITY_WORDS
        .iter()
        .copied()
        .find(|word| text.starts_with(*word))
        .map(QuantityTrigger::QuantityWord)
}

/// Finds the first position in `clause` where a quantity expression begins.
///
/// Returns `None` when the clause carries no quantity at all.
///
/// # Examples
///
/// ```
/// use recipe_taxonomy::parser::{QuantityTrigger, find_quantity_boundary};
///
/// let boundary = find_quantity_boundary("beef100g").unwrap();
/// assert_eq!(boundary.offset, 4);
/// assert_eq!(boundary.trigger, QuantityTrigger::Digit);
///
/// assert!(find_quantity_boundary("green onion").is_none());
/// ```
#[must_use]
pub fn find_quantity_boundary(clause: &str) -> Option<QuantityBoundary> {
    clause.char_indices().find_map(|(offset, _)| {
        classify_at(&clause[offset..]).map(|trigger| QuantityBoundary { offset, trigger })
    })
}
