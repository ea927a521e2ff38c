//! Section splitting for raw multi-section ingredient blobs.
//!
//! Input looks like `"[재료] 떡국떡400g| 소고기100g [양념] 간장2T| 참기름1T"`:
//! bracketed headers switch the current section, and the text between
//! headers is a pipe-separated list of clauses.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::item::{ParsedIngredient, parse_item};

/// Section label used for clauses that appear before any header.
pub const DEFAULT_SECTION: &str = "ingredients";

/// Separator between clauses inside a section.
const CLAUSE_SEPARATOR: char = '|';

/// Matches `[label]` section headers.
#[allow(clippy::expect_used)]
static SECTION_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]").expect("section header regex is valid") // Static pattern, safe to panic
});

/// Parses a raw ingredient blob into ordered section-tagged records.
///
/// A missing or blank blob yields an empty vector. Sections come out in
/// document order and items keep their order within each section; callers
/// rely on that order to pick out the leading "main" ingredients.
///
/// # Examples
///
/// ```
/// use recipe_taxonomy::parser::parse_ingredients;
///
/// let records = parse_ingredients(Some("[ingredients] ricecake400g| beef100g [seasoning] soysauce2T"));
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[2].section, "seasoning");
/// assert_eq!(records[2].name, "soysauce");
///
/// assert!(parse_ingredients(None).is_empty());
/// ```
#[tracing::instrument(skip(raw), fields(raw_len = raw.map_or(0, str::len)))]
#[must_use]
pub fn parse_ingredients(raw: Option<&str>) -> Vec<ParsedIngredient> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut current_section = DEFAULT_SECTION.to_string();
    let mut dropped = 0_usize;
    let mut cursor = 0;

    for header in SECTION_HEADER_PATTERN.captures_iter(raw) {
        let (Some(whole), Some(label)) = (header.get(0), header.get(1)) else {
            continue;
        };

        dropped += push_segment(&raw[cursor..whole.start()], &current_section, &mut records);
        cursor = whole.end();

        let label = label.as_str().trim();
        if !label.is_empty() {
            current_section = label.to_string();
        }
    }
    dropped += push_segment(&raw[cursor..], &current_section, &mut records);

    debug!(
        records = records.len(),
        dropped,
        sections = count_sections(&records),
        "Parsed ingredient blob"
    );

    records
}

/// Convenience form of [`parse_ingredients`] for a blob known to be present.
#[must_use]
pub fn parse_ingredient_blob(raw: &str) -> Vec<ParsedIngredient> {
    parse_ingredients(Some(raw))
}

/// Splits one non-header segment on the clause separator and tokenizes each clause.
///
/// Returns how many non-blank clauses were dropped by the tokenizer.
fn push_segment(segment: &str, section: &str, records: &mut Vec<ParsedIngredient>) -> usize {
    let mut dropped = 0;

    for clause in segment.split(CLAUSE_SEPARATOR) {
        if clause.trim().is_empty() {
            continue;
        }
        match parse_item(clause) {
            Some(parts) => records.push(ParsedIngredient::new(section, parts)),
            None => dropped += 1,
        }
    }

    dropped
}

fn count_sections(records: &[ParsedIngredient]) -> usize {
    let mut count = 0;
    let mut previous: Option<&str> = None;
    for record in records {
        if previous != Some(record.section.as_str()) {
            count += 1;
            previous = Some(record.section.as_str());
        }
    }
    count
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triples(records: &[ParsedIngredient]) -> Vec<(&str, Option<&str>, &str)> {
        records
            .iter()
            .map(|r| (r.name.as_str(), r.amount.as_deref(), r.section.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_ingredients_sections_in_document_order() {
        let records = parse_ingredients(Some(
            "[ingredients] ricecake400g| beef100g [seasoning] soysauce2T",
        ));

        assert_eq!(
            triples(&records),
            vec![
                ("ricecake", Some("400g"), "ingredients"),
                ("beef", Some("100g"), "ingredients"),
                ("soysauce", Some("2T"), "seasoning"),
            ]
        );
    }

    #[test]
    fn test_parse_ingredients_without_header_uses_default_section() {
        let records = parse_ingredients(Some("onion 1ea| garlic 3 cloves| salt"));

        assert_eq!(
            triples(&records),
            vec![
                ("onion", Some("1ea"), DEFAULT_SECTION),
                ("garlic", Some("3 cloves"), DEFAULT_SECTION),
                ("salt", None, DEFAULT_SECTION),
            ]
        );
    }

    #[test]
    fn test_parse_ingredients_korean_blob() {
        let records = parse_ingredients(Some(
            "[재료] 떡국떡400g| 소고기100g| 대파 1/2대 [양념] 간장2T| 참기름1T| 소금 약간",
        ));

        assert_eq!(
            triples(&records),
            vec![
                ("떡국떡", Some("400g"), "재료"),
                ("소고기", Some("100g"), "재료"),
                ("대파", Some("1/2대"), "재료"),
                ("간장", Some("2T"), "양념"),
                ("참기름", Some("1T"), "양념"),
                ("소금", Some("약간"), "양념"),
            ]
        );
    }

    #[test]
    fn test_parse_ingredients_text_before_first_header_is_default() {
        let records = parse_ingredients(Some("water 1L [sauce] ketchup 2T"));

        assert_eq!(records[0].section, DEFAULT_SECTION);
        assert_eq!(records[1].section, "sauce");
    }

    #[test]
    fn test_parse_ingredients_empty_and_missing() {
        assert!(parse_ingredients(None).is_empty());
        assert!(parse_ingredients(Some("")).is_empty());
        assert!(parse_ingredients(Some("   \n ")).is_empty());
        assert!(parse_ingredient_blob("").is_empty());
    }

    #[test]
    fn test_parse_ingredient_blob_matches_option_form() {
        let blob = "[재료] 두부 1모| 대파";
        assert_eq!(parse_ingredient_blob(blob), parse_ingredients(Some(blob)));
    }

    #[test]
    fn test_parse_ingredients_skips_empty_clauses_and_segments() {
        let records = parse_ingredients(Some("[a] | | x1 || [b] [c] y2 |"));

        assert_eq!(
            triples(&records),
            vec![("x", Some("1"), "a"), ("y", Some("2"), "c")]
        );
    }

    #[test]
    fn test_parse_ingredients_drops_quantity_only_clauses() {
        let records = parse_ingredients(Some("beef 100g| 200g| onion"));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "beef");
        assert_eq!(records[1].name, "onion");
    }

    #[test]
    fn test_parse_ingredients_header_label_is_trimmed() {
        let records = parse_ingredients(Some("[ sauce ] mayo 1T"));
        assert_eq!(records[0].section, "sauce");
    }

    #[test]
    fn test_parse_ingredients_blank_header_keeps_current_section() {
        let records = parse_ingredients(Some("[main] rice 1cup [  ] kimchi 100g"));
        assert_eq!(records[1].section, "main");
    }

    #[test]
    fn test_count_sections_counts_runs() {
        let records = parse_ingredients(Some("[a] x1 [b] y1 [a] z1"));
        assert_eq!(count_sections(&records), 3);
        assert_eq!(count_sections(&[]), 0);
    }
}
