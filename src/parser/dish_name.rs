//! Dish title cleanup.

/// ASCII punctuation stripped from dish titles.
const STRIPPED_PUNCTUATION: &str = "~!@#$%^&*()_+=[]{}|\\:\";'<>?,./";

/// Normalizes a dish title for use as a unique dish name.
///
/// Surrounding whitespace and the ASCII punctuation set are removed, then the
/// result is trimmed again so `"떡국 ~"` and `"떡국"` name the same dish. An
/// empty result means the source row has no usable dish and should be skipped.
///
/// ```
/// use recipe_taxonomy::parser::normalize_dish_name;
///
/// assert_eq!(normalize_dish_name("  김치찌개!! "), "김치찌개");
/// assert_eq!(normalize_dish_name("(??)"), "");
/// ```
#[must_use]
pub fn normalize_dish_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}
