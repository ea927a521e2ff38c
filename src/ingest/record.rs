//! Source records and the JSON Lines reader.

use std::io::BufRead;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::IngestError;

/// One raw recipe row as exported by the source site.
///
/// Field names follow the catalog; aliases accept the upper-case column
/// names of the original export (`CKG_NM`, `CKG_MTRL_CN`, ...). Every field is
/// optional and the two counters accept numbers, numeric strings, or anything
/// else (read as 0).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    /// Dish title, normalized before use.
    #[serde(alias = "CKG_NM")]
    pub dish_name: Option<String>,
    /// Dish kind (soup, side dish, ...).
    #[serde(alias = "CKG_KND_ACTO_NM")]
    pub dish_category: Option<String>,
    /// Category applied to the leading ingredients of the row.
    #[serde(alias = "CKG_MTRL_ACTO_NM")]
    pub main_category: Option<String>,
    /// Raw ingredient text.
    #[serde(alias = "CKG_MTRL_CN")]
    pub ingredients: Option<String>,
    #[serde(alias = "RCP_TTL")]
    pub title: Option<String>,
    /// Source-site id; numeric ids are kept in their decimal form.
    #[serde(alias = "RCP_SNO", deserialize_with = "lenient_id")]
    pub source_id: Option<String>,
    #[serde(alias = "CKG_IPDC")]
    pub description: Option<String>,
    #[serde(alias = "CKG_MTH_ACTO_NM")]
    pub cooking_method: Option<String>,
    #[serde(alias = "CKG_TIME_NM")]
    pub cooking_time: Option<String>,
    #[serde(alias = "CKG_INBUN_NM")]
    pub servings: Option<String>,
    #[serde(alias = "CKG_DODF_NM")]
    pub difficulty: Option<String>,
    #[serde(alias = "RCP_IMG_URL")]
    pub image_url: Option<String>,
    #[serde(alias = "INQ_CNT", deserialize_with = "lenient_count")]
    pub view_count: i64,
    #[serde(alias = "RCMM_CNT", deserialize_with = "lenient_count")]
    pub recommend_count: i64,
}

/// Reads a counter that may arrive as a number, a numeric string, or junk.
fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, count_from_value))
}

/// Reads an id that may arrive as a string or a bare number.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn count_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(text) => parse_count(text),
        _ => 0,
    }
}

/// Parses a counter string, returning 0 when it isn't an integer.
#[must_use]
pub fn parse_count(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Iterator over the records of a JSON Lines stream.
///
/// Blank lines are skipped. Each item carries its 1-based line number so a
/// caller can report and skip malformed lines without stopping.
pub struct RecordReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> RecordReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<(usize, SourceRecord), IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let line_number = self.line_number;

            let line = match line {
                Ok(line) => line,
                Err(source) => return Some(Err(IngestError::Read { line: line_number, source })),
            };
            if line.trim().is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str(&line)
                    .map(|record| (line_number, record))
                    .map_err(|source| IngestError::Malformed {
                        line: line_number,
                        source,
                    }),
            );
        }
    }
}
