use serde::Serialize;
use serde_json::Value;

use crate::record_id::RecordId;

/// A normalized bibliographic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Numeric id from the source dataset; -1 when absent or non-integer.
    pub source_id: i64,
    /// Content-derived identifier, stable across re-imports.
    pub id: RecordId,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub journal: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
    pub doi: Option<String>,
}

impl Record {
    /// Build a record from one raw dataset entry.
    ///
    /// Coercion is per-field and total: a wrongly typed value degrades to
    /// the field's empty form instead of failing, so one malformed entry
    /// can never poison a whole dataset.
    pub fn from_value(raw: &Value) -> Self {
        let source_id = raw.get("id").and_then(Value::as_i64).unwrap_or(-1);
        let title = raw
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let authors = string_list(raw.get("authors"));
        let year = raw
            .get("year")
            .and_then(Value::as_i64)
            .and_then(|y| i32::try_from(y).ok());
        let journal = optional_text(raw.get("journal"));
        let abstract_text = optional_text(raw.get("abstract"));
        let keywords = string_list(raw.get("keywords"));
        let doi = optional_text(raw.get("doi"));

        let id = RecordId::derive(
            &title,
            year,
            authors.first().map(String::as_str),
        );

        Self {
            source_id,
            id,
            title,
            authors,
            year,
            journal,
            abstract_text,
            keywords,
            doi,
        }
    }
}

/// String value, trimmed; `None` for missing, non-string, or empty input.
fn optional_text(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// String elements of an array value, trimmed, with empties dropped.
/// Anything that is not an array yields an empty list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
