use std::path::Path;

use tracing::debug;

use crate::{
    error::{Error, Result},
    record::Record,
};

/// Load and normalize every record from a dataset file.
///
/// The file must hold a JSON document with a top-level "references" array;
/// anything else is a fatal error. Individual entries are never rejected,
/// they normalize permissively (see [`Record::from_value`]).
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = std::fs::read_to_string(path)?;
    let records = parse_records(&raw)?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records out of raw dataset JSON.
pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let references = value
        .get("references")
        .ok_or_else(|| {
            Error::Dataset("missing top-level \"references\" key".into())
        })?
        .as_array()
        .ok_or_else(|| {
            Error::Dataset("\"references\" must be an array".into())
        })?;
    Ok(references.iter().map(Record::from_value).collect())
}
