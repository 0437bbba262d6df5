//! Tolerant decoding for loosely-typed provider payloads.
//!
//! Backend records come from a spreadsheet-style store: a field that is
//! usually a string may arrive as a number, a list, or `null`. A wrongly
//! typed display field decodes as absent instead of failing the payload.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Render a JSON value as display text: strings as-is, numbers stringified,
/// lists of scalars joined with `", "`. Anything else is `None`.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|v| !v.is_array())
                .filter_map(value_to_text)
                .filter(|s| !s.trim().is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

/// `deserialize_with` for optional text fields.
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// `deserialize_with` for text fields that default to empty.
pub fn loose_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    loose_text(deserializer).map(Option::unwrap_or_default)
}

/// `deserialize_with` for a nested object that may be missing or mistyped.
pub fn loose_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// `deserialize_with` for a list of records, dropping entries that are not
/// objects or do not decode.
pub fn loose_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => records_from_values(items),
        _ => Vec::new(),
    })
}

/// Decode each object in `values`, skipping anything else.
pub fn records_from_values<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if records.len() < total {
        debug!(total, kept = records.len(), "skipped malformed records");
    }
    records
}
