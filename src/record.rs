use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SelectorError, SelectorResult};

/// One selectable entry: field name to JSON scalar.
///
/// Lookups coerce strings, numbers and booleans to text. Anything else
/// (missing field, `null`, arrays, objects) is a lookup miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.0.get(key)? {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn field_or_empty(&self, key: &str) -> Cow<'_, str> {
        self.field(key).unwrap_or(Cow::Borrowed(""))
    }
}

/// Converts a JSON array into records, skipping non-object elements.
pub fn records_from_json(value: &Value) -> SelectorResult<Vec<Record>> {
    let Value::Array(items) = value else {
        return Err(SelectorError::invalid_argument(
            "record list must be a JSON array",
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match Record::from_value(item.clone()) {
            Some(record) => records.push(record),
            None => tracing::warn!(index = idx, "skipping non-object record"),
        }
    }
    Ok(records)
}

pub fn load_records(path: impl AsRef<Path>) -> SelectorResult<Vec<Record>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| {
        SelectorError::io_with_context(source, format!("failed to read data: {}", path.display()))
    })?;
    let parsed = serde_json::from_str::<Value>(&raw).map_err(|source| {
        SelectorError::invalid_argument(format!(
            "failed to parse data {}: {source}",
            path.display()
        ))
    })?;
    let records = records_from_json(&parsed)?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}
