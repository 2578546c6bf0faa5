use std::collections::HashSet;

use crate::record::Record;

pub const VALUE_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertRejection {
    MissingSavedKey,
    Duplicate(String),
}

/// Committed records in chip order. No two entries share a saved-key value.
#[derive(Debug, Clone, Default)]
pub struct SelectedSet {
    saved_key: String,
    records: Vec<Record>,
    values: Vec<String>,
    index: HashSet<String>,
}

impl SelectedSet {
    pub fn new(saved_key: impl Into<String>) -> Self {
        Self {
            saved_key: saved_key.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn saved_values(&self) -> &HashSet<String> {
        &self.index
    }

    pub fn insert(&mut self, position: usize, record: Record) -> Result<String, InsertRejection> {
        let value = record
            .field(&self.saved_key)
            .map(|value| value.into_owned())
            .ok_or(InsertRejection::MissingSavedKey)?;
        if self.index.contains(&value) {
            return Err(InsertRejection::Duplicate(value));
        }

        let position = position.min(self.records.len());
        self.records.insert(position, record);
        self.values.insert(position, value.clone());
        self.index.insert(value.clone());
        Ok(value)
    }

    pub fn push(&mut self, record: Record) -> Result<String, InsertRejection> {
        self.insert(self.records.len(), record)
    }

    pub fn remove(&mut self, position: usize) -> Option<Record> {
        if position >= self.records.len() {
            return None;
        }
        let value = self.values.remove(position);
        self.index.remove(&value);
        Some(self.records.remove(position))
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.values.clear();
        self.index.clear();
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for value in &self.values {
            out.push_str(value);
            out.push(VALUE_SEPARATOR);
        }
        out
    }
}

/// Splits a serialized value back into saved-key values, skipping blanks.
pub fn split_value(serialized: &str) -> impl Iterator<Item = &str> {
    serialized
        .split(VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
