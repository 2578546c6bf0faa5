use serde_json::Value;

use crate::error::SelectorResult;
use crate::record::{Record, records_from_json};

use super::core::Selector;
use super::selection::{InsertRejection, split_value};

impl Selector {
    pub fn value(&self) -> &str {
        &self.field.value
    }

    pub fn set_value(&mut self, records: Vec<Record>) -> usize {
        self.selected.clear();
        self.state.cursor = 0;
        self.append_value(records)
    }

    pub fn append_value(&mut self, records: Vec<Record>) -> usize {
        let mut appended = 0;
        for record in records {
            match self.selected.push(record) {
                Ok(_) => appended += 1,
                Err(InsertRejection::Duplicate(value)) => {
                    tracing::debug!(%value, "skipping already selected record");
                }
                Err(InsertRejection::MissingSavedKey) => {
                    tracing::warn!(
                        saved_key = %self.keys.saved,
                        "skipping record without saved-key value"
                    );
                }
            }
        }
        self.state.cursor = self.selected.len();
        self.sync_field();
        self.refresh_if_typing();
        appended
    }

    /// Like [`Selector::set_value`] for untyped input. A non-array is reported
    /// and leaves the selection untouched.
    pub fn set_json(&mut self, value: &Value) -> SelectorResult<usize> {
        let records = self.checked_records(value)?;
        Ok(self.set_value(records))
    }

    pub fn append_json(&mut self, value: &Value) -> SelectorResult<usize> {
        let records = self.checked_records(value)?;
        Ok(self.append_value(records))
    }

    /// Restores a serialized value by looking each saved value up in the
    /// candidate pool. Unknown values are skipped.
    pub fn load_value(&mut self, serialized: &str) -> usize {
        let saved_key = self.keys.saved.clone();
        let mut records = Vec::new();
        for value in split_value(serialized) {
            let found = self
                .data
                .iter()
                .find(|record| record.field(&saved_key).is_some_and(|v| v == value));
            match found {
                Some(record) => records.push(record.clone()),
                None => tracing::warn!(%value, "no record matches serialized value"),
            }
        }
        self.append_value(records)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.state.cursor = 0;
        self.sync_field();
        self.refresh_if_typing();
    }

    pub fn set_data(&mut self, records: Vec<Record>) {
        self.data = records;
        self.refresh_if_typing();
    }

    fn checked_records(&self, value: &Value) -> SelectorResult<Vec<Record>> {
        records_from_json(value).inspect_err(|err| {
            tracing::warn!(error = %err, field = %self.field.name, "bulk update skipped");
        })
    }
}
