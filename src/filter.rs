use std::collections::HashSet;

use crate::record::Record;

#[derive(Debug, Clone, Copy)]
pub struct FilterQuery<'a> {
    pub keys: &'a [String],
    pub saved_key: &'a str,
    pub selected: &'a HashSet<String>,
    pub input: &'a str,
    pub max_result: usize,
}

pub trait CandidateFilter: Send + Sync {
    fn select(&self, records: &[Record], query: &FilterQuery<'_>) -> Vec<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Prefix,
    Contains,
}

/// Two-tier substring ranking: values starting with the input come first,
/// values containing it later come after. Case-sensitive.
#[derive(Debug, Default)]
pub struct TieredFilter;

impl CandidateFilter for TieredFilter {
    fn select(&self, records: &[Record], query: &FilterQuery<'_>) -> Vec<usize> {
        if query.input.is_empty() || query.max_result == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            if prefix.len() >= query.max_result {
                break;
            }
            if is_selected(record, query) {
                continue;
            }
            match classify(record, query.keys, query.input) {
                Some(Tier::Prefix) => prefix.push(idx),
                Some(Tier::Contains) => contains.push(idx),
                None => {}
            }
        }

        if prefix.len() >= query.max_result {
            prefix.truncate(query.max_result);
            return prefix;
        }

        let prefix_values: HashSet<String> = prefix
            .iter()
            .filter_map(|idx| records[*idx].field(query.saved_key))
            .map(|value| value.into_owned())
            .collect();
        contains.retain(|idx| {
            !records[*idx]
                .field(query.saved_key)
                .is_some_and(|value| prefix_values.contains(value.as_ref()))
        });

        prefix.extend(contains);
        prefix.truncate(query.max_result);
        prefix
    }
}

fn is_selected(record: &Record, query: &FilterQuery<'_>) -> bool {
    record
        .field(query.saved_key)
        .is_some_and(|value| query.selected.contains(value.as_ref()))
}

/// The first key whose value contains the input decides the tier.
fn classify(record: &Record, keys: &[String], input: &str) -> Option<Tier> {
    for key in keys {
        let Some(value) = record.field(key) else {
            continue;
        };
        match value.find(input) {
            Some(0) => return Some(Tier::Prefix),
            Some(_) => return Some(Tier::Contains),
            None => {}
        }
    }
    None
}
