use std::collections::HashSet;

use serde::Serialize;

use super::model::{Dataset, TrainingRecord};

// ---------------------------------------------------------------------------
// SearchResult – unique trainee identifiers in first-appearance order
// ---------------------------------------------------------------------------

/// An empty result is a normal "no match" outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    ids: Vec<String>,
}

impl SearchResult {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

// ---------------------------------------------------------------------------
// Search predicate
// ---------------------------------------------------------------------------

/// A row matches when its name contains `query` (case-sensitive, no
/// trimming) or its identifier equals `query` exactly.
///
/// A blank name never matches on the name clause.
pub fn row_matches(row: &TrainingRecord, query: &str) -> bool {
    let name_hit = row.name.as_deref().is_some_and(|n| n.contains(query));
    name_hit || row.trainee_id == query
}

/// Return indices of rows that pass the search predicate.
pub fn matching_rows(dataset: &Dataset, query: &str) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, query))
        .map(|(i, _)| i)
        .collect()
}

/// Unique identifiers of matching rows, in order of first appearance.
///
/// The empty string is a substring of every name, so an empty query matches
/// every trainee with a name; callers are expected not to search for it.
pub fn search(dataset: &Dataset, query: &str) -> SearchResult {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for i in matching_rows(dataset, query) {
        let id = dataset.rows[i].trainee_id.as_str();
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }
    SearchResult { ids }
}
