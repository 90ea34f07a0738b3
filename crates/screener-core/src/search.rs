//! Free-text search over record code and name.
//!
//! Matching is case-insensitive substring containment using the
//! locale-neutral [`str::to_lowercase`] transform. A record matches if its
//! code OR its name contains the query. The empty query matches everything.

use crate::record::Record;

/// A lowercased search needle, prepared once per search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Prepares a query from user input.
    pub fn new(query: &str) -> Self {
        SearchQuery {
            needle: query.to_lowercase(),
        }
    }

    /// Returns `true` if this query matches every record.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns the lowercased needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Tests a single record.
    pub fn matches(&self, record: &Record) -> bool {
        self.is_empty()
            || contains_folded(&record.code, &self.needle)
            || contains_folded(&record.name, &self.needle)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Tests a single record against a raw query string.
pub fn matches_query(record: &Record, query: &str) -> bool {
    SearchQuery::new(query).matches(record)
}

/// Keeps the records whose code or name contains `query`, ignoring case.
///
/// Relative order is preserved.
pub fn search<'a>(records: &[&'a Record], query: &str) -> Vec<&'a Record> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .copied()
        .filter(|record| query.matches(record))
        .collect()
}
