//! Search requests handed to a RETS client, and the rows it returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options sent alongside the DMQL query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Comma-joined wire field names. Empty means the server's default set.
    pub select: String,
    /// Decimal row limit. `None` leaves the limit to the server.
    pub limit: Option<String>,
}

impl SearchOptions {
    /// Option name for the select list.
    pub const SELECT: &'static str = "Select";
    /// Option name for the row limit.
    pub const LIMIT: &'static str = "Limit";

    /// Get the options as `(name, value)` pairs, `Select` first.
    ///
    /// `Limit` is left out entirely when no limit was given.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![(Self::SELECT, self.select.as_str())];
        if let Some(limit) = &self.limit {
            pairs.push((Self::LIMIT, limit.as_str()));
        }
        pairs
    }
}

/// A fully translated search, ready for a RETS client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// RETS resource identifier.
    pub resource: String,
    /// RETS class identifier.
    pub class: String,
    /// DMQL filter. Empty when no condition was translated.
    pub dmql: String,
    /// Select and limit options.
    pub options: SearchOptions,
}

impl SearchRequest {
    /// Get the DMQL filter, or `None` when it is empty.
    ///
    /// Clients that distinguish an absent query argument from an empty one
    /// should use this rather than `dmql` directly.
    pub fn filter(&self) -> Option<&str> {
        if self.dmql.is_empty() {
            None
        } else {
            Some(&self.dmql)
        }
    }
}

/// One result row: wire field name to raw text value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
