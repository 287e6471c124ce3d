//! Simulated RETS server over in-memory tables.
//!
//! `MemoryServer` answers searches the way a lenient RETS server would for the
//! DMQL subset the translator emits:
//!
//! - `(field=value)` matches rows whose field equals the value,
//! - `(field=lo-hi)` matches `lo <= field <= hi`,
//! - `(field=value-)` matches `field <= value`,
//! - comma-separated clauses must all match, and an empty query matches every
//!   row.
//!
//! Values are compared as numbers when both sides parse as numbers, as
//! date/times when both sides parse as date/times, and as text otherwise. A
//! row missing the field never matches.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parking_lot::Mutex;
use rets_proto::{Row, SearchRequest};
use tracing::trace;

use crate::error::ServerError;
use crate::invoker::SearchInvoker;

/// An in-memory RETS server.
#[derive(Debug, Default)]
pub struct MemoryServer {
    tables: BTreeMap<(String, String), Vec<Row>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MemoryServer {
    /// Create a server with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rows to a resource/class table (builder form).
    pub fn with_table(
        mut self,
        resource: impl Into<String>,
        class: impl Into<String>,
        rows: Vec<Row>,
    ) -> Self {
        self.insert(resource, class, rows);
        self
    }

    /// Add rows to a resource/class table, creating it if needed.
    pub fn insert(&mut self, resource: impl Into<String>, class: impl Into<String>, rows: Vec<Row>) {
        self.tables
            .entry((resource.into(), class.into()))
            .or_default()
            .extend(rows);
    }

    /// Get every request served so far, oldest first.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }

    /// Remove and return every request served so far, oldest first.
    pub fn take_requests(&self) -> Vec<SearchRequest> {
        std::mem::take(&mut *self.requests.lock())
    }

    fn table(&self, resource: &str, class: &str) -> Result<&[Row], ServerError> {
        self.tables
            .get(&(resource.to_string(), class.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| ServerError::UnknownClass {
                resource: resource.to_string(),
                class: class.to_string(),
            })
    }
}

impl SearchInvoker for MemoryServer {
    type Error = ServerError;

    fn search(&self, request: &SearchRequest) -> Result<Vec<Row>, ServerError> {
        self.requests.lock().push(request.clone());

        let rows = self.table(&request.resource, &request.class)?;
        let clauses = parse_query(&request.dmql)?;
        let limit = parse_limit(request.options.limit.as_deref())?;
        let select: Vec<&str> = request
            .options
            .select
            .split(',')
            .filter(|f| !f.is_empty())
            .collect();

        let matched: Vec<Row> = rows
            .iter()
            .filter(|row| clauses.iter().all(|clause| clause.matches(row)))
            .take(limit.unwrap_or(usize::MAX))
            .map(|row| project(row, &select))
            .collect();

        trace!(
            resource = %request.resource,
            class = %request.class,
            clauses = clauses.len(),
            rows = matched.len(),
            "served search"
        );

        Ok(matched)
    }
}

/// One parsed `(field=expr)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    field: String,
    test: ClauseTest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClauseTest {
    Equals(String),
    Between(String, String),
    AtMost(String),
}

impl Clause {
    fn matches(&self, row: &Row) -> bool {
        let Some(actual) = row.get(&self.field) else {
            return false;
        };

        match &self.test {
            ClauseTest::Equals(value) => compare(actual, value).is_eq(),
            ClauseTest::Between(lo, hi) => {
                compare(actual, lo).is_ge() && compare(actual, hi).is_le()
            }
            ClauseTest::AtMost(value) => compare(actual, value).is_le(),
        }
    }
}

fn parse_query(dmql: &str) -> Result<Vec<Clause>, ServerError> {
    let dmql = dmql.trim();
    if dmql.is_empty() {
        return Ok(Vec::new());
    }

    let inner = dmql
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| ServerError::MalformedQuery(dmql.to_string()))?;

    inner.split("),(").map(parse_clause).collect()
}

fn parse_clause(text: &str) -> Result<Clause, ServerError> {
    let malformed = || ServerError::MalformedQuery(text.to_string());

    let (field, expr) = text.split_once('=').ok_or_else(malformed)?;
    if field.is_empty() || field.contains(['(', ')']) {
        return Err(malformed());
    }

    let test = if let Some(upper) = expr.strip_suffix('-').filter(|u| !u.is_empty()) {
        ClauseTest::AtMost(upper.to_string())
    } else if let Some((lo, hi)) = split_range(expr) {
        ClauseTest::Between(lo.to_string(), hi.to_string())
    } else {
        ClauseTest::Equals(expr.to_string())
    };

    Ok(Clause {
        field: field.to_string(),
        test,
    })
}

/// Find the `-` separating two endpoints of the same kind.
///
/// Dates contain dashes of their own, so every candidate is tried and the
/// first split whose halves are both numbers or both date/times wins.
fn split_range(expr: &str) -> Option<(&str, &str)> {
    expr.match_indices('-')
        .map(|(i, _)| i)
        .filter(|&i| i > 0 && i + 1 < expr.len())
        .map(|i| (&expr[..i], &expr[i + 1..]))
        .find(|(lo, hi)| {
            (parse_number(lo).is_some() && parse_number(hi).is_some())
                || (parse_datetime(lo).is_some() && parse_datetime(hi).is_some())
        })
}

fn parse_limit(limit: Option<&str>) -> Result<Option<usize>, ServerError> {
    match limit.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ServerError::InvalidLimit(text.to_string())),
    }
}

fn project(row: &Row, select: &[&str]) -> Row {
    if select.is_empty() {
        return row.clone();
    }
    select
        .iter()
        .filter_map(|field| row.get(field).map(|value| (*field, value)))
        .collect()
}

fn compare(actual: &str, literal: &str) -> Ordering {
    if let (Some(a), Some(b)) = (parse_number(actual), parse_number(literal)) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Less);
    }
    if let (Some(a), Some(b)) = (parse_datetime(actual), parse_datetime(literal)) {
        return a.cmp(&b);
    }
    actual.cmp(literal)
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
