//! Query documents and row fixtures read from disk.

use std::path::{Path, PathBuf};

use rets_adapter::MemoryServer;
use rets_proto::{Row, SearchQuery, StorageMap};
use serde::Deserialize;
use thiserror::Error;

/// Errors while loading input files.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for its role.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A query together with the storage map it resolves against.
///
/// ```json
/// {
///   "storage": { "Heffalump": { "resource": "Property", "class": "RES" } },
///   "query": { "entity": "Heffalump", "fields": ["id", "COLOR"], "limit": 5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryDocument {
    pub storage: StorageMap,
    pub query: SearchQuery,
}

/// Rows for one resource/class of the simulated server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureTable {
    pub resource: String,
    pub class: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Load a query document.
pub fn load_query(path: &Path) -> Result<QueryDocument, DocumentError> {
    load_json(path)
}

/// Load a fixture into a simulated server.
pub fn load_server(path: &Path) -> Result<MemoryServer, DocumentError> {
    let tables: Vec<FixtureTable> = load_json(path)?;
    let mut server = MemoryServer::new();
    for table in tables {
        server.insert(table.resource, table.class, table.rows);
    }
    Ok(server)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocumentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rets_proto::{Condition, Value};

    #[test]
    fn test_parse_query_document() {
        let doc: QueryDocument = serde_json::from_str(
            r#"{
                "storage": { "Heffalump": { "resource": "Property", "class": "RES" } },
                "query": {
                    "entity": "Heffalump",
                    "fields": ["id", "COLOR"],
                    "conditions": [
                        { "kind": "equality", "field": "COLOR", "value": { "type": "string", "value": "RED" } }
                    ],
                    "limit": 5
                }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.storage.resolve("Heffalump").unwrap().class, "RES");
        assert_eq!(doc.query.conditions, vec![Condition::eq("COLOR", "RED")]);
        assert_eq!(doc.query.limit, Some(5));
    }

    #[test]
    fn test_parse_temporal_conditions() {
        let doc: QueryDocument = serde_json::from_str(
            r#"{
                "storage": {},
                "query": {
                    "entity": "Heffalump",
                    "conditions": [
                        { "kind": "less_than", "field": "CREATED",
                          "value": { "type": "datetime_text", "value": "1985-04-05T00:00:00Z" } },
                        { "kind": "equality", "field": "MODIFIED",
                          "value": { "type": "naive_datetime", "value": "1985-04-05T10:30:00" } },
                        { "kind": "equality", "field": "LISTED",
                          "value": { "type": "timestamp", "value": 481507200 } }
                    ]
                }
            }"#,
        )
        .unwrap();

        let modified = chrono::NaiveDate::from_ymd_opt(1985, 4, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            doc.query.conditions,
            vec![
                Condition::lt("CREATED", Value::datetime_text("1985-04-05T00:00:00Z")),
                Condition::eq("MODIFIED", modified),
                Condition::eq("LISTED", Value::Timestamp(481_507_200)),
            ]
        );
    }

    #[test]
    fn test_parse_fixture_table() {
        let tables: Vec<FixtureTable> = serde_json::from_str(
            r#"[{ "resource": "Property", "class": "RES", "rows": [{ "id": "1" }] }]"#,
        )
        .unwrap();
        assert_eq!(tables[0].rows[0].get("id"), Some("1"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_query(Path::new("/nonexistent/query.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/query.json"));
    }
}
