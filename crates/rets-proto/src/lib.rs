//! RETS adapter data model.
//!
//! This crate defines the types that flow through the adapter: the query a
//! caller hands in, the search request handed to a RETS client, and the raw
//! rows that come back.
//!
//! # Modules
//!
//! - [`value`] - Typed filter values
//! - [`query`] - Field references, filter conditions and the query description
//! - [`storage`] - Entity to RETS resource/class mapping
//! - [`search`] - Search requests, search options and result rows
//!
//! All types derive `serde::Serialize` and `serde::Deserialize` so query
//! documents and row fixtures can be loaded from JSON.

pub mod query;
pub mod search;
pub mod storage;
pub mod value;

// Re-export commonly used types at crate root
pub use query::{Condition, ConditionKind, FieldRef, SearchQuery};
pub use search::{Row, SearchOptions, SearchRequest};
pub use storage::{StorageMap, StorageName};
pub use value::Value;
