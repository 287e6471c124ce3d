//! RETS Adapter - read-only access to RETS servers through ORM-style queries.
//!
//! The adapter resolves an entity to its RETS resource/class, translates the
//! query to DMQL, hands the search to a [`SearchInvoker`] and returns the raw
//! rows untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use rets_adapter::{AdapterConfig, MemoryServer, RetsAdapter};
//! use rets_proto::{Condition, Row, SearchQuery, StorageMap};
//!
//! let server = MemoryServer::new().with_table(
//!     "Property",
//!     "RES",
//!     vec![
//!         Row::from_iter([("id", "1"), ("num_spots", "2")]),
//!         Row::from_iter([("id", "2"), ("num_spots", "5")]),
//!     ],
//! );
//! let storage = StorageMap::new().with_entity("Heffalump", "Property", "RES");
//! let adapter = RetsAdapter::new(AdapterConfig::default(), storage, server);
//!
//! let query = SearchQuery::new("Heffalump")
//!     .with_fields(["id"])
//!     .filter(Condition::range("num_spots", 4, 6));
//! let rows = adapter.read(&query).unwrap();
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].get("id"), Some("2"));
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod invoker;
pub mod memory;

pub use adapter::RetsAdapter;
pub use config::AdapterConfig;
pub use error::{ReadError, ServerError};
pub use invoker::SearchInvoker;
pub use memory::MemoryServer;

/// Re-export protocol types.
pub use rets_proto as proto;
/// Re-export the DMQL translator.
pub use rets_dmql as dmql;
