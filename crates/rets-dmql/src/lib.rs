//! DMQL translation for RETS searches.
//!
//! This crate turns a [`SearchQuery`] into the [`SearchRequest`] a RETS client
//! sends: a DMQL filter string, a comma-joined select list and a limit.
//!
//! # DMQL emitted
//!
//! ```text
//! (num_spots=1-5),(COLOR=RED),(CREATED=1985-04-05T00:00:00-)
//! ```
//!
//! Clauses are comma-separated (RETS reads the comma as AND). Each clause is
//! one of `(field=value)`, `(field=lo-hi)` or `(field=value-)`. Conditions
//! with no DMQL rendering are dropped rather than failing the search.
//!
//! # Usage
//!
//! ```rust
//! use rets_dmql::translate;
//! use rets_proto::{Condition, SearchQuery, StorageMap};
//!
//! let storage = StorageMap::new().with_entity("Heffalump", "Property", "RES");
//! let query = SearchQuery::new("Heffalump")
//!     .with_fields(["id", "COLOR"])
//!     .filter(Condition::range("num_spots", 1, 5))
//!     .with_limit(5);
//!
//! let request = translate(&storage, &query).unwrap();
//! assert_eq!(request.dmql, "(num_spots=1-5)");
//! assert_eq!(request.options.select, "id,COLOR");
//! ```

pub mod encoder;
pub mod error;
pub mod translator;

pub use encoder::{encode, strip_utc_offset, DATETIME_FORMAT};
pub use error::{EncodeError, TranslateError};
pub use translator::{render_limit, render_select, ConditionPolicy, Translator};

use rets_proto::{SearchQuery, SearchRequest, StorageMap};

/// Translate a query with the default [`ConditionPolicy`].
///
/// # Example
///
/// ```rust
/// use rets_dmql::translate;
/// use rets_proto::{SearchQuery, StorageMap};
///
/// let storage = StorageMap::new().with_entity("Heffalump", "Property", "RES");
/// let request = translate(&storage, &SearchQuery::new("Heffalump")).unwrap();
/// assert!(request.dmql.is_empty());
/// ```
pub fn translate(storage: &StorageMap, query: &SearchQuery) -> Result<SearchRequest, TranslateError> {
    Translator::default().translate(storage, query)
}
