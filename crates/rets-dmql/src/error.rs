//! Error types for value encoding and query translation.

use thiserror::Error;

/// A value could not be rendered as a DMQL literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Text could not be read as a date/time.
    #[error("cannot parse '{0}' as a date/time")]
    UnparseableDateTime(String),

    /// Epoch seconds outside the representable date range.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Translation of a query into a search request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The queried entity has no resource/class mapping.
    #[error("entity '{entity}' is not mapped to a RETS resource/class")]
    Configuration { entity: String },

    /// A condition value could not be encoded.
    #[error("cannot encode value for field '{field}': {source}")]
    Encoding {
        field: String,
        #[source]
        source: EncodeError,
    },
}

impl TranslateError {
    /// Create an unmapped entity error.
    pub fn unmapped_entity(entity: &str) -> Self {
        TranslateError::Configuration {
            entity: entity.to_string(),
        }
    }

    /// Create an encoding error for a field.
    pub fn encoding(field: &str, source: EncodeError) -> Self {
        TranslateError::Encoding {
            field: field.to_string(),
            source,
        }
    }

    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TranslateError::Configuration { .. })
    }
}
