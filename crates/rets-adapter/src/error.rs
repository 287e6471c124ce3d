//! Adapter error types.

use rets_dmql::TranslateError;
use thiserror::Error;

/// A read failed.
///
/// `E` is the invoker's own error type, carried through unchanged.
#[derive(Debug, Error)]
pub enum ReadError<E> {
    /// The query could not be translated; no search was sent.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The search itself failed.
    #[error(transparent)]
    Search(E),
}

impl<E> ReadError<E> {
    /// Get the invoker error, if the search failed.
    pub fn search_error(&self) -> Option<&E> {
        match self {
            ReadError::Search(e) => Some(e),
            ReadError::Translate(_) => None,
        }
    }
}

/// Errors raised by the simulated RETS server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// No table for the requested resource/class.
    #[error("unknown resource/class '{resource}:{class}'")]
    UnknownClass { resource: String, class: String },

    /// A DMQL clause could not be parsed.
    #[error("malformed DMQL clause '{0}'")]
    MalformedQuery(String),

    /// The limit option is not a non-negative integer.
    #[error("invalid limit '{0}'")]
    InvalidLimit(String),
}
