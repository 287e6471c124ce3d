//! The seam between the adapter and a RETS protocol client.

use rets_proto::{Row, SearchRequest};

/// Executes translated searches against a RETS server.
///
/// Implementations own everything on the wire: connecting, logging in and
/// parsing the response envelope. A call is synchronous and made at most once
/// per read; the adapter never retries.
pub trait SearchInvoker {
    /// Error raised by the client. Passed to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a search and return its rows in server order.
    fn search(&self, request: &SearchRequest) -> Result<Vec<Row>, Self::Error>;
}

impl<T: SearchInvoker + ?Sized> SearchInvoker for &T {
    type Error = T::Error;

    fn search(&self, request: &SearchRequest) -> Result<Vec<Row>, Self::Error> {
        (**self).search(request)
    }
}

impl<T: SearchInvoker + ?Sized> SearchInvoker for Box<T> {
    type Error = T::Error;

    fn search(&self, request: &SearchRequest) -> Result<Vec<Row>, Self::Error> {
        (**self).search(request)
    }
}
