//! The read path: translate, search, return rows.

use rets_dmql::{TranslateError, Translator};
use rets_proto::{Row, SearchQuery, SearchRequest, StorageMap};
use tracing::{debug, info_span, Span};

use crate::config::AdapterConfig;
use crate::error::ReadError;
use crate::invoker::SearchInvoker;

/// Read-only adapter over a RETS search client.
///
/// Log output goes to the span the adapter was built with, so several
/// adapters in one process stay distinguishable without any global setup.
pub struct RetsAdapter<I> {
    config: AdapterConfig,
    storage: StorageMap,
    translator: Translator,
    invoker: I,
    span: Span,
}

impl<I: SearchInvoker> RetsAdapter<I> {
    /// Create an adapter.
    pub fn new(config: AdapterConfig, storage: StorageMap, invoker: I) -> Self {
        let span = info_span!("rets_adapter", adapter = %config.name, url = %config.url);
        Self {
            translator: Translator::new(config.policy),
            config,
            storage,
            invoker,
            span,
        }
    }

    /// Replace the span log output is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Translate a query without running it.
    pub fn prepare(&self, query: &SearchQuery) -> Result<SearchRequest, TranslateError> {
        let _entered = self.span.enter();
        self.translator.translate(&self.storage, query)
    }

    /// Run a query and return the matching rows as the server sent them.
    ///
    /// Translation errors are returned before the invoker is called. Invoker
    /// errors are returned unchanged.
    pub fn read(&self, query: &SearchQuery) -> Result<Vec<Row>, ReadError<I::Error>> {
        let _entered = self.span.enter();

        let request = self.translator.translate(&self.storage, query)?;
        debug!(
            entity = %query.entity,
            resource = %request.resource,
            class = %request.class,
            dmql = %request.dmql,
            select = %request.options.select,
            limit = request.options.limit.as_deref().unwrap_or(""),
            "issuing search"
        );

        let rows = self.invoker.search(&request).map_err(ReadError::Search)?;
        debug!(entity = %query.entity, rows = rows.len(), "search completed");

        Ok(rows)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Get the storage map.
    pub fn storage(&self) -> &StorageMap {
        &self.storage
    }

    /// Get the invoker.
    pub fn invoker(&self) -> &I {
        &self.invoker
    }
}

impl<I> std::fmt::Debug for RetsAdapter<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetsAdapter")
            .field("config", &self.config)
            .field("storage", &self.storage)
            .field("translator", &self.translator)
            .finish()
    }
}
