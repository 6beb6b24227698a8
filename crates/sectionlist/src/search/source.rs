//! The search source abstraction.

use std::sync::Arc;

use parking_lot::RwLock;
use sectionlist_core::Property;
use sectionlist_core::logging::targets;

/// Callback fired when a search source's query changes.
pub type QueryUpdateHandler = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// A source of "current query text" plus a change notification.
///
/// A data source made searchable against a `SearchSource` filters its
/// contents by [`active_query`](Self::active_query) and re-filters whenever
/// the handler installed through [`set_query_updated`](Self::set_query_updated)
/// fires.
pub trait SearchSource: Send + Sync {
    /// The current query. `None` or an empty string means no active search.
    fn active_query(&self) -> Option<String>;

    /// Replaces the handler invoked whenever the query changes.
    fn set_query_updated(&self, handler: QueryUpdateHandler);

    /// Whether a non-empty query is active.
    fn is_searching(&self) -> bool {
        self.active_query().is_some_and(|query| !query.is_empty())
    }
}

/// A search source driven programmatically.
///
/// Useful for hosts whose search input is not a [`SearchField`](super::SearchField),
/// and for tests.
///
/// ```
/// use sectionlist::search::{SearchSource, TextQuerySource};
///
/// let source = TextQuerySource::new();
/// assert!(!source.is_searching());
///
/// source.set_query(Some("an".into()));
/// assert_eq!(source.active_query().as_deref(), Some("an"));
/// ```
pub struct TextQuerySource {
    query: Property<Option<String>>,
    handler: RwLock<Option<QueryUpdateHandler>>,
}

impl Default for TextQuerySource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextQuerySource {
    /// Creates a source with no active query.
    pub fn new() -> Self {
        Self {
            query: Property::new(None),
            handler: RwLock::new(None),
        }
    }

    /// Creates a source with an initial query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Property::new(Some(query.into())),
            handler: RwLock::new(None),
        }
    }

    /// Sets the query, firing the handler if it changed.
    ///
    /// Returns whether the query changed.
    pub fn set_query(&self, query: Option<String>) -> bool {
        if !self.query.set(query.clone()) {
            return false;
        }
        tracing::trace!(target: targets::SEARCH, query = ?query, "query changed");

        // Clone out so the handler may call back into this source.
        let handler = self.handler.read().clone();
        if let Some(handler) = handler {
            handler(query.as_deref());
        }
        true
    }

    /// Clears the query.
    pub fn clear(&self) -> bool {
        self.set_query(None)
    }
}

impl SearchSource for TextQuerySource {
    fn active_query(&self) -> Option<String> {
        self.query.get()
    }

    fn set_query_updated(&self, handler: QueryUpdateHandler) {
        *self.handler.write() = Some(handler);
    }
}

impl std::fmt::Debug for TextQuerySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextQuerySource")
            .field("query", &self.query)
            .field("has_handler", &self.handler.read().is_some())
            .finish()
    }
}
