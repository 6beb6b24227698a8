//! The sectioned, searchable data source.
//!
//! [`DataSource<M>`] owns the list contents for a widget. It keeps two
//! views:
//!
//! - the **raw** contents, replaced wholesale through
//!   [`update`](DataSource::update) and optionally regrouped by
//!   [`section_contents`](DataSource::section_contents)
//! - the **filtered** contents, recomputed from the raw view whenever the
//!   installed [`SearchSource`] reports a new query
//!
//! The widget always sees the *active* view: the filtered contents while a
//! non-empty query is active, the raw contents otherwise. Every change to the
//! active view is announced once through
//! [`DataSourceSignals::contents_updated`]. By default the data source
//! reacts to that by asking the linked [`TableHost`] to reload.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sectionlist::prelude::*;
//!
//! let people = DataSource::with_items(None, vec![mary, john, anne]);
//! people.link::<PersonCell>(table.clone());
//! people.section_contents_by(|p: &Person| p.name.clone(), IndexDisplayMethod::SingleLetter, true);
//!
//! let search = Arc::new(TextQuerySource::new());
//! people.make_searchable_by_key(search.clone(), |p: &Person| p.name.clone(), true);
//! search.set_query(Some("an".into()));
//! ```
//!
//! # Threading
//!
//! `DataSource` is a cheap [`Clone`] handle; clones share state. No internal
//! lock is held while user code (sectioning keys, predicates, configurators,
//! update handlers) runs, so such code may call back into the data source.

mod filter;
mod sectioning;

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use sectionlist_core::logging::{span_names, targets};
use sectionlist_core::{ConnectionId, PerfSpan, Signal};

use crate::cell::{CellBindable, CellHandle, CellIdentifiable, CellKind, CellRetriever};
use crate::config::{DataSourceConfig, IndexDisplayMethod, SearchOptions, SectioningOptions};
use crate::contents::{IndexPath, TableContents};
use crate::error::{ListSourceError, Result};
use crate::search::{QueryUpdateHandler, SearchField, SearchFieldSource, SearchSource};
use crate::traits::{ItemSource, TableDataSource, TableHost};

pub use filter::FilterFn;
pub use sectioning::SectioningFn;

/// Type alias for the cell configurator installed by the `link` family.
pub type CellConfigurator<M> =
    Arc<dyn Fn(&CellRetriever, &M, IndexPath) -> CellHandle + Send + Sync>;

/// Whether a wholesale update is in progress.
///
/// While [`Updating`](Self::Updating), intermediate content changes do not
/// notify; the update notifies once when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePhase {
    /// Content changes notify immediately.
    #[default]
    Idle,
    /// Notifications are deferred to the end of the update.
    Updating,
}

/// Signals emitted by a [`DataSource`].
pub struct DataSourceSignals<M> {
    /// Emitted with the active view whenever it changes.
    pub contents_updated: Signal<TableContents<M>>,
}

impl<M: Clone + Send + 'static> Default for DataSourceSignals<M> {
    fn default() -> Self {
        Self {
            contents_updated: Signal::new(),
        }
    }
}

#[derive(Clone)]
struct SearchState<M> {
    source: Arc<dyn SearchSource>,
    predicate: FilterFn<M>,
}

#[derive(Clone)]
struct SectioningState<M> {
    method: SectioningFn<M>,
    sort_alphabetically: bool,
}

struct LinkState<M> {
    host: Weak<dyn TableHost>,
    retriever: Arc<CellRetriever>,
    configurator: CellConfigurator<M>,
}

struct ContentState<M> {
    contents: TableContents<M>,
    filtered: TableContents<M>,
}

struct Inner<M> {
    state: RwLock<ContentState<M>>,
    /// Number of updates in progress, across threads and nesting.
    update_depth: Mutex<usize>,
    search: RwLock<Option<SearchState<M>>>,
    sectioning: RwLock<Option<SectioningState<M>>>,
    index_display: RwLock<IndexDisplayMethod>,
    config: RwLock<DataSourceConfig>,
    link: RwLock<Option<LinkState<M>>>,
    update_handler: Mutex<Option<ConnectionId>>,
    signals: DataSourceSignals<M>,
}

impl<M> Inner<M> {
    fn update_phase(&self) -> UpdatePhase {
        if *self.update_depth.lock() > 0 {
            UpdatePhase::Updating
        } else {
            UpdatePhase::Idle
        }
    }

    /// Leaves one update; returns whether none remain in progress.
    fn leave_update(&self) -> bool {
        let mut depth = self.update_depth.lock();
        *depth = depth.saturating_sub(1);
        *depth == 0
    }
}

/// Counts an update in progress until left or dropped.
struct UpdateGuard<'a, M> {
    inner: &'a Inner<M>,
    left: bool,
}

impl<'a, M> UpdateGuard<'a, M> {
    fn enter(inner: &'a Inner<M>) -> Self {
        *inner.update_depth.lock() += 1;
        Self { inner, left: false }
    }

    /// Leaves the update. Returns `true` for the last update to finish,
    /// which owns the notification.
    fn leave(mut self) -> bool {
        self.left = true;
        self.inner.leave_update()
    }
}

impl<M> Drop for UpdateGuard<'_, M> {
    fn drop(&mut self) {
        if !self.left {
            self.inner.leave_update();
        }
    }
}

/// A sectioned, searchable list data source.
///
/// See the [module documentation](self) for an overview.
pub struct DataSource<M> {
    inner: Arc<Inner<M>>,
}

impl<M> Clone for DataSource<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M: Clone + Send + Sync + 'static> DataSource<M> {
    /// Creates a data source that reloads its linked host on every change.
    pub fn new(contents: TableContents<M>) -> Self {
        let source = Self::bare(contents);
        let weak = Arc::downgrade(&source.inner);
        source.install_update_handler(move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let host = inner.link.read().as_ref().and_then(|link| link.host.upgrade());
            match host {
                Some(host) => host.reload_data(),
                None => tracing::trace!(target: targets::DATA_SOURCE, "no live host to reload"),
            }
        });
        source
    }

    /// Creates a data source holding a single section of `items`.
    pub fn with_items(title: Option<String>, items: Vec<M>) -> Self {
        Self::new(TableContents::from_items(title, items))
    }

    /// Creates a data source that hands every change to `handler` instead of
    /// reloading the host.
    pub fn with_update_handler<F>(contents: TableContents<M>, handler: F) -> Self
    where
        F: Fn(&TableContents<M>) + Send + Sync + 'static,
    {
        let source = Self::bare(contents);
        source.install_update_handler(handler);
        source
    }

    fn bare(contents: TableContents<M>) -> Self {
        tracing::debug!(
            target: targets::DATA_SOURCE,
            sections = contents.len(),
            items = contents.total_items(),
            "creating data source"
        );
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(ContentState {
                    contents,
                    filtered: TableContents::empty(),
                }),
                update_depth: Mutex::new(0),
                search: RwLock::new(None),
                sectioning: RwLock::new(None),
                index_display: RwLock::new(IndexDisplayMethod::default()),
                config: RwLock::new(DataSourceConfig::default()),
                link: RwLock::new(None),
                update_handler: Mutex::new(None),
                signals: DataSourceSignals::default(),
            }),
        }
    }

    fn from_inner(inner: Arc<Inner<M>>) -> Self {
        Self { inner }
    }

    fn install_update_handler<F>(&self, handler: F)
    where
        F: Fn(&TableContents<M>) + Send + Sync + 'static,
    {
        let id = self.inner.signals.contents_updated.connect(handler);
        let previous = self.inner.update_handler.lock().replace(id);
        if let Some(previous) = previous {
            self.inner.signals.contents_updated.disconnect(previous);
        }
    }

    /// Replaces the update handler chosen at construction.
    ///
    /// Other slots connected to [`signals`](Self::signals) are unaffected.
    pub fn set_update_handler<F>(&self, handler: F)
    where
        F: Fn(&TableContents<M>) + Send + Sync + 'static,
    {
        tracing::debug!(target: targets::DATA_SOURCE, "replacing update handler");
        self.install_update_handler(handler);
    }

    /// The data source's signals.
    pub fn signals(&self) -> &DataSourceSignals<M> {
        &self.inner.signals
    }

    /// Applies display and search defaults.
    ///
    /// [`section_by`](Self::section_by), [`search_by`](Self::search_by) and
    /// [`search_field_by`](Self::search_field_by) read their options from
    /// here. Nothing already configured is recomputed.
    pub fn apply_config(&self, config: &DataSourceConfig) {
        tracing::debug!(target: targets::CONFIG, ?config, "applying data source config");
        *self.inner.config.write() = *config;
    }

    /// The current defaults.
    pub fn config(&self) -> DataSourceConfig {
        *self.inner.config.read()
    }

    // -------------------------------------------------------------------------
    // Linking
    // -------------------------------------------------------------------------

    /// Links `host` using a single bindable cell kind.
    ///
    /// Every row dequeues a `C` and binds the row's item to it.
    pub fn link<C>(&self, host: Arc<dyn TableHost>)
    where
        C: CellBindable<Model = M>,
    {
        self.link_cells(host, vec![CellKind::of::<C>()], |retriever, item, index_path| {
            let cell = retriever.retrieve::<C>(Some(index_path));
            cell.bind(item);
            cell as CellHandle
        });
    }

    /// Links `host` using a single cell kind and a custom configurator.
    pub fn link_with<C, F>(&self, host: Arc<dyn TableHost>, configure: F)
    where
        C: CellIdentifiable,
        F: Fn(&M, &C) + Send + Sync + 'static,
    {
        self.link_cells(host, vec![CellKind::of::<C>()], move |retriever, item, index_path| {
            let cell = retriever.retrieve::<C>(Some(index_path));
            configure(item, &*cell);
            cell as CellHandle
        });
    }

    /// Links `host` with several cell kinds and a configurator that picks one
    /// per row.
    ///
    /// Registers every kind with the host, then stores the configurator. The
    /// host is held weakly. Linking again replaces the previous link.
    pub fn link_cells<F>(&self, host: Arc<dyn TableHost>, kinds: Vec<CellKind>, configurator: F)
    where
        F: Fn(&CellRetriever, &M, IndexPath) -> CellHandle + Send + Sync + 'static,
    {
        tracing::debug!(target: targets::DATA_SOURCE, kinds = kinds.len(), "linking table host");
        let retriever = Arc::new(CellRetriever::new(&host, kinds));
        *self.inner.link.write() = Some(LinkState {
            host: Arc::downgrade(&host),
            retriever,
            configurator: Arc::new(configurator),
        });
    }

    /// Whether a cell configurator has been linked.
    pub fn is_linked(&self) -> bool {
        self.inner.link.read().is_some()
    }

    /// The linked host, if it is still alive.
    pub fn host(&self) -> Option<Arc<dyn TableHost>> {
        self.inner.link.read().as_ref().and_then(|link| link.host.upgrade())
    }

    // -------------------------------------------------------------------------
    // Contents
    // -------------------------------------------------------------------------

    /// Replaces the contents wholesale.
    ///
    /// Re-filters against the active query and, if sectioning is configured,
    /// regroups with the stored method and options. Notifies exactly once,
    /// when everything is done. Updates that nest or overlap across threads
    /// share a single notification, sent when the last of them finishes.
    #[tracing::instrument(skip_all, target = "sectionlist::source", level = "debug")]
    pub fn update(&self, contents: TableContents<M>) {
        let _span = PerfSpan::new(span_names::UPDATE);
        tracing::debug!(
            target: targets::DATA_SOURCE,
            sections = contents.len(),
            items = contents.total_items(),
            "updating contents"
        );

        let notify = {
            let guard = UpdateGuard::enter(&self.inner);
            self.set_contents(contents);
            self.filter_contents();

            let sectioning = self.inner.sectioning.read().clone();
            if let Some(sectioning) = sectioning {
                self.regroup(&sectioning);
            }
            guard.leave()
        };

        if notify {
            self.notify();
        } else {
            tracing::trace!(target: targets::DATA_SOURCE, "update still in progress, deferring notification");
        }
    }

    /// Replaces the contents with a single section of `items`.
    pub fn update_items(&self, items: Vec<M>, title: Option<String>) {
        self.update(TableContents::from_items(title, items));
    }

    /// Fetches items from `source` and [`update`](Self::update)s with them
    /// as a single section.
    ///
    /// The result is dropped if every handle to this data source is gone by
    /// the time it arrives.
    pub fn load(&self, source: &dyn ItemSource<M>, title: Option<String>) {
        tracing::debug!(target: targets::DATA_SOURCE, "loading items");
        let weak = Arc::downgrade(&self.inner);
        source.fetch_items(Box::new(move |items| match weak.upgrade() {
            Some(inner) => {
                Self::from_inner(inner).update(TableContents::from_items(title, items));
            }
            None => {
                tracing::trace!(target: targets::DATA_SOURCE, "data source dropped before load finished");
            }
        }));
    }

    /// Replaces the raw contents without refiltering or regrouping.
    ///
    /// Notifies unless an update is in progress.
    pub fn set_contents(&self, contents: TableContents<M>) {
        self.inner.state.write().contents = contents;
        self.contents_changed("contents");
    }

    fn set_filtered_contents(&self, filtered: TableContents<M>) {
        self.inner.state.write().filtered = filtered;
        self.contents_changed("filtered contents");
    }

    /// The raw contents.
    pub fn contents(&self) -> TableContents<M> {
        self.inner.state.read().contents.clone()
    }

    /// The contents matching the active query.
    ///
    /// Empty when no search is installed or the query is empty.
    pub fn filtered_contents(&self) -> TableContents<M> {
        self.inner.state.read().filtered.clone()
    }

    /// The contents the widget displays.
    pub fn active_view(&self) -> TableContents<M> {
        self.with_active_view(TableContents::clone)
    }

    fn with_active_view<R>(&self, f: impl FnOnce(&TableContents<M>) -> R) -> R {
        let searching = self.is_searching();
        let state = self.inner.state.read();
        if searching {
            f(&state.filtered)
        } else {
            f(&state.contents)
        }
    }

    /// Resolves `index_path` against the active view.
    pub fn item_at(&self, index_path: IndexPath) -> Result<M> {
        self.with_active_view(|view| view.item(index_path).cloned())
    }

    /// Whether an update is in progress.
    pub fn update_phase(&self) -> UpdatePhase {
        self.inner.update_phase()
    }

    fn contents_changed(&self, what: &'static str) {
        match self.update_phase() {
            UpdatePhase::Idle => self.notify(),
            UpdatePhase::Updating => {
                tracing::trace!(target: targets::DATA_SOURCE, what, "change during update, notification suppressed");
            }
        }
    }

    fn notify(&self) {
        let view = self.active_view();
        tracing::trace!(
            target: targets::DATA_SOURCE,
            sections = view.len(),
            items = view.total_items(),
            "contents updated"
        );
        self.inner.signals.contents_updated.emit(view);
    }

    // -------------------------------------------------------------------------
    // Searching
    // -------------------------------------------------------------------------

    /// Makes the data source searchable against `source` with a custom
    /// predicate.
    ///
    /// Replaces `source`'s query handler with one that re-filters this data
    /// source, then filters once against the current query.
    pub fn make_searchable<F>(&self, source: Arc<dyn SearchSource>, predicate: F)
    where
        F: Fn(&M, &str) -> bool + Send + Sync + 'static,
    {
        self.install_search(source, Arc::new(predicate));
    }

    /// Makes the data source searchable by a string key: an item matches when
    /// its key contains the query.
    pub fn make_searchable_by_key<K>(&self, source: Arc<dyn SearchSource>, key: K, case_insensitive: bool)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.install_search(source, filter::key_predicate(key, case_insensitive));
    }

    /// [`make_searchable_by_key`](Self::make_searchable_by_key) with explicit
    /// options.
    pub fn make_searchable_by_key_with<K>(&self, source: Arc<dyn SearchSource>, key: K, options: &SearchOptions)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.make_searchable_by_key(source, key, options.case_insensitive);
    }

    /// [`make_searchable_by_key`](Self::make_searchable_by_key) using the
    /// configured search options.
    pub fn search_by<K>(&self, source: Arc<dyn SearchSource>, key: K)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        let options = self.config().search;
        self.make_searchable_by_key_with(source, key, &options);
    }

    /// Makes the data source searchable through a search field widget.
    ///
    /// Installs a [`SearchFieldSource`] as the field's delegate, chaining to
    /// whatever delegate the field had. The adapter is returned so the
    /// caller can keep it alive or [`uninstall`](SearchFieldSource::uninstall)
    /// it later.
    pub fn make_searchable_field<F>(&self, field: &dyn SearchField, predicate: F) -> Arc<SearchFieldSource>
    where
        F: Fn(&M, &str) -> bool + Send + Sync + 'static,
    {
        self.install_search_field(field, Arc::new(predicate))
    }

    /// Key-based form of [`make_searchable_field`](Self::make_searchable_field).
    pub fn make_searchable_field_by_key<K>(
        &self,
        field: &dyn SearchField,
        key: K,
        case_insensitive: bool,
    ) -> Arc<SearchFieldSource>
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.install_search_field(field, filter::key_predicate(key, case_insensitive))
    }

    /// [`make_searchable_field_by_key`](Self::make_searchable_field_by_key)
    /// using the configured search options.
    pub fn search_field_by<K>(&self, field: &dyn SearchField, key: K) -> Arc<SearchFieldSource>
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        let options = self.config().search;
        self.make_searchable_field_by_key(field, key, options.case_insensitive)
    }

    fn install_search_field(&self, field: &dyn SearchField, predicate: FilterFn<M>) -> Arc<SearchFieldSource> {
        // install_search wires the real handler.
        let adapter = SearchFieldSource::install(field, Arc::new(|_| {}));
        self.install_search(adapter.clone(), predicate);
        adapter
    }

    fn install_search(&self, source: Arc<dyn SearchSource>, predicate: FilterFn<M>) {
        tracing::debug!(target: targets::SEARCH, "installing search source");
        source.set_query_updated(self.refilter_handler());
        *self.inner.search.write() = Some(SearchState { source, predicate });
        self.filter_contents();
    }

    fn refilter_handler(&self) -> QueryUpdateHandler {
        let weak = Arc::downgrade(&self.inner);
        Arc::new(move |query| {
            tracing::trace!(target: targets::SEARCH, ?query, "query updated");
            if let Some(inner) = weak.upgrade() {
                Self::from_inner(inner).filter_contents();
            }
        })
    }

    /// Recomputes the filtered contents from the raw contents and the active
    /// query.
    ///
    /// Runs automatically when the search source reports a new query and on
    /// every [`update`](Self::update).
    pub fn filter_contents(&self) {
        let _span = PerfSpan::new(span_names::FILTER);
        let search = self.inner.search.read().clone();

        let filtered = match search {
            Some(search) => match search.source.active_query() {
                Some(query) if !query.is_empty() => {
                    let contents = self.contents();
                    filter::filter_sections(&contents, &query, &search.predicate)
                }
                _ => TableContents::empty(),
            },
            None => TableContents::empty(),
        };

        tracing::debug!(
            target: targets::SEARCH,
            sections = filtered.len(),
            matches = filtered.total_items(),
            "filtered contents"
        );
        self.set_filtered_contents(filtered);
    }

    /// Whether a search source is installed and its query is non-empty.
    pub fn is_searching(&self) -> bool {
        let source = self.inner.search.read().as_ref().map(|search| search.source.clone());
        source.is_some_and(|source| source.is_searching())
    }

    /// Removes the search source.
    ///
    /// The source's query handler is reset, the filtered contents are
    /// emptied, and the widget falls back to the raw contents.
    pub fn clear_search(&self) {
        let search = self.inner.search.write().take();
        if let Some(search) = search {
            tracing::debug!(target: targets::SEARCH, "clearing search source");
            search.source.set_query_updated(Arc::new(|_| {}));
            self.set_filtered_contents(TableContents::empty());
        }
    }

    // -------------------------------------------------------------------------
    // Sectioning
    // -------------------------------------------------------------------------

    /// Regroups the contents with `method` and remembers the configuration
    /// for later [`update`](Self::update)s.
    ///
    /// Regrouping replaces the raw contents: the previous section structure
    /// is discarded.
    pub fn section_contents<F>(&self, method: F, index_display: IndexDisplayMethod, sort_alphabetically: bool)
    where
        F: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.install_sectioning(Arc::new(method), index_display, sort_alphabetically);
    }

    /// Regroups the contents by a string key.
    ///
    /// With [`IndexDisplayMethod::SingleLetter`] only the key's first
    /// character is used, so items group by initial.
    pub fn section_contents_by<K>(&self, key: K, index_display: IndexDisplayMethod, sort_alphabetically: bool)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.install_sectioning(
            sectioning::key_method(key, index_display),
            index_display,
            sort_alphabetically,
        );
    }

    /// [`section_contents_by`](Self::section_contents_by) with explicit
    /// options.
    pub fn section_contents_by_with<K>(&self, key: K, options: &SectioningOptions)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.section_contents_by(key, options.index_display, options.sort_alphabetically);
    }

    /// [`section_contents_by`](Self::section_contents_by) using the
    /// configured sectioning options.
    pub fn section_by<K>(&self, key: K)
    where
        K: Fn(&M) -> String + Send + Sync + 'static,
    {
        let options = self.config().sectioning;
        self.section_contents_by_with(key, &options);
    }

    fn install_sectioning(
        &self,
        method: SectioningFn<M>,
        index_display: IndexDisplayMethod,
        sort_alphabetically: bool,
    ) {
        tracing::debug!(
            target: targets::DATA_SOURCE,
            ?index_display,
            sort_alphabetically,
            "configuring sectioning"
        );
        let sectioning = SectioningState {
            method,
            sort_alphabetically,
        };
        *self.inner.sectioning.write() = Some(sectioning.clone());
        *self.inner.index_display.write() = index_display;
        self.regroup(&sectioning);
    }

    fn regroup(&self, sectioning: &SectioningState<M>) {
        let _span = PerfSpan::new(span_names::SECTION);
        let contents = self.contents();
        let grouped =
            sectioning::group_contents(&contents, &sectioning.method, sectioning.sort_alphabetically);
        tracing::debug!(
            target: targets::DATA_SOURCE,
            sections = grouped.len(),
            items = grouped.total_items(),
            "sectioned contents"
        );
        self.set_contents(grouped);
    }

    /// Forgets the sectioning configuration.
    ///
    /// The current grouping stays; later updates are no longer regrouped and
    /// the section index is hidden.
    pub fn clear_sectioning(&self) {
        tracing::debug!(target: targets::DATA_SOURCE, "clearing sectioning");
        *self.inner.sectioning.write() = None;
        *self.inner.index_display.write() = IndexDisplayMethod::None;
    }

    /// The configured sectioning options, if sectioning is active.
    pub fn sectioning_options(&self) -> Option<SectioningOptions> {
        let sort_alphabetically = self.inner.sectioning.read().as_ref()?.sort_alphabetically;
        Some(SectioningOptions {
            index_display: self.index_display(),
            sort_alphabetically,
        })
    }

    /// The index display policy.
    pub fn index_display(&self) -> IndexDisplayMethod {
        *self.inner.index_display.read()
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    /// Produces the cell for `index_path`, reporting failures as errors.
    pub fn try_cell_for_row(&self, index_path: IndexPath) -> Result<CellHandle> {
        let (retriever, configurator) = {
            let link = self.inner.link.read();
            let link = link.as_ref().ok_or(ListSourceError::NotLinked)?;
            (link.retriever.clone(), link.configurator.clone())
        };

        let item = self.item_at(index_path)?;
        tracing::trace!(target: targets::CELL, %index_path, "configuring cell");
        Ok(configurator(&retriever, &item, index_path))
    }
}

impl<M: Clone + Send + Sync + 'static> TableDataSource for DataSource<M> {
    fn number_of_sections(&self) -> usize {
        self.with_active_view(TableContents::len)
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.with_active_view(|view| view.row_count(section))
            .unwrap_or_else(|| {
                tracing::trace!(target: targets::DATA_SOURCE, section, "row count for unknown section");
                0
            })
    }

    fn cell_for_row(&self, index_path: IndexPath) -> CellHandle {
        self.try_cell_for_row(index_path).unwrap_or_else(|err| {
            tracing::error!(target: targets::DATA_SOURCE, %index_path, error = %err, "cannot provide cell");
            panic!("{err}")
        })
    }

    fn title_for_header(&self, section: usize) -> Option<String> {
        self.with_active_view(|view| {
            view.section(section)
                .and_then(|section| section.title().map(str::to_string))
        })
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        let index_display = self.index_display();
        let state = self.inner.state.read();
        sectioning::index_titles(&state.contents, index_display)
    }
}

impl<M> fmt::Debug for DataSource<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("DataSource")
            .field("sections", &state.contents.len())
            .field("filtered_sections", &state.filtered.len())
            .field("phase", &self.inner.update_phase())
            .field("searchable", &self.inner.search.read().is_some())
            .field("sectioned", &self.inner.sectioning.read().is_some())
            .field("index_display", &*self.inner.index_display.read())
            .field("linked", &self.inner.link.read().is_some())
            .finish()
    }
}
