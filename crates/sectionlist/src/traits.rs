//! Contracts between the data source and its host environment.
//!
//! The data source never draws anything. It talks to a list widget through
//! two traits:
//!
//! - [`TableHost`] is implemented by the widget: it stores cell registrations,
//!   hands out reusable cells, and reloads itself on request.
//! - [`TableDataSource`] is implemented by [`DataSource`](crate::DataSource):
//!   the widget calls it to learn section/row counts, titles, and to obtain
//!   a bound cell for each visible row.
//!
//! ```text
//! ┌─────────────┐  register_cell / dequeue_cell / reload_data  ┌──────────────┐
//! │  DataSource │ ───────────────────────────────────────────> │  TableHost   │
//! │             │ <─────────────────────────────────────────── │   (widget)   │
//! └─────────────┘  number_of_sections / cell_for_row / ...     └──────────────┘
//! ```
//!
//! [`ItemSource`] describes where the items come from in the first place.

use crate::cell::{CellHandle, CellRegistration};
use crate::contents::IndexPath;

/// The list widget, as seen by the data source.
///
/// Implementations use interior mutability; every method takes `&self`.
pub trait TableHost: Send + Sync {
    /// Registers how to produce cells for `identifier`.
    fn register_cell(&self, identifier: &str, registration: CellRegistration);

    /// Returns a reusable cell for `identifier`.
    ///
    /// When `index_path` is given the host may recycle the instance it
    /// already pools for that visible row. Returns `None` if nothing is
    /// registered under `identifier`.
    fn dequeue_cell(&self, identifier: &str, index_path: Option<IndexPath>) -> Option<CellHandle>;

    /// Reloads every row from the data source.
    fn reload_data(&self);
}

/// Queries a list widget makes against its data source.
pub trait TableDataSource {
    /// Number of sections in the active view.
    fn number_of_sections(&self) -> usize;

    /// Number of rows in `section` of the active view.
    ///
    /// Returns `0` for a section that does not exist.
    fn number_of_rows(&self, section: usize) -> usize;

    /// Returns a cell bound to the item at `index_path`.
    ///
    /// # Panics
    ///
    /// Panics if no cell configurator has been linked, or if the index path
    /// does not resolve. Hosts only ask for coordinates within the counts
    /// reported above, so either case is an integration bug.
    fn cell_for_row(&self, index_path: IndexPath) -> CellHandle;

    /// Header title for `section`.
    fn title_for_header(&self, _section: usize) -> Option<String> {
        None
    }

    /// Titles for the quick-navigation index, `None` to hide it.
    fn section_index_titles(&self) -> Option<Vec<String>> {
        None
    }
}

/// A one-shot, possibly asynchronous producer of items.
///
/// `fetch_items` must call `on_result` at most once. Retrying and caching
/// are the implementor's concern.
pub trait ItemSource<M>: Send + Sync {
    /// Requests the items, delivering them through `on_result`.
    fn fetch_items(&self, on_result: Box<dyn FnOnce(Vec<M>) + Send>);
}

impl<M, F> ItemSource<M> for F
where
    F: Fn(Box<dyn FnOnce(Vec<M>) + Send>) + Send + Sync,
{
    fn fetch_items(&self, on_result: Box<dyn FnOnce(Vec<M>) + Send>) {
        self(on_result)
    }
}
