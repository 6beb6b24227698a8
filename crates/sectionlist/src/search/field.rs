//! Adapter that turns a search text field into a [`SearchSource`].
//!
//! Text fields expose a single observer slot (their delegate). Making a
//! list searchable must not silently displace whoever was observing the
//! field before, so [`SearchFieldSource`] keeps the previous delegate and
//! forwards every event to it after doing its own work.

use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use sectionlist_core::Property;
use sectionlist_core::logging::targets;

use super::source::{QueryUpdateHandler, SearchSource};

/// A search text input widget, as seen by the adapter.
pub trait SearchField: Send + Sync {
    /// The currently installed delegate, if any.
    fn delegate(&self) -> Option<Arc<dyn SearchFieldDelegate>>;

    /// Installs (or removes) the delegate.
    fn set_delegate(&self, delegate: Option<Arc<dyn SearchFieldDelegate>>);
}

/// Observer of search field events.
///
/// Every method has a default. Notifications default to doing nothing and
/// the `should_*` queries default to `true`.
#[allow(unused_variables)]
pub trait SearchFieldDelegate: Send + Sync {
    /// The field's text changed.
    fn text_did_change(&self, field: &dyn SearchField, text: &str) {}

    /// The field became the editing target.
    fn text_did_begin_editing(&self, field: &dyn SearchField) {}

    /// The field stopped being the editing target.
    fn text_did_end_editing(&self, field: &dyn SearchField) {}

    /// The cancel button was tapped.
    fn cancel_button_clicked(&self, field: &dyn SearchField) {}

    /// The search (submit) button was tapped.
    fn search_button_clicked(&self, field: &dyn SearchField) {}

    /// The bookmark button was tapped.
    fn bookmark_button_clicked(&self, field: &dyn SearchField) {}

    /// The results-list button was tapped.
    fn results_list_button_clicked(&self, field: &dyn SearchField) {}

    /// The selected scope button changed.
    fn selected_scope_did_change(&self, field: &dyn SearchField, scope: usize) {}

    /// Whether editing may begin.
    fn should_begin_editing(&self, field: &dyn SearchField) -> bool {
        true
    }

    /// Whether editing may end.
    fn should_end_editing(&self, field: &dyn SearchField) -> bool {
        true
    }

    /// Whether the text in `range` may be replaced by `replacement`.
    fn should_change_text(&self, field: &dyn SearchField, range: Range<usize>, replacement: &str) -> bool {
        true
    }
}

/// [`SearchSource`] over a [`SearchField`], installed as its delegate.
///
/// On every text change the adapter records the text as the active query,
/// invokes its query handler, and then forwards the event to the delegate
/// that was installed before it. All other events go straight to that
/// previous delegate, or get the permissive default when there was none.
///
/// ```ignore
/// let source = SearchFieldSource::install(&*field, Arc::new(|query| {
///     println!("query: {:?}", query);
/// }));
/// assert!(field.delegate().is_some());
/// ```
pub struct SearchFieldSource {
    active_query: Property<Option<String>>,
    query_updated: RwLock<QueryUpdateHandler>,
    previous_delegate: Option<Arc<dyn SearchFieldDelegate>>,
}

impl SearchFieldSource {
    /// Creates the adapter and installs it as `field`'s delegate.
    ///
    /// Whatever delegate `field` had is kept as
    /// [`previous_delegate`](Self::previous_delegate).
    pub fn install(field: &dyn SearchField, handler: QueryUpdateHandler) -> Arc<Self> {
        let previous_delegate = field.delegate();
        tracing::debug!(
            target: targets::SEARCH,
            preserves_delegate = previous_delegate.is_some(),
            "installing search field source"
        );

        let source = Arc::new(Self {
            active_query: Property::new(None),
            query_updated: RwLock::new(handler),
            previous_delegate,
        });
        field.set_delegate(Some(source.clone() as Arc<dyn SearchFieldDelegate>));
        source
    }

    /// The delegate that was installed before this adapter.
    pub fn previous_delegate(&self) -> Option<&Arc<dyn SearchFieldDelegate>> {
        self.previous_delegate.as_ref()
    }

    /// Restores the previous delegate on `field`.
    pub fn uninstall(&self, field: &dyn SearchField) {
        tracing::debug!(target: targets::SEARCH, "uninstalling search field source");
        field.set_delegate(self.previous_delegate.clone());
    }
}

impl SearchSource for SearchFieldSource {
    fn active_query(&self) -> Option<String> {
        self.active_query.get()
    }

    fn set_query_updated(&self, handler: QueryUpdateHandler) {
        *self.query_updated.write() = handler;
    }
}

impl SearchFieldDelegate for SearchFieldSource {
    fn text_did_change(&self, field: &dyn SearchField, text: &str) {
        self.active_query.set_silent(Some(text.to_string()));
        tracing::trace!(target: targets::SEARCH, query = text, "search text changed");

        let handler = self.query_updated.read().clone();
        handler(Some(text));

        if let Some(previous) = &self.previous_delegate {
            previous.text_did_change(field, text);
        }
    }

    fn text_did_begin_editing(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.text_did_begin_editing(field);
        }
    }

    fn text_did_end_editing(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.text_did_end_editing(field);
        }
    }

    fn cancel_button_clicked(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.cancel_button_clicked(field);
        }
    }

    fn search_button_clicked(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.search_button_clicked(field);
        }
    }

    fn bookmark_button_clicked(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.bookmark_button_clicked(field);
        }
    }

    fn results_list_button_clicked(&self, field: &dyn SearchField) {
        if let Some(previous) = &self.previous_delegate {
            previous.results_list_button_clicked(field);
        }
    }

    fn selected_scope_did_change(&self, field: &dyn SearchField, scope: usize) {
        if let Some(previous) = &self.previous_delegate {
            previous.selected_scope_did_change(field, scope);
        }
    }

    fn should_begin_editing(&self, field: &dyn SearchField) -> bool {
        self.previous_delegate
            .as_ref()
            .is_none_or(|previous| previous.should_begin_editing(field))
    }

    fn should_end_editing(&self, field: &dyn SearchField) -> bool {
        self.previous_delegate
            .as_ref()
            .is_none_or(|previous| previous.should_end_editing(field))
    }

    fn should_change_text(&self, field: &dyn SearchField, range: Range<usize>, replacement: &str) -> bool {
        self.previous_delegate
            .as_ref()
            .is_none_or(|previous| previous.should_change_text(field, range, replacement))
    }
}

impl std::fmt::Debug for SearchFieldSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFieldSource")
            .field("active_query", &self.active_query)
            .field("has_previous_delegate", &self.previous_delegate.is_some())
            .finish()
    }
}
