//! The filtering pass.

use std::sync::Arc;

use crate::contents::{TableContents, TableSection};

/// Type alias for a search predicate.
///
/// Receives an item and the active (non-empty) query; returns `true` to keep
/// the item.
pub type FilterFn<M> = Arc<dyn Fn(&M, &str) -> bool + Send + Sync>;

/// Keeps the items of `contents` that satisfy `predicate` against `query`.
///
/// Section titles and item order are preserved. Sections left without items
/// are dropped.
pub(crate) fn filter_sections<M: Clone>(
    contents: &TableContents<M>,
    query: &str,
    predicate: &FilterFn<M>,
) -> TableContents<M> {
    let mut filtered = TableContents::empty();

    for section in contents {
        let mut kept = TableSection::new(section.title().map(str::to_string), Vec::new());
        for item in section {
            if predicate(item, query) {
                kept.push(item.clone());
            }
        }

        if !kept.is_empty() {
            filtered.push_section(kept);
        }
    }

    filtered
}

/// Builds a "key contains query" predicate.
///
/// With `case_insensitive`, both the extracted key and the query are
/// lowercased before comparison.
pub(crate) fn key_predicate<M, K>(key: K, case_insensitive: bool) -> FilterFn<M>
where
    M: 'static,
    K: Fn(&M) -> String + Send + Sync + 'static,
{
    if case_insensitive {
        Arc::new(move |item: &M, query: &str| key(item).to_lowercase().contains(&query.to_lowercase()))
    } else {
        Arc::new(move |item: &M, query: &str| key(item).contains(query))
    }
}
