//! The sectioning pass and index titles.

use std::collections::HashMap;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::IndexDisplayMethod;
use crate::contents::{TableContents, TableSection};

/// Type alias for a sectioning method: maps an item to its section title.
pub type SectioningFn<M> = Arc<dyn Fn(&M) -> String + Send + Sync>;

/// First user-perceived character of `text`, if any.
pub(crate) fn first_grapheme(text: &str) -> Option<&str> {
    text.graphemes(true).next()
}

/// Wraps a key extractor, reducing keys to one character under
/// [`IndexDisplayMethod::SingleLetter`].
pub(crate) fn key_method<M, K>(key: K, index_display: IndexDisplayMethod) -> SectioningFn<M>
where
    M: 'static,
    K: Fn(&M) -> String + Send + Sync + 'static,
{
    match index_display {
        IndexDisplayMethod::SingleLetter => Arc::new(move |item: &M| {
            let key = key(item);
            first_grapheme(&key).unwrap_or_default().to_string()
        }),
        IndexDisplayMethod::Full | IndexDisplayMethod::None => Arc::new(key),
    }
}

/// Regroups every item of `contents` under the title `method` assigns it.
///
/// Items are visited section by section, row by row. Groups appear in
/// first-seen order, or stably sorted by title when `sort_alphabetically` is
/// set. Within a group, items keep their visiting order.
pub(crate) fn group_contents<M: Clone>(
    contents: &TableContents<M>,
    method: &SectioningFn<M>,
    sort_alphabetically: bool,
) -> TableContents<M> {
    let mut groups: Vec<(String, Vec<M>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in contents.items() {
        let title = method(item);
        match positions.get(&title) {
            Some(&position) => groups[position].1.push(item.clone()),
            None => {
                positions.insert(title.clone(), groups.len());
                groups.push((title, vec![item.clone()]));
            }
        }
    }

    if sort_alphabetically {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
    }

    groups
        .into_iter()
        .map(|(title, items)| TableSection::titled(title, items))
        .collect()
}

/// Quick-navigation titles for `contents` under `index_display`.
pub(crate) fn index_titles<M>(
    contents: &TableContents<M>,
    index_display: IndexDisplayMethod,
) -> Option<Vec<String>> {
    match index_display {
        IndexDisplayMethod::None => None,
        IndexDisplayMethod::SingleLetter => Some(
            contents
                .titles()
                .flatten()
                .filter_map(first_grapheme)
                .map(str::to_string)
                .collect(),
        ),
        IndexDisplayMethod::Full => Some(
            contents
                .titles()
                .flatten()
                .map(str::to_string)
                .collect(),
        ),
    }
}
