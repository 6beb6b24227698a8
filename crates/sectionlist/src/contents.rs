//! Sectioned list contents.
//!
//! [`TableContents<M>`] is the canonical data shape of a list: an ordered
//! sequence of [`TableSection<M>`]s, each an optional title plus an ordered
//! sequence of items. Items are addressed by an [`IndexPath`].
//!
//! Contents are value types. The data source replaces them wholesale rather
//! than mutating them in place.
//!
//! # Example
//!
//! ```
//! use sectionlist::contents::{IndexPath, TableContents, TableSection};
//!
//! let contents = TableContents::new(vec![
//!     TableSection::new(Some("A".into()), vec!["Anne"]),
//!     TableSection::new(Some("J".into()), vec!["John", "Jane"]),
//! ]);
//!
//! assert_eq!(contents.len(), 2);
//! assert_eq!(contents.row_count(1), Some(2));
//! assert_eq!(contents.item(IndexPath::new(1, 1)).ok(), Some(&"Jane"));
//! assert!(contents.item(IndexPath::new(2, 0)).is_err());
//! ```

use std::fmt;
use std::ops::Index;

use crate::error::{ListSourceError, Result};

/// A (section, row) coordinate into [`TableContents`].
///
/// Both components are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// The section index.
    pub section: usize,
    /// The row within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

/// A titled run of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSection<M> {
    title: Option<String>,
    items: Vec<M>,
}

impl<M> Default for TableSection<M> {
    fn default() -> Self {
        Self {
            title: None,
            items: Vec::new(),
        }
    }
}

impl<M> TableSection<M> {
    /// Creates a section with an optional title.
    pub fn new(title: Option<String>, items: Vec<M>) -> Self {
        Self { title, items }
    }

    /// Creates an untitled section.
    pub fn untitled(items: Vec<M>) -> Self {
        Self::new(None, items)
    }

    /// Creates a titled section.
    pub fn titled(title: impl Into<String>, items: Vec<M>) -> Self {
        Self::new(Some(title.into()), items)
    }

    /// The section title, `None` for an untitled section.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The items, in order.
    pub fn items(&self) -> &[M] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the section holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `row`, if any.
    pub fn get(&self, row: usize) -> Option<&M> {
        self.items.get(row)
    }

    /// Iterates the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.items.iter()
    }

    pub(crate) fn push(&mut self, item: M) {
        self.items.push(item);
    }

    /// Consumes the section, returning its title and items.
    pub fn into_parts(self) -> (Option<String>, Vec<M>) {
        (self.title, self.items)
    }
}

impl<M> Index<usize> for TableSection<M> {
    type Output = M;

    fn index(&self, row: usize) -> &M {
        &self.items[row]
    }
}

impl<'a, M> IntoIterator for &'a TableSection<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Ordered sections of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContents<M> {
    sections: Vec<TableSection<M>>,
}

impl<M> Default for TableContents<M> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<M> TableContents<M> {
    /// Creates contents from ordered sections.
    pub fn new(sections: Vec<TableSection<M>>) -> Self {
        Self { sections }
    }

    /// Creates empty contents (no sections).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates contents holding a single section of `items`.
    pub fn from_items(title: Option<String>, items: Vec<M>) -> Self {
        Self::new(vec![TableSection::new(title, items)])
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The section at `section`, if any.
    pub fn section(&self, section: usize) -> Option<&TableSection<M>> {
        self.sections.get(section)
    }

    /// All sections, in order.
    pub fn sections(&self) -> &[TableSection<M>] {
        &self.sections
    }

    /// Number of items in `section`, or `None` if there is no such section.
    pub fn row_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(TableSection::len)
    }

    /// Total number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(TableSection::len).sum()
    }

    /// Resolves an index path to an item.
    ///
    /// Fails with [`ListSourceError::OutOfRange`] if either component is
    /// invalid.
    pub fn item(&self, index_path: IndexPath) -> Result<&M> {
        self.sections
            .get(index_path.section)
            .and_then(|section| section.get(index_path.row))
            .ok_or_else(|| ListSourceError::out_of_range(index_path))
    }

    /// Iterates sections in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TableSection<M>> {
        self.sections.iter()
    }

    /// Iterates every item, section by section.
    pub fn items(&self) -> impl Iterator<Item = &M> + '_ {
        self.sections.iter().flat_map(TableSection::iter)
    }

    /// Section titles in order, `None` for untitled sections.
    pub fn titles(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.sections.iter().map(TableSection::title)
    }

    pub(crate) fn push_section(&mut self, section: TableSection<M>) {
        self.sections.push(section);
    }
}

impl<M> Index<usize> for TableContents<M> {
    type Output = TableSection<M>;

    fn index(&self, section: usize) -> &TableSection<M> {
        &self.sections[section]
    }
}

impl<M> From<Vec<TableSection<M>>> for TableContents<M> {
    fn from(sections: Vec<TableSection<M>>) -> Self {
        Self::new(sections)
    }
}

impl<M> FromIterator<TableSection<M>> for TableContents<M> {
    fn from_iter<I: IntoIterator<Item = TableSection<M>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, M> IntoIterator for &'a TableContents<M> {
    type Item = &'a TableSection<M>;
    type IntoIter = std::slice::Iter<'a, TableSection<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl<M> IntoIterator for TableContents<M> {
    type Item = TableSection<M>;
    type IntoIter = std::vec::IntoIter<TableSection<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}
