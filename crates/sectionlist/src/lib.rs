//! Sectioned, searchable list data sources.
//!
//! This crate provides the data side of a list widget:
//!
//! - **Contents**: sections of items addressed by [`IndexPath`](contents::IndexPath)
//! - **Data source**: [`DataSource<M>`] answers the widget's row, title and
//!   index queries and hands out bound cells
//! - **Sectioning**: regroup items by a key, optionally by initial letter,
//!   with a quick-navigation index
//! - **Search**: filter items against a query from any [`SearchSource`](search::SearchSource),
//!   including a search field widget whose existing delegate keeps working
//! - **Cells**: type-safe registration and retrieval of reusable cells
//!
//! Rendering is left to the host, which implements
//! [`TableHost`](traits::TableHost).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sectionlist::prelude::*;
//!
//! let names = DataSource::with_items(
//!     None,
//!     vec!["Mary".to_string(), "John".to_string(), "Anne".to_string()],
//! );
//! names.section_contents_by(|name: &String| name.clone(), IndexDisplayMethod::SingleLetter, true);
//! assert_eq!(names.number_of_sections(), 3);
//! assert_eq!(names.title_for_header(0).as_deref(), Some("A"));
//!
//! let query = Arc::new(TextQuerySource::new());
//! names.make_searchable_by_key(query.clone(), |name: &String| name.clone(), true);
//! query.set_query(Some("an".into()));
//! assert_eq!(names.number_of_sections(), 1);
//! assert_eq!(names.item_at(IndexPath::new(0, 0)).unwrap(), "Anne");
//! ```

pub mod cell;
pub mod config;
pub mod contents;
pub mod error;
pub mod prelude;
pub mod search;
pub mod source;
pub mod traits;

pub use error::{ListSourceError, Result};
pub use source::DataSource;

pub use sectionlist_core::{ConnectionId, Property, Signal};
