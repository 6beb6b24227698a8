//! Search sources.
//!
//! The data source does not care where query text comes from. It reads it
//! through the [`SearchSource`] trait and re-filters when the source reports
//! a change. Two implementations ship with the crate:
//!
//! - [`TextQuerySource`]: set the query programmatically
//! - [`SearchFieldSource`]: adapts a [`SearchField`] widget, chaining to the
//!   widget's previous delegate

mod field;
mod source;

pub use field::{SearchField, SearchFieldDelegate, SearchFieldSource};
pub use source::{QueryUpdateHandler, SearchSource, TextQuerySource};
