//! Core primitives for sectionlist.
//!
//! This crate holds the UI-agnostic building blocks the data-source engine
//! is written against:
//!
//! - **Signal/Slot System**: synchronous, re-entrancy safe notifications
//! - **Property System**: value cells with change detection
//! - **Logging**: tracing targets and performance spans
//!
//! # Example
//!
//! ```
//! use sectionlist_core::{Property, Signal};
//!
//! let query = Property::new(None::<String>);
//! let query_changed = Signal::<Option<String>>::new();
//!
//! query_changed.connect(|text| {
//!     println!("query is now {:?}", text);
//! });
//!
//! let next = Some("an".to_string());
//! if query.set(next.clone()) {
//!     query_changed.emit(next);
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
