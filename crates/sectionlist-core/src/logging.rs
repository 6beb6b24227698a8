//! Logging conventions for sectionlist.
//!
//! Both crates are instrumented with the `tracing` crate. Nothing here
//! installs a subscriber; applications choose their own:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("sectionlist=debug"))
//!     .init();
//! ```
//!
//! The constants below name the targets and spans used throughout, so hosts
//! can filter a single subsystem, e.g. `sectionlist::search=trace`.

/// Span names used for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "sectionlist::signal";
    /// Wholesale content update span.
    pub const UPDATE: &str = "sectionlist::update";
    /// Filtering pass span.
    pub const FILTER: &str = "sectionlist::filter";
    /// Sectioning pass span.
    pub const SECTION: &str = "sectionlist::section";
}

/// Target names for log filtering.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "sectionlist_core";
    /// Signal/slot target.
    pub const SIGNAL: &str = "sectionlist_core::signal";
    /// Property target.
    pub const PROPERTY: &str = "sectionlist_core::property";
    /// Data source engine target.
    pub const DATA_SOURCE: &str = "sectionlist::source";
    /// Search sources and the search field adapter.
    pub const SEARCH: &str = "sectionlist::search";
    /// Cell registration and retrieval.
    pub const CELL: &str = "sectionlist::cell";
    /// Configuration loading.
    pub const CONFIG: &str = "sectionlist::config";
}

/// Performance span guard.
///
/// Enters a `perf` span named after the operation for as long as the guard
/// lives, and logs the elapsed time at `trace` level on drop.
///
/// ```
/// use sectionlist_core::logging::{span_names, PerfSpan};
///
/// {
///     let _span = PerfSpan::new(span_names::FILTER);
///     // ... work ...
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    name: &'static str,
    start: std::time::Instant,
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Start timing an operation.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "sectionlist::perf", "perf", operation = name);
        Self {
            name,
            start: std::time::Instant::now(),
            span: span.entered(),
        }
    }

    /// Time elapsed since the span started.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::CORE,
            span = self.name,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "end"
        );
    }
}
