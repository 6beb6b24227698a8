//! Commonly used types, for glob import:
//!
//! ```
//! use sectionlist::prelude::*;
//! ```

// ============================================================================
// Data Source
// ============================================================================

pub use crate::source::{DataSource, DataSourceSignals, UpdatePhase};
pub use crate::traits::{ItemSource, TableDataSource, TableHost};

// ============================================================================
// Contents
// ============================================================================

pub use crate::contents::{IndexPath, TableContents, TableSection};

// ============================================================================
// Cells
// ============================================================================

pub use crate::cell::{
    CellBindable, CellHandle, CellIdentifiable, CellKind, CellRegistration, CellRetriever,
    CellTemplate, RegistrationMethod,
};

// ============================================================================
// Search
// ============================================================================

pub use crate::search::{SearchField, SearchFieldDelegate, SearchFieldSource, SearchSource, TextQuerySource};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::{DataSourceConfig, IndexDisplayMethod, SearchOptions, SectioningOptions};
pub use crate::error::ListSourceError;
