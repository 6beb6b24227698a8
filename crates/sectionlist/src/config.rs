//! Display and search options, loadable from TOML.
//!
//! The option types are plain serde structs so an application can keep its
//! list presentation in a config file:
//!
//! ```toml
//! [sectioning]
//! index_display = "single_letter"
//! sort_alphabetically = true
//!
//! [search]
//! case_insensitive = true
//! ```
//!
//! Missing keys fall back to the defaults shown above.
//!
//! ```
//! use sectionlist::config::{DataSourceConfig, IndexDisplayMethod};
//!
//! let config = DataSourceConfig::from_toml_str("[sectioning]\nindex_display = \"full\"\n").unwrap();
//! assert_eq!(config.sectioning.index_display, IndexDisplayMethod::Full);
//! assert!(config.sectioning.sort_alphabetically);
//! assert!(config.search.case_insensitive);
//! ```

use std::path::Path;

use sectionlist_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ListSourceError, Result};

/// How section titles are abbreviated in the quick-navigation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexDisplayMethod {
    /// One character per section; sectioning keys are reduced to their first
    /// character.
    #[default]
    SingleLetter,
    /// Full section titles.
    Full,
    /// No index.
    None,
}

/// Options for grouping contents into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectioningOptions {
    /// Index display policy; also decides single-letter key reduction.
    pub index_display: IndexDisplayMethod,
    /// Emit sections in ascending key order instead of first-seen order.
    pub sort_alphabetically: bool,
}

impl Default for SectioningOptions {
    fn default() -> Self {
        Self {
            index_display: IndexDisplayMethod::SingleLetter,
            sort_alphabetically: true,
        }
    }
}

impl SectioningOptions {
    /// Sets the index display policy.
    pub fn with_index_display(mut self, index_display: IndexDisplayMethod) -> Self {
        self.index_display = index_display;
        self
    }

    /// Sets whether sections are sorted by key.
    pub fn with_sort_alphabetically(mut self, sort: bool) -> Self {
        self.sort_alphabetically = sort;
        self
    }
}

/// Options for key-based search predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Compare lowercased key and query.
    pub case_insensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

/// Complete data source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// Sectioning defaults.
    pub sectioning: SectioningOptions,
    /// Search defaults.
    pub search: SearchOptions,
}

impl DataSourceConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| ListSourceError::config_read(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
