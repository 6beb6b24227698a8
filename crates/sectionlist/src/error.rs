//! Error types for the data-source layer.

use std::path::PathBuf;

use crate::contents::IndexPath;

/// Result type alias for sectionlist operations.
pub type Result<T> = std::result::Result<T, ListSourceError>;

/// Errors that can occur while serving a list.
///
/// Two families exist. [`OutOfRange`](Self::OutOfRange) is recoverable: a
/// coordinate did not resolve against the current contents. The
/// misconfiguration variants (see [`is_misconfiguration`](Self::is_misconfiguration))
/// describe integration bugs; the host-facing entry points log them and
/// panic instead of returning them.
#[derive(Debug, thiserror::Error)]
pub enum ListSourceError {
    /// A coordinate does not address an item.
    #[error("index path (section {section}, row {row}) is out of range")]
    OutOfRange { section: usize, row: usize },

    /// No cell kind was registered under the identifier.
    #[error("no cell registered for reuse identifier '{identifier}'")]
    CellNotRegistered { identifier: String },

    /// The host handed back a cell of a different type.
    #[error("cell dequeued for '{identifier}' is not a {expected}")]
    IncompatibleCell {
        identifier: String,
        expected: &'static str,
    },

    /// A row was requested before a cell configurator was linked.
    #[error("no cell retriever has been provided; call link() first")]
    NotLinked,

    /// The rendering host was dropped while still linked.
    #[error("the linked table host has been released")]
    HostReleased,

    /// Reading a configuration file failed.
    #[error("failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsing configuration TOML failed.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Serializing configuration TOML failed.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl ListSourceError {
    /// Create an out-of-range error for an index path.
    pub fn out_of_range(index_path: IndexPath) -> Self {
        Self::OutOfRange {
            section: index_path.section,
            row: index_path.row,
        }
    }

    /// Create a config read error.
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a programming error rather than a data condition.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::CellNotRegistered { .. }
                | Self::IncompatibleCell { .. }
                | Self::NotLinked
                | Self::HostReleased
        )
    }
}
