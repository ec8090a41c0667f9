//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the catalog and CLI layers.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a sidebar index cannot be read, parsed or resolved.
///
/// These are data-integrity problems of a documentation build and are meant to
/// be surfaced to the operator running the build.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// The index file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The JavaScript statement around the payload is not one rustdoc emits.
    #[error("invalid sidebar envelope at byte {offset}: {message}")]
    Envelope { offset: usize, message: String },
    /// The payload is not a valid JSON object.
    #[error("invalid sidebar payload: {0}")]
    Json(#[from] serde_json::Error),
    /// A category value is not a list of `[name, summary]` string pairs.
    #[error("malformed item #{index} in category '{category}': {reason}")]
    MalformedPair {
        category: String,
        index: usize,
        reason: String,
    },
    /// Two items of one category share a name.
    #[error("duplicate item '{name}' in category '{category}'")]
    DuplicateItem { category: String, name: String },
    /// A category key appears twice in one payload.
    #[error("category '{0}' appears more than once")]
    DuplicateCategory(String),
    /// Strict parsing rejected a label outside the known category set.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    /// No index was discovered for the requested module.
    #[error("no sidebar index for module '{0}'")]
    ModuleNotFound(String),
}

impl SidebarError {
    pub(crate) fn envelope(offset: usize, message: impl Into<String>) -> Self {
        Self::Envelope {
            offset,
            message: message.into(),
        }
    }
}
