//! Error types for the component crate.

use std::path::PathBuf;

use nvs_render::RenderError;
use thiserror::Error;

use crate::model::NodeId;

/// Errors produced by the NVS components.
///
/// Every failure is returned to the caller immediately. Nothing in this crate
/// retries or falls back (for example to a system font).
#[derive(Error, Debug)]
pub enum ComponentError {
    /// An image file passed to a thumbnail does not exist.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// The root directory of a file tree does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A file-system operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A font is not present in the embedded resources.
    #[error("embedded font not available: {name}")]
    FontUnavailable { name: String },

    /// A node id does not belong to the current tree.
    #[error("unknown tree node {0:?}")]
    UnknownNode(NodeId),

    /// The per-user application data directory could not be determined.
    #[error("application data directory is unavailable")]
    AppDataUnavailable,

    /// A theme file could not be parsed.
    #[error("invalid theme: {0}")]
    Theme(#[from] toml::de::Error),

    /// A rendering resource failed to load.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ComponentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for component operations.
pub type ComponentResult<T> = Result<T, ComponentError>;
