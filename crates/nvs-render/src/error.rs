//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::text::FontLoadError;

/// Errors that can occur while loading rendering resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Reading a resource from disk failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but could not be decoded as an image.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A font could not be registered.
    #[error(transparent)]
    FontLoad(#[from] FontLoadError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
