//! Decoded raster images.
//!
//! Images are decoded synchronously with the `image` crate into tightly packed
//! RGBA8 pixels. Decoding blocks the calling thread for the duration of the
//! read, which is acceptable for local thumbnails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nvs_core::logging::targets;

use crate::error::{RenderError, RenderResult};
use crate::types::{Point, Rect, Size};

/// A decoded RGBA8 image.
///
/// Pixel storage is shared, so cloning an `ImageData` is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
    source: Option<PathBuf>,
}

impl ImageData {
    /// Load and decode an image file.
    ///
    /// Read failures are reported as [`RenderError::Io`] and undecodable
    /// contents as [`RenderError::ImageDecode`].
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| {
            tracing::warn!(target: targets::RENDER_IMAGE, path = %path.display(), error = %source, "failed to read image");
            RenderError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let decoded = image::load_from_memory(&bytes).map_err(|source| {
            tracing::warn!(target: targets::RENDER_IMAGE, path = %path.display(), error = %source, "failed to decode image");
            RenderError::ImageDecode {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!(target: targets::RENDER_IMAGE, path = %path.display(), width, height, "decoded image");

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw().into(),
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap raw RGBA8 pixels.
    ///
    /// Returns `None` if `pixels` does not hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
            source: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Image size in pixels.
    #[inline]
    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// Raw RGBA8 pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The file this image was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The largest rectangle with this image's aspect ratio that fits in
    /// `dest`, centred.
    pub fn fit_within(&self, dest: Rect) -> Rect {
        if self.width == 0 || self.height == 0 || dest.is_empty() {
            return Rect::new(dest.center().x, dest.center().y, 0.0, 0.0);
        }
        let scale = (dest.width() / self.width as f32).min(dest.height() / self.height as f32);
        let size = Size::new(self.width as f32 * scale, self.height as f32 * scale);
        let center = dest.center();
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }
}
