//! The shared on-disk font cache.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use directories::BaseDirs;
use nvs_core::logging::{span_names, targets};
use nvs_render::{Font, FontRegistry, FontWeight, RenderError};
use parking_lot::Mutex;

use super::embedded::EmbeddedFonts;
use crate::error::{ComponentError, ComponentResult};

/// Where and under which name the bundled font is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontCacheConfig {
    /// Sub-directory of the application data directory.
    pub product_name: String,
    /// Name of the embedded font, also used as the cached file name.
    pub font_file_name: String,
    /// Override for the application data directory. `None` uses the
    /// platform's per-user data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for FontCacheConfig {
    fn default() -> Self {
        Self {
            product_name: "NVS".to_string(),
            font_file_name: "DejaVuSans-Bold.ttf".to_string(),
            data_dir: None,
        }
    }
}

impl FontCacheConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product sub-directory name.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Set the embedded font to cache.
    pub fn font_file_name(mut self, name: impl Into<String>) -> Self {
        self.font_file_name = name.into();
        self
    }

    /// Use an explicit application data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Resolve the application data directory.
    pub fn resolve_data_dir(&self) -> ComponentResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => BaseDirs::new()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(ComponentError::AppDataUnavailable),
        }
    }

    /// The full path of the cached font file, `<app-data>/<product>/<font>`.
    pub fn font_path(&self) -> ComponentResult<PathBuf> {
        Ok(self
            .resolve_data_dir()?
            .join(&self.product_name)
            .join(&self.font_file_name))
    }
}

/// Make sure the embedded font exists on disk and return its path.
///
/// Creates the product directory if needed and writes the font file only when
/// it is absent, so repeated calls leave a single file with unchanged bytes.
/// Directory creation and write failures are returned as
/// [`ComponentError::Io`].
pub fn materialize_font(config: &FontCacheConfig) -> ComponentResult<PathBuf> {
    let _span = tracing::info_span!(
        target: targets::FONT_CACHE,
        span_names::FONT_CACHE,
        font = %config.font_file_name
    )
    .entered();
    let file = config.font_path()?;
    let folder = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !folder.is_dir() {
        std::fs::create_dir_all(&folder).map_err(|e| ComponentError::io(&folder, e))?;
        tracing::debug!(target: targets::FONT_CACHE, dir = %folder.display(), "created font cache directory");
    }

    if file.is_file() {
        tracing::debug!(target: targets::FONT_CACHE, path = %file.display(), "font already cached");
    } else {
        let bytes = EmbeddedFonts::get(&config.font_file_name).ok_or_else(|| {
            ComponentError::FontUnavailable {
                name: config.font_file_name.clone(),
            }
        })?;
        std::fs::write(&file, bytes).map_err(|e| ComponentError::io(&file, e))?;
        tracing::debug!(target: targets::FONT_CACHE, path = %file.display(), bytes = bytes.len(), "wrote cached font");
    }

    Ok(file)
}

static SHARED: Mutex<Weak<FontCache>> = Mutex::new(Weak::new());

/// A cached font file registered in a private font registry.
///
/// Obtain the process-wide instance with [`FontCache::shared`]; it is created
/// on first use and dropped when the last widget holding it goes away.
#[derive(Debug)]
pub struct FontCache {
    path: PathBuf,
    family: String,
    weight: FontWeight,
    registry: FontRegistry,
}

impl FontCache {
    /// Materialize and register the font described by `config`.
    pub fn load(config: &FontCacheConfig) -> ComponentResult<Self> {
        let path = materialize_font(config)?;

        let mut registry = FontRegistry::new();
        let faces = registry
            .register_file(&path)
            .map_err(RenderError::from)?;

        let face = faces
            .iter()
            .find(|face| !face.families.is_empty())
            .ok_or_else(|| ComponentError::FontUnavailable {
                name: config.font_file_name.clone(),
            })?;
        let family = face.families[0].clone();
        let weight = face.weight;

        tracing::info!(target: targets::FONT_CACHE, path = %path.display(), family = %family, "font cache ready");

        Ok(Self {
            path,
            family,
            weight,
            registry,
        })
    }

    /// The process-wide cache built from [`FontCacheConfig::default`].
    ///
    /// Concurrent callers share one instance. Once every `Arc` has been
    /// dropped, the next call loads the cache again.
    pub fn shared() -> ComponentResult<Arc<FontCache>> {
        let mut slot = SHARED.lock();
        if let Some(cache) = slot.upgrade() {
            return Ok(cache);
        }
        let cache = Arc::new(Self::load(&FontCacheConfig::default())?);
        *slot = Arc::downgrade(&cache);
        Ok(cache)
    }

    /// Path of the cached font file.
    pub fn font_path(&self) -> &Path {
        &self.path
    }

    /// Family name of the cached font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The registry holding the cached font.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// A font request for the cached face at the given pixel size.
    pub fn font(&self, size: f32) -> Font {
        Font::new(self.family.clone(), size).with_weight(self.weight)
    }
}
