//! Bundled resources and the on-disk font cache.
//!
//! The controls draw their labels with a font that ships inside the crate.
//! [`FontCache`] writes that font once to the per-user application data
//! directory and registers it in a private [`nvs_render::FontRegistry`]; every
//! widget then shares a single reference-counted cache.

mod embedded;
mod font_cache;

pub use embedded::EmbeddedFonts;
pub use font_cache::{FontCache, FontCacheConfig, materialize_font};
