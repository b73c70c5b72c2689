//! Fonts and text measurement.
//!
//! A [`FontRegistry`] is a private font database: faces are registered into
//! it explicitly from files or memory, never from the system font
//! directories, so a control only ever sees the fonts it ships with.
//!
//! Text is measured from glyph advances read with `ttf-parser`, which is all
//! a single-line, left-to-right label needs to be centred exactly.
//!
//! # Example
//!
//! ```no_run
//! use nvs_render::text::{Font, FontRegistry};
//!
//! let mut registry = FontRegistry::new();
//! registry.register_file("DejaVuSans-Bold.ttf")?;
//!
//! let font = Font::new("DejaVu Sans", 14.0).bold();
//! if let Some(metrics) = registry.measure_text("CLICK ME", &font) {
//!     println!("{} x {}", metrics.width, metrics.height);
//! }
//! # Ok::<(), nvs_render::text::FontLoadError>(())
//! ```

mod font;
mod font_registry;

pub use font::{Font, FontWeight, TextMetrics};
pub use font_registry::{FontFaceInfo, FontLoadError, FontRegistry};
