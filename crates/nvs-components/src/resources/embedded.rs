//! Fonts compiled into the crate.

use include_dir::{Dir, include_dir};

static FONTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/fonts");

/// Access to the font files embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFonts;

impl EmbeddedFonts {
    /// Get a font file's contents by file name.
    ///
    /// Returns `None` if no such font is embedded.
    pub fn get(name: &str) -> Option<&'static [u8]> {
        FONTS.get_file(name).map(|f| f.contents())
    }

    /// File names of all embedded fonts.
    pub fn names() -> Vec<&'static str> {
        FONTS
            .files()
            .filter_map(|f| f.path().to_str())
            .collect()
    }
}
