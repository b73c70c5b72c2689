//! Colour theme shared by the components.
//!
//! Themes are plain data and can be loaded from TOML, with colours written as
//! hex strings. Keys that are left out keep their default value:
//!
//! ```toml
//! base = "#212020"
//! accent = "#FF8800"
//! ```

use std::path::Path;

use nvs_render::Color;
use serde::Deserialize;

use crate::error::{ComponentError, ComponentResult};

/// Colours used when painting the components.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Button and thumbnail fill while idle.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub base: Color,
    /// Button and thumbnail fill while hovered or pressed.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub base_hover: Color,
    /// Highlight colour (hovered label, hovered thumbnail frame).
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub accent: Color,
    /// Idle thumbnail frame and the button's bottom inset border.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub frame: Color,
    /// Button label colour.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub label: Color,
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub tree_background: Color,
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub tree_foreground: Color,
    /// Background of selected tree rows.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub selection_background: Color,
    /// Text of selected tree rows.
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub selection_foreground: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::from_rgb8(0x21, 0x20, 0x20),
            base_hover: Color::from_rgb8(0x2D, 0x2D, 0x2D),
            accent: Color::from_rgb8(0x02, 0xBC, 0xF2),
            frame: Color::BLACK,
            label: Color::WHITE,
            tree_background: Color::WHITE,
            tree_foreground: Color::BLACK,
            selection_background: Color::from_rgb8(0x00, 0x78, 0xD7),
            selection_foreground: Color::WHITE,
        }
    }
}

impl Theme {
    /// Parse a theme from TOML text.
    pub fn from_toml_str(text: &str) -> ComponentResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a theme file.
    pub fn load(path: impl AsRef<Path>) -> ComponentResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ComponentError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}

mod hex_color {
    use nvs_render::Color;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).ok_or_else(|| D::Error::custom(format!("invalid colour `{text}`")))
    }
}
