//! Font descriptions and text metrics.

/// Font weight on the usual 100-900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A request for a font: family, pixel size and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: String,
    size: f32,
    weight: FontWeight,
}

impl Font {
    /// Create a normal-weight font of the given family and pixel size.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::NORMAL,
        }
    }

    /// Use the bold weight.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::BOLD;
        self
    }

    /// Set an explicit weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the pixel size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }
}

/// The extent of a measured line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Sum of glyph advances.
    pub width: f32,
    /// Ascent plus descent.
    pub height: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box (positive).
    pub descent: f32,
}
