//! Paint styles for filling and stroking shapes.
//!
//! This module provides paint types for defining how shapes are rendered,
//! including the per-side border styles used for control frames.

use crate::types::Color;

/// A paint style for filling shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Paint {
    /// Solid color fill.
    Solid(Color),
}

impl Paint {
    /// Create a solid color paint.
    #[inline]
    pub const fn solid(color: Color) -> Self {
        Self::Solid(color)
    }

    /// Get the solid color, if this is a solid paint.
    #[inline]
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Self::Solid(c) => Some(*c),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Color::BLACK)
    }
}

/// Fill rule for determining the interior of self-intersecting paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Non-zero winding rule.
    #[default]
    NonZero,
    /// Even-odd rule.
    EvenOdd,
}

/// Where a stroke sits relative to the outline it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeAlignment {
    /// The stroke is centred on the outline.
    #[default]
    Center,
    /// The stroke lies entirely inside the outline.
    Inset,
}

/// Stroke style options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub paint: Paint,
    /// Stroke width in pixels.
    pub width: f32,
    /// Placement of the stroke relative to the outline.
    pub alignment: StrokeAlignment,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            paint: Paint::Solid(Color::BLACK),
            width: 1.0,
            alignment: StrokeAlignment::Center,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given paint and width.
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
            ..Default::default()
        }
    }

    /// Set the stroke alignment.
    pub fn with_alignment(mut self, alignment: StrokeAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Visual style of one border side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// No border is drawn.
    #[default]
    None,
    /// A flat line in the side's color.
    Solid,
    /// A sunken bevel: darker on the top/left, lighter on the bottom/right.
    Inset,
    /// A raised bevel: lighter on the top/left, darker on the bottom/right.
    Outset,
}

/// One side of a border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSide {
    pub color: Color,
    pub width: f32,
    pub style: BorderStyle,
}

impl BorderSide {
    /// A side that draws nothing.
    pub const NONE: Self = Self {
        color: Color::TRANSPARENT,
        width: 0.0,
        style: BorderStyle::None,
    };

    /// Create a border side.
    pub const fn new(color: Color, width: f32, style: BorderStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    /// Check whether this side produces any output.
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width > 0.0 && self.color.a > 0.0
    }
}

impl Default for BorderSide {
    fn default() -> Self {
        Self::NONE
    }
}

/// Borders for all four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderSides {
    pub left: BorderSide,
    pub top: BorderSide,
    pub right: BorderSide,
    pub bottom: BorderSide,
}

impl BorderSides {
    /// The same border on every side.
    pub const fn uniform(side: BorderSide) -> Self {
        Self {
            left: side,
            top: side,
            right: side,
            bottom: side,
        }
    }

    /// Only a bottom border.
    pub const fn bottom_only(side: BorderSide) -> Self {
        Self {
            left: BorderSide::NONE,
            top: BorderSide::NONE,
            right: BorderSide::NONE,
            bottom: side,
        }
    }

    /// Replace the bottom side.
    pub fn with_bottom(mut self, side: BorderSide) -> Self {
        self.bottom = side;
        self
    }

    /// Check whether any side produces output.
    pub fn is_visible(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .any(BorderSide::is_visible)
    }
}
