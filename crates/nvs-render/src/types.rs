//! Basic geometry and color types for rendering.
//!
//! This module provides fundamental types used throughout the rendering system.

use std::fmt;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Return this point moved by the given offset.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Create a rectangle from two corners (min and max points).
    #[inline]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            origin: min,
            size: Size::new(max.x - min.x, max.y - min.y),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Get the center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Shrink the rectangle by per-side insets.
    ///
    /// The result never has a negative size.
    #[inline]
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        Rect::new(
            self.left() + left,
            self.top() + top,
            (self.width() - left - right).max(0.0),
            (self.height() - top - bottom).max(0.0),
        )
    }

    /// Shrink the rectangle by the same amount on every side.
    #[inline]
    pub fn deflate(&self, amount: f32) -> Rect {
        self.inset(amount, amount, amount, amount)
    }

    /// Move the rectangle by the given offset.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }
}

/// Corner radii for rounded rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    /// Create corner radii with the same value for all corners.
    #[inline]
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Zero radii (sharp corners).
    pub const ZERO: Self = Self::uniform(0.0);

    /// Check if all radii are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

/// A rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundedRect {
    /// The base rectangle.
    pub rect: Rect,
    /// Corner radii (top-left, top-right, bottom-right, bottom-left).
    pub radii: CornerRadii,
}

impl RoundedRect {
    /// Create a rounded rectangle with uniform corner radius.
    #[inline]
    pub fn new(rect: Rect, radius: f32) -> Self {
        Self {
            rect,
            radii: CornerRadii::uniform(radius),
        }
    }

    /// Check if all corners have zero radius (is a regular rectangle).
    #[inline]
    pub fn is_rect(&self) -> bool {
        self.radii.is_zero()
    }
}

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Convert to 8-bit RGBA components.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Return a new color with modified alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Move the color towards white by `amount` (0.0-1.0), keeping alpha.
    #[inline]
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            a: self.a,
            ..self.lerp(Self::WHITE, amount.clamp(0.0, 1.0))
        }
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 2D path made of move, line, curve and arc segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

/// Commands that make up a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a point without drawing.
    MoveTo(Point),
    /// Draw a line to a point.
    LineTo(Point),
    /// Draw a quadratic bezier curve.
    QuadTo { control: Point, end: Point },
    /// Draw a cubic bezier curve.
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Draw an elliptical arc (SVG endpoint parameterization).
    ArcTo {
        radii: Point,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    /// The point the pen rests on after this command, if it moves the pen.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::QuadTo { end, .. } | Self::CubicTo { end, .. } | Self::ArcTo { end, .. } => {
                Some(end)
            }
            Self::Close => None,
        }
    }

    fn translated(self, dx: f32, dy: f32) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(p.offset(dx, dy)),
            Self::LineTo(p) => Self::LineTo(p.offset(dx, dy)),
            Self::QuadTo { control, end } => Self::QuadTo {
                control: control.offset(dx, dy),
                end: end.offset(dx, dy),
            },
            Self::CubicTo {
                control1,
                control2,
                end,
            } => Self::CubicTo {
                control1: control1.offset(dx, dy),
                control2: control2.offset(dx, dy),
                end: end.offset(dx, dy),
            },
            Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                end,
            } => Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                end: end.offset(dx, dy),
            },
            Self::Close => Self::Close,
        }
    }
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    /// Draw a quadratic bezier curve.
    pub fn quad_to(&mut self, control: Point, end: Point) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, end });
        self
    }

    /// Draw a cubic bezier curve.
    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Draw a circular or elliptical arc to `end`.
    pub fn arc_to(
        &mut self,
        radii: Point,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            x_rotation,
            large_arc,
            sweep,
            end,
        });
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Get the path commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The first point of the path.
    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(PathCommand::end_point)
    }

    /// The last point the pen reaches, ignoring a trailing close.
    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// Check whether the path ends with a close command.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Return a copy of this path moved by the given offset.
    pub fn translated(&self, dx: f32, dy: f32) -> Path {
        Path {
            commands: self
                .commands
                .iter()
                .map(|cmd| cmd.translated(dx, dy))
                .collect(),
        }
    }

    /// Create a rectangular path.
    pub fn rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.move_to(Point::new(rect.left(), rect.top()))
            .line_to(Point::new(rect.right(), rect.top()))
            .line_to(Point::new(rect.right(), rect.bottom()))
            .line_to(Point::new(rect.left(), rect.bottom()))
            .close();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);

        let p2: Point = (3.0, 4.0).into();
        assert_eq!(p2, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains(Point::new(50.0, 50.0)));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(100.0, 100.0))); // Right/bottom edge is exclusive
        assert!(!r.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn test_rect_intersect() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(r1.intersect(&r2), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let r3 = Rect::new(200.0, 200.0, 50.0, 50.0);
        assert!(r1.intersect(&r3).is_none());
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(r.inset(8.0, 8.0, 8.0, 20.0), Rect::new(8.0, 8.0, 84.0, 32.0));

        let tiny = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0, 8.0, 8.0, 20.0);
        assert_eq!(tiny.size, Size::ZERO);
    }

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#02BCF2").unwrap();
        assert_eq!(c, Color::from_rgb8(0x02, 0xBC, 0xF2));
        assert_eq!(c.to_hex(), "#02BCF2");

        let translucent = Color::from_hex("00FF0080").unwrap();
        assert!((translucent.a - 0.5).abs() < 0.01);
        assert_eq!(translucent.to_hex(), "#00FF0080");

        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn test_color_lighten() {
        let c = Color::from_rgb8(0x21, 0x20, 0x20);
        assert_eq!(c.lighten(0.0), c);
        assert_eq!(c.lighten(1.0).to_hex(), "#FFFFFF");

        let half = Color::BLACK.with_alpha(0.5).lighten(0.5);
        assert!((half.r - 0.5).abs() < 0.001);
        assert_eq!(half.a, 0.5);
    }

    #[test]
    fn test_path_commands() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 0.0))
            .line_to(Point::new(100.0, 100.0))
            .close();

        assert_eq!(path.commands().len(), 4);
        assert!(path.is_closed());
        assert_eq!(path.start_point(), Some(Point::ZERO));
        assert_eq!(path.end_point(), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_path_translated() {
        let mut path = Path::new();
        path.move_to(Point::new(1.0, 1.0)).arc_to(
            Point::new(5.0, 5.0),
            0.0,
            false,
            true,
            Point::new(6.0, 6.0),
        );

        let moved = path.translated(10.0, 20.0);
        assert_eq!(moved.start_point(), Some(Point::new(11.0, 21.0)));
        assert!(matches!(
            moved.commands()[1],
            PathCommand::ArcTo { radii, end, .. }
                if radii == Point::new(5.0, 5.0) && end == Point::new(16.0, 26.0)
        ));
    }

    #[test]
    fn test_empty_path() {
        let path = Path::new();
        assert!(path.is_empty());
        assert!(!path.is_closed());
        assert_eq!(path.start_point(), None);
    }
}
