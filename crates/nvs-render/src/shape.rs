//! Rounded-rectangle outlines and the hit regions built from them.
//!
//! [`rounded_path`] traces a rectangle with four quarter-circle corners. The
//! same outline is used to stroke a control's border, to clip its painting,
//! and (through [`Region`]) to decide whether a pointer position belongs to
//! the control at all.

use crate::path::{hit_test, path_bounds};
use crate::types::{Path, Point, Rect};

/// Build a closed rounded-rectangle path.
///
/// The outline starts on the top edge just after the top-left corner and runs
/// clockwise: top edge, top-right arc, right edge, bottom-right arc, bottom
/// edge, bottom-left arc, left edge, top-left arc. `radius` is the radius of
/// each corner arc. Negative radii are treated as zero; radii larger than
/// half the shorter side are not clamped and simply produce overlapping
/// corners.
pub fn rounded_path(rect: Rect, radius: f32) -> Path {
    let r = radius.max(0.0);
    let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let mut path = Path::new();

    path.move_to(Point::new(left + r, top));
    path.line_to(Point::new(right - r, top));
    corner(&mut path, r, Point::new(right, top + r));
    path.line_to(Point::new(right, bottom - r));
    corner(&mut path, r, Point::new(right - r, bottom));
    path.line_to(Point::new(left + r, bottom));
    corner(&mut path, r, Point::new(left, bottom - r));
    path.line_to(Point::new(left, top + r));
    corner(&mut path, r, Point::new(left + r, top));
    path.close();

    path
}

fn corner(path: &mut Path, r: f32, end: Point) {
    if r > 0.0 {
        path.arc_to(Point::new(r, r), 0.0, false, true, end);
    }
}

/// Build the hit region of a rounded rectangle.
pub fn rounded_region(rect: Rect, radius: f32) -> Region {
    Region::from_path(rounded_path(rect, radius))
}

/// An area that pointer positions can be tested against.
///
/// Points outside the region are not delivered to the control that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    path: Path,
    bounds: Rect,
}

impl Region {
    /// Create a region from an arbitrary closed path.
    pub fn from_path(path: Path) -> Self {
        let bounds = path_bounds(&path);
        Self { path, bounds }
    }

    /// A plain rectangular region.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            path: Path::rect(rect),
            bounds: rect,
        }
    }

    /// The outline of this region.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The axis-aligned bounds of this region.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Check whether a point lies inside the region.
    pub fn contains(&self, point: Point) -> bool {
        if self.bounds.is_empty() {
            return false;
        }
        // Cheap reject before the exact test. Inclusive on every edge because
        // the path test decides the boundary.
        if point.x < self.bounds.left()
            || point.x > self.bounds.right()
            || point.y < self.bounds.top()
            || point.y > self.bounds.bottom()
        {
            return false;
        }
        hit_test(&self.path, point)
    }
}
