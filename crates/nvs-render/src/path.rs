//! Path conversion and geometric queries using lyon.
//!
//! Paths are stored in our own [`Path`] type and converted to lyon's
//! representation whenever a geometric query needs to flatten curves and arcs.

use lyon::algorithms::aabb::bounding_box;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::point as lyon_point;
use lyon::path::builder::SvgPathBuilder;
use lyon::path::{FillRule as LyonFillRule, Path as LyonPath};

use crate::paint::FillRule;
use crate::types::{Path, PathCommand, Point, Rect};

/// Curve flattening tolerance used for hit-testing, in pixels.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Convert our Path to lyon's Path format.
pub fn to_lyon_path(path: &Path) -> LyonPath {
    let mut builder = LyonPath::svg_builder();

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                builder.move_to(lyon_point(p.x, p.y));
            }
            PathCommand::LineTo(p) => {
                builder.line_to(lyon_point(p.x, p.y));
            }
            PathCommand::QuadTo { control, end } => {
                builder.quadratic_bezier_to(
                    lyon_point(control.x, control.y),
                    lyon_point(end.x, end.y),
                );
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                builder.cubic_bezier_to(
                    lyon_point(control1.x, control1.y),
                    lyon_point(control2.x, control2.y),
                    lyon_point(end.x, end.y),
                );
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                end,
            } => {
                let arc_flags = lyon::path::ArcFlags {
                    large_arc: *large_arc,
                    sweep: *sweep,
                };
                builder.arc_to(
                    lyon::math::Vector::new(radii.x, radii.y),
                    lyon::math::Angle::radians(*x_rotation),
                    arc_flags,
                    lyon_point(end.x, end.y),
                );
            }
            PathCommand::Close => {
                builder.close();
            }
        }
    }

    builder.build()
}

fn to_lyon_fill_rule(rule: FillRule) -> LyonFillRule {
    match rule {
        FillRule::NonZero => LyonFillRule::NonZero,
        FillRule::EvenOdd => LyonFillRule::EvenOdd,
    }
}

/// Check whether `point` lies inside `path` using the non-zero fill rule.
pub fn hit_test(path: &Path, point: Point) -> bool {
    hit_test_with_rule(path, point, FillRule::NonZero)
}

/// Check whether `point` lies inside `path` using the given fill rule.
pub fn hit_test_with_rule(path: &Path, point: Point, rule: FillRule) -> bool {
    if path.is_empty() {
        return false;
    }
    let lyon_path = to_lyon_path(path);
    hit_test_path(
        &lyon_point(point.x, point.y),
        lyon_path.iter(),
        to_lyon_fill_rule(rule),
        DEFAULT_TOLERANCE,
    )
}

/// Compute the tight axis-aligned bounds of a path.
///
/// An empty path has empty bounds at the origin.
pub fn path_bounds(path: &Path) -> Rect {
    if path.is_empty() {
        return Rect::default();
    }
    let lyon_path = to_lyon_path(path);
    let aabb = bounding_box(lyon_path.iter());
    Rect::from_corners(
        Point::new(aabb.min.x, aabb.min.y),
        Point::new(aabb.max.x, aabb.max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_hole() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 0.0))
            .line_to(Point::new(100.0, 100.0))
            .line_to(Point::new(0.0, 100.0))
            .close();
        path.move_to(Point::new(25.0, 25.0))
            .line_to(Point::new(75.0, 25.0))
            .line_to(Point::new(75.0, 75.0))
            .line_to(Point::new(25.0, 75.0))
            .close();
        path
    }

    #[test]
    fn test_lyon_path_conversion() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 0.0))
            .quad_to(Point::new(150.0, 50.0), Point::new(100.0, 100.0))
            .cubic_to(
                Point::new(50.0, 150.0),
                Point::new(0.0, 150.0),
                Point::new(0.0, 100.0),
            )
            .arc_to(Point::new(50.0, 50.0), 0.0, false, true, Point::new(0.0, 0.0))
            .close();

        let lyon_path = to_lyon_path(&path);
        assert!(lyon_path.iter().next().is_some());
    }

    #[test]
    fn test_hit_test_triangle() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 0.0))
            .line_to(Point::new(50.0, 100.0))
            .close();

        assert!(hit_test(&path, Point::new(50.0, 30.0)));
        assert!(!hit_test(&path, Point::new(5.0, 90.0)));
    }

    #[test]
    fn test_fill_rule_matters_for_holes() {
        let path = square_with_hole();
        let centre = Point::new(50.0, 50.0);

        // Both subpaths wind the same way, so non-zero fills the hole.
        assert!(hit_test_with_rule(&path, centre, FillRule::NonZero));
        assert!(!hit_test_with_rule(&path, centre, FillRule::EvenOdd));
        assert!(hit_test_with_rule(&path, Point::new(10.0, 10.0), FillRule::EvenOdd));
    }

    #[test]
    fn test_empty_path_queries() {
        let path = Path::new();
        assert!(!hit_test(&path, Point::ZERO));
        assert_eq!(path_bounds(&path), Rect::default());
    }

    #[test]
    fn test_bounds_of_arc_path() {
        let path = crate::shape::rounded_path(Rect::new(10.0, 20.0, 80.0, 40.0), 10.0);
        let bounds = path_bounds(&path);
        assert!((bounds.left() - 10.0).abs() < 0.01);
        assert!((bounds.top() - 20.0).abs() < 0.01);
        assert!((bounds.right() - 90.0).abs() < 0.01);
        assert!((bounds.bottom() - 60.0).abs() < 0.01);
    }
}
