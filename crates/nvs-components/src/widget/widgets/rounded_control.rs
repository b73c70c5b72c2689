//! A control whose interactive region is a rounded rectangle.
//!
//! [`RoundedControl`] is usable on its own, and is also embedded by
//! [`ThemedButton`](super::ThemedButton) and [`Thumbnail`](super::Thumbnail),
//! which reuse its region, clip and outline.

use nvs_render::{
    Color, Path, Point, Region, Renderer, Stroke, StrokeAlignment, rounded_path, rounded_region,
};

use crate::theme::Theme;
use crate::widget::{PaintContext, SizeHint, Widget, WidgetBase};

/// A widget with rounded corners and an inset outline.
///
/// Pointer events outside the rounded outline do not reach the control.
pub struct RoundedControl {
    base: WidgetBase,
    radius: f32,
    outline_width: f32,
    outline_color: Color,
}

impl Default for RoundedControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundedControl {
    /// Corner radius used unless changed with [`set_radius`](Self::set_radius).
    pub const DEFAULT_RADIUS: f32 = 12.5;

    /// Outline width used unless changed with
    /// [`set_outline_width`](Self::set_outline_width).
    pub const DEFAULT_OUTLINE_WIDTH: f32 = 1.75;

    /// Create a control outlined in the default theme's base colour.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            radius: Self::DEFAULT_RADIUS,
            outline_width: Self::DEFAULT_OUTLINE_WIDTH,
            outline_color: Theme::default().base,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the corner radius. Values are used as given.
    pub fn set_radius(&mut self, radius: f32) {
        if self.radius != radius {
            self.radius = radius;
            self.base.update();
        }
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    pub fn set_outline_width(&mut self, width: f32) {
        if self.outline_width != width {
            self.outline_width = width;
            self.base.update();
        }
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    pub fn set_outline_color(&mut self, color: Color) {
        if self.outline_color != color {
            self.outline_color = color;
            self.base.update();
        }
    }

    /// The rounded outline in local coordinates.
    pub fn outline(&self) -> Path {
        rounded_path(self.base.rect(), self.radius)
    }

    /// The interactive region in local coordinates.
    pub fn region(&self) -> Region {
        rounded_region(self.base.rect(), self.radius)
    }

    /// Clip subsequent painting to the outline.
    pub(crate) fn clip_to_outline(&self, ctx: &mut PaintContext<'_>) {
        ctx.renderer().clip_path(&self.outline());
    }

    /// Stroke the outline in `color`, inside the region.
    pub(crate) fn stroke_outline(&self, ctx: &mut PaintContext<'_>, color: Color) {
        let stroke = Stroke::new(color, self.outline_width).with_alignment(StrokeAlignment::Inset);
        ctx.renderer().stroke_path(&self.outline(), &stroke);
    }
}

impl Widget for RoundedControl {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let min = self.radius * 2.0;
        SizeHint::from_dimensions(100.0, 40.0).with_minimum(nvs_render::Size::new(min, min))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        self.clip_to_outline(ctx);
        self.stroke_outline(ctx, self.outline_color);
    }

    fn contains_point(&self, point: Point) -> bool {
        self.region().contains(point)
    }
}
