//! Widget base implementation.
//!
//! `WidgetBase` holds the state every widget has: geometry, size policy,
//! visibility, enabled and hover state, and the repaint flag. Widgets embed it
//! as a field and expose it through [`Widget::widget_base`](super::Widget::widget_base).

use nvs_core::Signal;
use nvs_render::{Point, Rect, Size};

use super::geometry::SizePolicy;

/// The base implementation for all widgets.
pub struct WidgetBase {
    /// Position relative to the parent, and size.
    geometry: Rect,

    size_policy: SizePolicy,

    visible: bool,

    enabled: bool,

    /// Whether the pointer is currently inside the widget's region.
    hovered: bool,

    /// Whether the widget needs to be repainted.
    needs_repaint: bool,

    /// Signal emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBase {
    /// Create a new widget base with an empty geometry.
    pub fn new() -> Self {
        Self {
            geometry: Rect::default(),
            size_policy: SizePolicy::default(),
            visible: true,
            enabled: true,
            hovered: false,
            needs_repaint: true,
            geometry_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    ///
    /// This will emit `geometry_changed` if the geometry actually changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.needs_repaint = true;
            self.geometry_changed.emit(rect);
        }
    }

    /// Get the widget's position relative to its parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Move the widget to the specified position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.set_geometry(Rect {
            origin: Point::new(x, y),
            size: self.geometry.size,
        });
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Resize the widget.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_geometry(Rect {
            origin: self.geometry.origin,
            size: Size::new(width, height),
        });
    }

    /// Get a rectangle representing the widget's local coordinate space.
    ///
    /// This is always positioned at (0, 0) with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.geometry.size)
    }

    #[inline]
    pub fn size_policy(&self) -> SizePolicy {
        self.size_policy
    }

    pub fn set_size_policy(&mut self, policy: SizePolicy) {
        self.size_policy = policy;
    }

    // =========================================================================
    // Visibility and enabled state
    // =========================================================================

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_repaint = true;
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.needs_repaint = true;
        }
    }

    // =========================================================================
    // Hover State
    // =========================================================================

    /// Check if the pointer is currently over this widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (used by the dispatcher).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.needs_repaint = true;
        }
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Check if the widget needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint of the widget.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Clear the repaint flag (called after painting).
    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from widget-local coordinates to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        point.offset(self.geometry.origin.x, self.geometry.origin.y)
    }

    /// Map a point from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        point.offset(-self.geometry.origin.x, -self.geometry.origin.y)
    }

    /// Check if a point (in local coordinates) is inside the widget's rectangle.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("hovered", &self.hovered)
            .field("needs_repaint", &self.needs_repaint)
            .finish()
    }
}
