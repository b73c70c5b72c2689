//! The widget trait and paint context.

use nvs_render::{Point, Rect, RecordingRenderer, Size};

use super::base::WidgetBase;
use super::events::WidgetEvent;
use super::geometry::SizeHint;
use crate::error::ComponentResult;

/// Context passed to [`Widget::paint`].
///
/// The renderer is already translated so that (0, 0) is the widget's
/// top-left corner, and clipped to the widget's rectangle.
pub struct PaintContext<'a> {
    renderer: &'a mut RecordingRenderer,
    widget_rect: Rect,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut RecordingRenderer, widget_rect: Rect) -> Self {
        Self {
            renderer,
            widget_rect,
        }
    }

    /// Get the renderer.
    #[inline]
    pub fn renderer(&mut self) -> &mut RecordingRenderer {
        self.renderer
    }

    /// Get the widget's local rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }
}

/// The capability interface shared by every component.
///
/// Implementors provide their [`WidgetBase`], a size hint and a paint
/// routine. Everything else has a default built on the base: geometry,
/// visibility, rectangular hit-testing and an event handler that ignores
/// every event.
pub trait Widget {
    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Get the widget's size hint for layout purposes.
    fn size_hint(&self) -> SizeHint;

    /// Paint the widget. Children are painted afterwards by
    /// [`paint_widget`](super::paint_widget).
    fn paint(&self, ctx: &mut PaintContext<'_>);

    /// Handle a widget event.
    ///
    /// Return `Ok(true)` if the event was handled and should not propagate
    /// further. Errors abort handling and are returned to whoever dispatched
    /// the event.
    fn event(&mut self, _event: &mut WidgetEvent) -> ComponentResult<bool> {
        Ok(false)
    }

    /// Child widgets, painted on top of this widget in order.
    fn children(&self) -> Vec<&dyn Widget> {
        Vec::new()
    }

    /// Mutable access to the child widgets, used for event delivery.
    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        Vec::new()
    }

    /// Check if a point in local coordinates lies within the widget's
    /// interactive region.
    ///
    /// Widgets with a non-rectangular region override this.
    fn contains_point(&self, point: Point) -> bool {
        self.widget_base().contains_point(point)
    }

    // =========================================================================
    // Base delegation
    // =========================================================================

    /// Get the widget's geometry (position relative to its parent, and size).
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Set the widget's geometry.
    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    /// Get the widget's local rectangle (origin at 0,0).
    fn rect(&self) -> Rect {
        self.widget_base().rect()
    }

    fn width(&self) -> f32 {
        self.widget_base().size().width
    }

    fn height(&self) -> f32 {
        self.widget_base().size().height
    }

    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Check if the pointer is currently over this widget.
    fn is_hovered(&self) -> bool {
        self.widget_base().is_hovered()
    }

    fn needs_repaint(&self) -> bool {
        self.widget_base().needs_repaint()
    }

    /// Request a repaint.
    fn update(&mut self) {
        self.widget_base_mut().update();
    }
}
