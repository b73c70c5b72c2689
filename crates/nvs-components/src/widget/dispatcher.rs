//! Event delivery and painting for widget trees.
//!
//! # Event Flow
//!
//! [`dispatch_event`] takes an event whose pointer position is in the
//! widget's parent coordinates and:
//!
//! 1. Translates the position into the widget's local coordinates.
//! 2. For pointer moves, compares the position against the widget's region
//!    ([`Widget::contains_point`]) and synthesizes enter/leave events when
//!    the pointer crosses it.
//! 3. Drops presses and moves that fall outside the region. Releases are
//!    always delivered so that a press can be finished after the pointer has
//!    left.
//! 4. Offers the event to the children first, then to the widget itself if
//!    no child accepted it.

use nvs_render::{RecordingRenderer, Renderer};

use super::events::{EnterEvent, LeaveEvent, WidgetEvent};
use super::traits::{PaintContext, Widget};
use crate::error::ComponentResult;

/// Result of dispatching an event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The event was accepted/handled.
    Accepted,
    /// The event reached the widget but was not handled.
    Ignored,
    /// The pointer was outside the widget's region, so the event was not
    /// delivered.
    OutsideRegion,
}

impl DispatchResult {
    /// Check if the event was handled.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Deliver an event to `widget` and its children.
///
/// The event's pointer position is restored to parent coordinates before
/// returning, even when a handler fails.
pub fn dispatch_event(
    widget: &mut dyn Widget,
    event: &mut WidgetEvent,
) -> ComponentResult<DispatchResult> {
    let origin = widget.geometry().origin;
    event.translate(-origin.x, -origin.y);
    let result = dispatch_local(widget, event);
    event.translate(origin.x, origin.y);
    result
}

fn dispatch_local(
    widget: &mut dyn Widget,
    event: &mut WidgetEvent,
) -> ComponentResult<DispatchResult> {
    if !widget.is_visible() || !widget.is_enabled() {
        return Ok(DispatchResult::Ignored);
    }

    match event {
        WidgetEvent::Enter(_) => widget.widget_base_mut().set_hovered(true),
        WidgetEvent::Leave(_) => {
            leave_children(widget)?;
            widget.widget_base_mut().set_hovered(false);
        }
        _ => {}
    }

    if let Some(pos) = event.local_pos()
        && !matches!(event, WidgetEvent::Enter(_))
    {
        let inside = widget.contains_point(pos);
        if matches!(event, WidgetEvent::MouseMove(_)) {
            update_hover(widget, inside, pos)?;
        }

        let always_delivered = matches!(event, WidgetEvent::MouseRelease(_));
        if !inside && !always_delivered {
            return Ok(DispatchResult::OutsideRegion);
        }

        for child in widget.children_mut() {
            if dispatch_event(child, event)? == DispatchResult::Accepted {
                return Ok(DispatchResult::Accepted);
            }
        }
    }

    if widget.event(event)? {
        event.accept();
    }

    Ok(if event.is_accepted() {
        DispatchResult::Accepted
    } else {
        DispatchResult::Ignored
    })
}

fn update_hover(
    widget: &mut dyn Widget,
    inside: bool,
    pos: nvs_render::Point,
) -> ComponentResult<()> {
    if inside == widget.is_hovered() {
        return Ok(());
    }

    if inside {
        widget.widget_base_mut().set_hovered(true);
        widget.event(&mut WidgetEvent::Enter(EnterEvent::new(pos)))?;
    } else {
        leave_children(widget)?;
        widget.widget_base_mut().set_hovered(false);
        widget.event(&mut WidgetEvent::Leave(LeaveEvent::new()))?;
    }
    Ok(())
}

fn leave_children(widget: &mut dyn Widget) -> ComponentResult<()> {
    for child in widget.children_mut() {
        if child.is_hovered() {
            leave_children(child)?;
            child.widget_base_mut().set_hovered(false);
            child.event(&mut WidgetEvent::Leave(LeaveEvent::new()))?;
        }
    }
    Ok(())
}

/// Paint `widget` and then its children.
///
/// Each widget is painted with the renderer translated to its origin and
/// clipped to its rectangle. The renderer state is restored afterwards.
pub fn paint_widget(widget: &mut dyn Widget, renderer: &mut RecordingRenderer) {
    if !widget.is_visible() {
        return;
    }

    let geometry = widget.geometry();
    let mut guard = renderer.scoped();
    guard.translate(geometry.origin.x, geometry.origin.y);
    guard.clip_rect(widget.rect());

    {
        let mut ctx = PaintContext::new(&mut guard, widget.rect());
        widget.paint(&mut ctx);
    }
    for child in widget.children_mut() {
        paint_widget(child, &mut guard);
    }

    widget.widget_base_mut().clear_repaint_flag();
}
