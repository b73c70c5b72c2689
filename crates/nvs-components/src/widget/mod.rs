//! Widget system for the NVS components.
//!
//! - [`Widget`] trait: paint, event handling, geometry, children and
//!   hit-testing
//! - [`WidgetBase`]: common state embedded by every widget
//! - Widget events for pointer, keyboard and resize input
//! - [`dispatch_event`] and [`paint_widget`] for driving a widget tree
//!
//! # Creating a Widget
//!
//! ```
//! use nvs_components::widget::{PaintContext, SizeHint, Widget, WidgetBase};
//! use nvs_components::render::{Color, Renderer};
//!
//! struct Swatch {
//!     base: WidgetBase,
//!     color: Color,
//! }
//!
//! impl Widget for Swatch {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn size_hint(&self) -> SizeHint {
//!         SizeHint::from_dimensions(16.0, 16.0)
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let rect = ctx.rect();
//!         ctx.renderer().fill_rect(rect, self.color);
//!     }
//! }
//! ```
//!
//! Widgets are driven without a live window: the host (or a test) builds
//! events, hands them to [`dispatch_event`], and paints into a
//! [`RecordingRenderer`](nvs_render::RecordingRenderer) with
//! [`paint_widget`].

mod base;
mod dispatcher;
mod events;
mod geometry;
mod traits;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::WidgetBase;
pub use dispatcher::{DispatchResult, dispatch_event, paint_widget};
pub use events::{
    EnterEvent, EventBase, Key, KeyPressEvent, KeyboardModifiers, LeaveEvent, MouseButton,
    MouseMoveEvent, MousePressEvent, MouseReleaseEvent, ResizeEvent, WidgetEvent,
};
pub use geometry::{SizeHint, SizePolicy};
pub use traits::{PaintContext, Widget};
