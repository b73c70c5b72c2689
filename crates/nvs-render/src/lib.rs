//! Rendering primitives for the NVS components.
//!
//! This crate holds everything a widget needs to describe what it looks like
//! without depending on a particular graphics backend:
//!
//! - Geometry and color types ([`Point`], [`Rect`], [`Color`], [`Path`], ...)
//! - The rounded-rectangle outline every control is drawn with
//!   ([`rounded_path`]) and the hit [`Region`] built from it
//! - lyon-backed path queries ([`path::hit_test`], [`path::path_bounds`])
//! - Paint, stroke and border styles
//! - The [`Renderer`] trait with a save/restore state stack and the
//!   [`StateGuard`] that keeps it balanced
//! - [`RecordingRenderer`], a display-list backend that records every call
//! - Decoded images ([`ImageData`]) and a private [`FontRegistry`]
//!
//! # Drawing a rounded control
//!
//! ```
//! use nvs_render::{
//!     rounded_path, Color, DrawCommand, RecordingRenderer, Rect, Renderer, Size, Stroke,
//! };
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.begin_frame(Color::WHITE, Size::new(120.0, 40.0));
//!
//! let outline = rounded_path(Rect::new(0.0, 0.0, 120.0, 40.0), 12.5);
//! {
//!     let mut scope = renderer.scoped();
//!     scope.clip_path(&outline);
//!     scope.stroke_path(&outline, &Stroke::new(Color::BLACK, 1.75));
//! }
//!
//! let stats = renderer.end_frame();
//! assert_eq!(stats.draw_calls, 1);
//! assert!(matches!(renderer.commands().last(), Some(DrawCommand::Restore)));
//! ```

mod error;
pub mod image;
pub mod paint;
pub mod path;
pub mod recording;
pub mod renderer;
pub mod shape;
pub mod text;
mod types;

pub use error::{RenderError, RenderResult};
pub use crate::image::ImageData;
pub use paint::{BorderSide, BorderSides, BorderStyle, FillRule, Paint, Stroke, StrokeAlignment};
pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{FrameStats, RenderState, RenderStateStack, Renderer, StateGuard};
pub use shape::{Region, rounded_path, rounded_region};
pub use text::{Font, FontFaceInfo, FontLoadError, FontRegistry, FontWeight, TextMetrics};
pub use types::{Color, CornerRadii, Path, PathCommand, Point, Rect, RoundedRect, Size};
