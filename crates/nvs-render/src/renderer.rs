//! Core renderer trait defining the 2D drawing interface.
//!
//! This module defines the [`Renderer`] trait which provides a high-level API
//! for 2D drawing operations, the state stack backends use to implement
//! save/restore, and [`StateGuard`], which pairs every save with a restore.

use std::ops::{Deref, DerefMut};

use crate::image::ImageData;
use crate::paint::{BorderSides, FillRule, Paint, Stroke};
use crate::text::Font;
use crate::types::{Color, Path, Point, Rect, RoundedRect, Size};

/// Statistics from a frame render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw operations submitted.
    pub draw_calls: u32,
    /// Number of state changes (save, restore, clip, translate).
    pub state_changes: u32,
}

/// The core 2D rendering trait.
///
/// # Frame Lifecycle
///
/// ```ignore
/// renderer.begin_frame(clear_color, viewport_size);
///
/// renderer.save();
/// renderer.translate(10.0, 10.0);
/// renderer.fill_rect(rect, Color::BLACK);
/// renderer.restore();
///
/// let stats = renderer.end_frame();
/// ```
///
/// # State Stack
///
/// The renderer maintains a state stack that can be saved and restored.
/// This includes the translation and clip region. Prefer [`Renderer::scoped`]
/// over manual `save`/`restore` pairs so that early returns cannot leave the
/// stack unbalanced.
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame.
    ///
    /// Returns statistics about the frame that was rendered.
    fn end_frame(&mut self) -> FrameStats;

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current render state (translation, clip).
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    /// Reset all state to defaults.
    fn reset(&mut self);

    /// Save the state and return a guard that restores it when dropped.
    fn scoped(&mut self) -> StateGuard<'_, Self>
    where
        Self: Sized,
    {
        StateGuard::new(self)
    }

    // =========================================================================
    // Transform Operations
    // =========================================================================

    /// Apply a translation to the current state.
    fn translate(&mut self, tx: f32, ty: f32);

    /// The accumulated translation.
    fn offset(&self) -> Point;

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Intersect the clip region with a rectangle.
    fn clip_rect(&mut self, rect: Rect);

    /// Intersect the clip region with an arbitrary path.
    fn clip_path(&mut self, path: &Path);

    /// Get the current clip bounds, if any.
    fn clip_bounds(&self) -> Option<Rect>;

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with the specified paint.
    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Fill a rounded rectangle with the specified paint.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>);

    /// Fill a path.
    fn fill_path(&mut self, path: &Path, paint: impl Into<Paint>, fill_rule: FillRule);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);

    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw per-side borders just inside `rect`.
    fn draw_border(&mut self, rect: Rect, sides: &BorderSides);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, paint: impl Into<Paint>);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &ImageData, dest: Rect);
}

/// The mutable state tracked by a renderer between save and restore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    /// Accumulated translation.
    pub translation: Point,
    /// Bounds of the current clip region in device coordinates.
    pub clip: Option<Rect>,
    /// Number of clip operations applied in this state.
    pub clip_depth: usize,
}

/// A stack of render states for save/restore operations.
#[derive(Debug, Clone, Default)]
pub struct RenderStateStack {
    stack: Vec<RenderState>,
    current: RenderState,
}

impl RenderStateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &RenderState {
        &self.current
    }

    /// Number of saved states.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// Restore the previously saved state.
    ///
    /// Returns `false` when there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = RenderState::default();
    }

    /// Apply a translation.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current.translation = self.current.translation.offset(tx, ty);
    }

    /// Map a rectangle from local to device coordinates.
    #[inline]
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let t = self.current.translation;
        rect.offset(t.x, t.y)
    }

    /// Map a point from local to device coordinates.
    #[inline]
    pub fn map_point(&self, point: Point) -> Point {
        let t = self.current.translation;
        point.offset(t.x, t.y)
    }

    /// Intersect the clip with device-space bounds.
    ///
    /// Disjoint clips collapse to an empty rectangle rather than clearing the clip.
    pub fn intersect_clip(&mut self, device_bounds: Rect) {
        let clip = match self.current.clip {
            Some(existing) => existing.intersect(&device_bounds).unwrap_or(Rect::new(
                device_bounds.left(),
                device_bounds.top(),
                0.0,
                0.0,
            )),
            None => device_bounds,
        };
        self.current.clip = Some(clip);
        self.current.clip_depth += 1;
    }
}

/// Saves renderer state on creation and restores it on drop.
///
/// Every exit path of a paint routine, early returns included, leaves the
/// renderer's state stack exactly as it found it.
pub struct StateGuard<'a, R: Renderer> {
    renderer: &'a mut R,
}

impl<'a, R: Renderer> StateGuard<'a, R> {
    /// Save the renderer state.
    pub fn new(renderer: &'a mut R) -> Self {
        renderer.save();
        Self { renderer }
    }
}

impl<R: Renderer> Deref for StateGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer> DerefMut for StateGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer> Drop for StateGuard<'_, R> {
    fn drop(&mut self) {
        self.renderer.restore();
    }
}
