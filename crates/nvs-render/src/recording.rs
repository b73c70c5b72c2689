//! A display-list renderer.
//!
//! [`RecordingRenderer`] implements [`Renderer`] by appending a
//! [`DrawCommand`] per call instead of rasterizing. Geometry is recorded in
//! device coordinates (after the current translation), so the list can be
//! replayed by any backend or inspected directly in tests.

use crate::image::ImageData;
use crate::paint::{BorderSides, FillRule, Paint, Stroke};
use crate::renderer::{FrameStats, RenderStateStack, Renderer};
use crate::text::Font;
use crate::types::{Color, Path, Point, Rect, RoundedRect, Size};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame cleared to a color.
    Clear { color: Color, size: Size },
    /// Render state pushed.
    Save,
    /// Render state popped.
    Restore,
    /// Clip intersected with a rectangle.
    ClipRect(Rect),
    /// Clip intersected with a path.
    ClipPath(Path),
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    FillRoundedRect {
        rect: RoundedRect,
        paint: Paint,
    },
    FillPath {
        path: Path,
        paint: Paint,
        fill_rule: FillRule,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Border {
        rect: Rect,
        sides: BorderSides,
    },
    Text {
        text: String,
        origin: Point,
        font: Font,
        paint: Paint,
    },
    Image {
        dest: Rect,
        width: u32,
        height: u32,
    },
}

impl DrawCommand {
    /// Check whether this command produces pixels (as opposed to changing state).
    pub fn is_draw(&self) -> bool {
        !matches!(
            self,
            Self::Clear { .. } | Self::Save | Self::Restore | Self::ClipRect(_) | Self::ClipPath(_)
        )
    }
}

/// A [`Renderer`] that records commands into a list.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    state: RenderStateStack,
    viewport: Size,
    in_frame: bool,
    stats: FrameStats,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text strings drawn so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether `begin_frame` has been called without a matching `end_frame`.
    pub fn is_in_frame(&self) -> bool {
        self.in_frame
    }

    /// Size passed to the last `begin_frame`.
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Number of outstanding saves.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    fn push_draw(&mut self, command: DrawCommand) {
        self.stats.draw_calls += 1;
        self.commands.push(command);
    }

    fn push_state(&mut self, command: DrawCommand) {
        self.stats.state_changes += 1;
        self.commands.push(command);
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.commands.clear();
        self.state.reset();
        self.stats = FrameStats::default();
        self.viewport = viewport_size;
        self.in_frame = true;
        self.commands.push(DrawCommand::Clear {
            color: clear_color,
            size: viewport_size,
        });
    }

    fn end_frame(&mut self) -> FrameStats {
        self.in_frame = false;
        std::mem::take(&mut self.stats)
    }

    fn save(&mut self) {
        self.state.save();
        self.push_state(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if self.state.restore() {
            self.push_state(DrawCommand::Restore);
        }
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.stats.state_changes += 1;
        self.state.translate(tx, ty);
    }

    fn offset(&self) -> Point {
        self.state.current().translation
    }

    fn clip_rect(&mut self, rect: Rect) {
        let device = self.state.map_rect(rect);
        self.state.intersect_clip(device);
        self.push_state(DrawCommand::ClipRect(device));
    }

    fn clip_path(&mut self, path: &Path) {
        let t = self.offset();
        let device = path.translated(t.x, t.y);
        self.state.intersect_clip(crate::path::path_bounds(&device));
        self.push_state(DrawCommand::ClipPath(device));
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.current().clip
    }

    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let rect = self.state.map_rect(rect);
        self.push_draw(DrawCommand::FillRect {
            rect,
            paint: paint.into(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let rect = self.state.map_rect(rect);
        self.push_draw(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>) {
        let rect = RoundedRect {
            rect: self.state.map_rect(rect.rect),
            radii: rect.radii,
        };
        self.push_draw(DrawCommand::FillRoundedRect {
            rect,
            paint: paint.into(),
        });
    }

    fn fill_path(&mut self, path: &Path, paint: impl Into<Paint>, fill_rule: FillRule) {
        let t = self.offset();
        self.push_draw(DrawCommand::FillPath {
            path: path.translated(t.x, t.y),
            paint: paint.into(),
            fill_rule,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        let t = self.offset();
        self.push_draw(DrawCommand::StrokePath {
            path: path.translated(t.x, t.y),
            stroke: *stroke,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let from = self.state.map_point(from);
        let to = self.state.map_point(to);
        self.push_draw(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_border(&mut self, rect: Rect, sides: &BorderSides) {
        if !sides.is_visible() {
            return;
        }
        let rect = self.state.map_rect(rect);
        self.push_draw(DrawCommand::Border {
            rect,
            sides: *sides,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, paint: impl Into<Paint>) {
        if text.is_empty() {
            return;
        }
        let origin = self.state.map_point(origin);
        self.push_draw(DrawCommand::Text {
            text: text.to_owned(),
            origin,
            font: font.clone(),
            paint: paint.into(),
        });
    }

    fn draw_image(&mut self, image: &ImageData, dest: Rect) {
        let dest = self.state.map_rect(dest);
        self.push_draw(DrawCommand::Image {
            dest,
            width: image.width(),
            height: image.height(),
        });
    }
}
