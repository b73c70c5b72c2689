//! A framed image preview.
//!
//! The thumbnail draws a coloured frame whose bottom side is thicker than
//! the other three, leaving room for a caption area, and shows its image in
//! an [`ImageFrame`] child placed inside the frame. Hovering the thumbnail
//! (including its image) switches to the hover fill and accent frame.

use std::path::{Path, PathBuf};

use nvs_core::Signal;
use nvs_core::logging::{span_names, targets};
use nvs_render::{BorderSide, BorderSides, BorderStyle, Color, ImageData, Point, Rect, Renderer};

use super::image_frame::ImageFrame;
use super::rounded_control::RoundedControl;
use crate::error::{ComponentError, ComponentResult};
use crate::theme::Theme;
use crate::widget::{PaintContext, SizeHint, Widget, WidgetBase, WidgetEvent};

/// Frame width on the left, top and right.
const SIDE_FRAME: f32 = 8.0;
/// Frame width at the bottom.
const BOTTOM_FRAME: f32 = 20.0;

/// An image thumbnail with a hover highlight.
pub struct Thumbnail {
    control: RoundedControl,
    frame: ImageFrame,
    theme: Theme,

    /// Emitted with the file path after an image was loaded.
    pub image_loaded: Signal<PathBuf>,
}

impl Default for Thumbnail {
    fn default() -> Self {
        Self::new()
    }
}

impl Thumbnail {
    pub fn new() -> Self {
        Self {
            control: RoundedControl::new(),
            frame: ImageFrame::new(),
            theme: Theme::default(),
            image_loaded: Signal::new(),
        }
    }

    /// Load an image file and show it.
    ///
    /// Fails with [`ComponentError::NotFound`] if `path` is not an existing
    /// file, and with [`ComponentError::Render`] if it cannot be decoded. On
    /// failure the previously shown image (if any) stays in place. The file
    /// is read synchronously.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> ComponentResult<()> {
        let path = path.as_ref();
        let _span = tracing::debug_span!(
            target: targets::THUMBNAIL,
            span_names::THUMBNAIL_LOAD,
            path = %path.display()
        )
        .entered();
        if !path.is_file() {
            tracing::warn!(target: targets::THUMBNAIL, path = %path.display(), "thumbnail image not found");
            return Err(ComponentError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let image = ImageData::load(path)?;
        tracing::debug!(
            target: targets::THUMBNAIL,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "thumbnail image loaded"
        );
        self.frame.set_image(image);
        self.control.update();
        self.image_loaded.emit(path.to_path_buf());
        Ok(())
    }

    /// The image currently shown.
    pub fn image(&self) -> Option<&ImageData> {
        self.frame.image()
    }

    pub fn clear_image(&mut self) {
        self.frame.clear_image();
        self.control.update();
    }

    /// The child that shows the image.
    pub fn image_frame(&self) -> &ImageFrame {
        &self.frame
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.control.update();
    }

    /// The embedded rounded control (region and outline settings).
    pub fn rounded_control(&self) -> &RoundedControl {
        &self.control
    }

    pub fn rounded_control_mut(&mut self) -> &mut RoundedControl {
        &mut self.control
    }

    /// Background fill for the current hover state.
    pub fn current_base_color(&self) -> Color {
        if self.is_hovered() {
            self.theme.base_hover
        } else {
            self.theme.base
        }
    }

    /// Frame colour for the current hover state.
    pub fn current_frame_color(&self) -> Color {
        if self.is_hovered() {
            self.theme.accent
        } else {
            self.theme.frame
        }
    }

    /// The frame drawn around the image.
    pub fn frame_borders(&self) -> BorderSides {
        let color = self.current_frame_color();
        let side = BorderSide::new(color, SIDE_FRAME, BorderStyle::Solid);
        BorderSides::uniform(side).with_bottom(BorderSide::new(color, BOTTOM_FRAME, BorderStyle::Solid))
    }

    fn layout_frame(&mut self) {
        let rect = self
            .control
            .widget_base()
            .rect()
            .inset(SIDE_FRAME, SIDE_FRAME, SIDE_FRAME, BOTTOM_FRAME);
        self.frame.set_geometry(rect);
    }
}

impl Widget for Thumbnail {
    fn widget_base(&self) -> &WidgetBase {
        self.control.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.control.widget_base_mut()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(160.0, 140.0).with_minimum(nvs_render::Size::new(
            2.0 * SIDE_FRAME,
            SIDE_FRAME + BOTTOM_FRAME,
        ))
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.control.set_geometry(rect);
        self.layout_frame();
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let bounds = ctx.rect();
        self.control.clip_to_outline(ctx);
        ctx.renderer().fill_rect(bounds, self.current_base_color());
        self.control.stroke_outline(ctx, self.control.outline_color());
        ctx.renderer().draw_border(bounds, &self.frame_borders());
    }

    fn event(&mut self, event: &mut WidgetEvent) -> ComponentResult<bool> {
        match event {
            WidgetEvent::Enter(_) | WidgetEvent::Leave(_) => {
                self.update();
                Ok(true)
            }
            WidgetEvent::Resize(_) => {
                self.layout_frame();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn children(&self) -> Vec<&dyn Widget> {
        vec![&self.frame]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        vec![&mut self.frame]
    }

    fn contains_point(&self, point: Point) -> bool {
        self.control.contains_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout_follows_geometry() {
        let mut thumb = Thumbnail::new();
        thumb.set_geometry(Rect::new(5.0, 5.0, 120.0, 100.0));
        assert_eq!(thumb.image_frame().geometry(), Rect::new(8.0, 8.0, 104.0, 72.0));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut thumb = Thumbnail::new();
        let err = thumb.load_image(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ComponentError::NotFound { .. }));
        assert!(thumb.image().is_none());
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut thumb = Thumbnail::new();
        assert!(matches!(
            thumb.load_image(dir.path()),
            Err(ComponentError::NotFound { .. })
        ));
    }

    #[test]
    fn test_undecodable_file_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let mut thumb = Thumbnail::new();
        assert!(matches!(thumb.load_image(&path), Err(ComponentError::Render(_))));
        assert!(thumb.image().is_none());
    }

    #[test]
    fn test_borders_are_thicker_at_the_bottom() {
        let thumb = Thumbnail::new();
        let borders = thumb.frame_borders();
        assert_eq!(borders.left.width, 8.0);
        assert_eq!(borders.top.width, 8.0);
        assert_eq!(borders.right.width, 8.0);
        assert_eq!(borders.bottom.width, 20.0);
        assert_eq!(borders.bottom.color, Theme::default().frame);
    }
}
