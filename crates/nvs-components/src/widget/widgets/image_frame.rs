//! The picture area inside a [`Thumbnail`](super::Thumbnail).

use nvs_render::{ImageData, Renderer};

use crate::widget::{PaintContext, SizeHint, Widget, WidgetBase};

/// A widget that shows one decoded image, scaled to fit and centred.
#[derive(Debug, Default)]
pub struct ImageFrame {
    base: WidgetBase,
    image: Option<ImageData>,
}

impl ImageFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image currently shown.
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: ImageData) {
        self.image = Some(image);
        self.base.update();
    }

    pub fn clear_image(&mut self) {
        if self.image.take().is_some() {
            self.base.update();
        }
    }
}

impl Widget for ImageFrame {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        match &self.image {
            Some(image) => SizeHint::new(image.size()),
            None => SizeHint::default(),
        }
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if let Some(image) = &self.image {
            let dest = image.fit_within(ctx.rect());
            ctx.renderer().draw_image(image, dest);
        }
    }
}
