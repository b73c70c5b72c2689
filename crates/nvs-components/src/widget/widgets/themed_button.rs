//! A flat, dark push button with an uppercased label.
//!
//! # Visual states
//!
//! | State   | Fill / outline    | Bottom border | Label        |
//! |---------|-------------------|---------------|--------------|
//! | Idle    | `theme.base`      | 6 px          | `theme.label`|
//! | Hovered | `theme.base_hover`| 6 px          | `theme.accent` |
//! | Pressed | `theme.base_hover`| 10 px         | `theme.accent` |
//!
//! State changes are computed by [`ButtonState::transition`], a pure
//! function, so the state machine can be tested without painting.

use std::sync::Arc;

use nvs_core::Signal;
use nvs_core::logging::targets;
use nvs_render::{
    BorderSide, BorderSides, BorderStyle, Color, Point, RoundedRect, Renderer, Size,
};

use super::rounded_control::RoundedControl;
use crate::error::ComponentResult;
use crate::resources::FontCache;
use crate::theme::Theme;
use crate::widget::{MouseButton, PaintContext, SizeHint, Widget, WidgetBase, WidgetEvent};

/// Visual state of a [`ThemedButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// Input that can change a [`ButtonState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonInput {
    /// The pointer entered the button's region.
    Enter,
    /// The pointer left the button's region.
    Leave,
    /// The primary button went down inside the region.
    Press,
    /// The primary button was released.
    Release {
        /// Whether the pointer was inside the region at release time.
        inside: bool,
    },
}

/// Outcome of a [`ButtonState::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonTransition {
    pub state: ButtonState,
    /// A press was completed inside the button.
    pub clicked: bool,
    /// The visual state changed.
    pub repaint: bool,
}

impl ButtonState {
    /// Compute the next state.
    ///
    /// A press stays `Pressed` while the pointer wanders off the button; the
    /// release decides the outcome. Releasing inside goes to `Hovered` (the
    /// pointer is still over the button) and counts as a click, releasing
    /// outside goes back to `Idle`.
    pub fn transition(self, input: ButtonInput) -> ButtonTransition {
        let (state, clicked) = match (self, input) {
            (ButtonState::Idle, ButtonInput::Enter) => (ButtonState::Hovered, false),
            (ButtonState::Hovered, ButtonInput::Leave) => (ButtonState::Idle, false),
            (_, ButtonInput::Press) => (ButtonState::Pressed, false),
            (ButtonState::Pressed, ButtonInput::Release { inside: true }) => {
                (ButtonState::Hovered, true)
            }
            (ButtonState::Pressed, ButtonInput::Release { inside: false }) => {
                (ButtonState::Idle, false)
            }
            (state, _) => (state, false),
        };
        ButtonTransition {
            state,
            clicked,
            repaint: state != self,
        }
    }
}

/// A rounded push button drawn with the cached bundled font.
pub struct ThemedButton {
    control: RoundedControl,
    text: String,
    state: ButtonState,
    theme: Theme,
    border_radius: f32,
    font_size: f32,
    pressed_text_shadow: bool,
    fonts: Arc<FontCache>,

    /// Emitted when a press is released inside the button.
    pub clicked: Signal<()>,
}

impl ThemedButton {
    /// Create a button using the process-wide font cache.
    ///
    /// Fails if the bundled font cannot be written to the application data
    /// directory or registered.
    pub fn new(text: impl Into<String>) -> ComponentResult<Self> {
        Ok(Self::with_font_cache(text, FontCache::shared()?))
    }

    /// Create a button that draws its label with an existing font cache.
    pub fn with_font_cache(text: impl Into<String>, fonts: Arc<FontCache>) -> Self {
        let theme = Theme::default();
        let mut control = RoundedControl::new();
        control.set_outline_color(theme.base);
        Self {
            control,
            text: text.into(),
            state: ButtonState::Idle,
            theme,
            border_radius: 10.0,
            font_size: 14.0,
            pressed_text_shadow: false,
            fonts,
            clicked: Signal::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.control.update();
    }

    /// The label as drawn.
    pub fn display_text(&self) -> String {
        self.text.to_uppercase()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.control.update();
    }

    /// Corner radius of the filled body.
    pub fn border_radius(&self) -> f32 {
        self.border_radius
    }

    pub fn set_border_radius(&mut self, radius: f32) {
        self.border_radius = radius;
        self.control.update();
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.control.update();
    }

    /// Whether a one-pixel shadow is drawn under the label while pressed.
    pub fn pressed_text_shadow(&self) -> bool {
        self.pressed_text_shadow
    }

    pub fn set_pressed_text_shadow(&mut self, enabled: bool) {
        self.pressed_text_shadow = enabled;
        self.control.update();
    }

    /// The embedded rounded control (region and outline settings).
    pub fn rounded_control(&self) -> &RoundedControl {
        &self.control
    }

    pub fn rounded_control_mut(&mut self) -> &mut RoundedControl {
        &mut self.control
    }

    /// Fill and outline colour for the current state.
    pub fn current_base_color(&self) -> Color {
        match self.state {
            ButtonState::Idle => self.theme.base,
            ButtonState::Hovered | ButtonState::Pressed => self.theme.base_hover,
        }
    }

    /// Label colour for the current state.
    pub fn current_label_color(&self) -> Color {
        match self.state {
            ButtonState::Idle => self.theme.label,
            ButtonState::Hovered | ButtonState::Pressed => self.theme.accent,
        }
    }

    /// Width of the bottom inset border for the current state.
    pub fn bottom_border_width(&self) -> f32 {
        match self.state {
            ButtonState::Pressed => 10.0,
            ButtonState::Idle | ButtonState::Hovered => 6.0,
        }
    }

    fn apply(&mut self, input: ButtonInput) -> bool {
        let transition = self.state.transition(input);
        if transition.repaint {
            tracing::trace!(target: targets::BUTTON, from = ?self.state, to = ?transition.state, "button state changed");
            self.state = transition.state;
            self.control.update();
        }
        if transition.clicked {
            self.clicked.emit(());
        }
        transition.repaint || transition.clicked
    }

    fn label_origin(&self, bounds: Size, text: &str) -> Point {
        let font = self.fonts.font(self.font_size);
        let metrics = self
            .fonts
            .registry()
            .measure_text(text, &font)
            .unwrap_or_default();
        Point::new(
            (bounds.width - metrics.width) / 2.0,
            (bounds.height - metrics.height) / 2.0,
        )
    }
}

impl Widget for ThemedButton {
    fn widget_base(&self) -> &WidgetBase {
        self.control.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.control.widget_base_mut()
    }

    fn size_hint(&self) -> SizeHint {
        let font = self.fonts.font(self.font_size);
        let metrics = self
            .fonts
            .registry()
            .measure_text(&self.display_text(), &font)
            .unwrap_or_default();
        SizeHint::from_dimensions(
            (metrics.width + 2.0 * self.control.radius() + 16.0).max(80.0),
            (metrics.height + 20.0).max(36.0),
        )
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let bounds = ctx.rect();
        let base = self.current_base_color();

        self.control.clip_to_outline(ctx);
        self.control.stroke_outline(ctx, base);
        ctx.renderer()
            .fill_rounded_rect(RoundedRect::new(bounds, self.border_radius), base);
        ctx.renderer().draw_border(
            bounds,
            &BorderSides::bottom_only(BorderSide::new(
                self.theme.frame,
                self.bottom_border_width(),
                BorderStyle::Inset,
            )),
        );

        let text = self.display_text();
        let origin = self.label_origin(bounds.size, &text);
        let font = self.fonts.font(self.font_size);
        if self.pressed_text_shadow && self.state == ButtonState::Pressed {
            ctx.renderer()
                .draw_text(&text, origin.offset(1.0, 1.0), &font, self.theme.frame);
        }
        ctx.renderer()
            .draw_text(&text, origin, &font, self.current_label_color());
    }

    fn event(&mut self, event: &mut WidgetEvent) -> ComponentResult<bool> {
        let handled = match event {
            WidgetEvent::Enter(_) => self.apply(ButtonInput::Enter),
            WidgetEvent::Leave(_) => self.apply(ButtonInput::Leave),
            WidgetEvent::MousePress(e) if e.button == MouseButton::Left => {
                self.apply(ButtonInput::Press);
                true
            }
            WidgetEvent::MouseRelease(e) if e.button == MouseButton::Left => {
                let inside = self.contains_point(e.local_pos);
                self.apply(ButtonInput::Release { inside });
                true
            }
            _ => false,
        };
        Ok(handled)
    }

    fn contains_point(&self, point: Point) -> bool {
        self.control.contains_point(point)
    }
}
