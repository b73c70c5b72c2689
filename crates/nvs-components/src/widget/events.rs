//! Widget event types.
//!
//! Events are plain values. The host (or a test) constructs them and hands
//! them to [`dispatch_event`](super::dispatch_event), which translates pointer
//! positions into each widget's local coordinates.

use nvs_render::{Point, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Common data for all widget events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Resize event, sent when a widget's size changes.
#[derive(Debug, Clone, Copy)]
pub struct ResizeEvent {
    /// Base event data.
    pub base: EventBase,
    /// The old size of the widget.
    pub old_size: Size,
    /// The new size of the widget.
    pub new_size: Size,
}

impl ResizeEvent {
    /// Create a new resize event.
    pub fn new(old_size: Size, new_size: Size) -> Self {
        Self {
            base: EventBase::new(),
            old_size,
            new_size,
        }
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }
}

/// Mouse move event.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Mouse buttons currently held, one bit per [`MouseButton`].
    pub buttons: u8,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(local_pos: Point, buttons: u8, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            buttons,
            modifiers,
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons & (1 << button as u8)) != 0
    }
}

/// Enter event, sent when the pointer enters the widget's region.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// The position where the pointer entered.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Leave event, sent when the pointer leaves the widget's region.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self {
            base: EventBase::new(),
        }
    }
}

/// Keyboard key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Enter, Tab, Space,

    // Punctuation
    Minus, Period, Comma,

    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press, empty for non-printable keys.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>, is_repeat: bool) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A non-repeating press of a key that produces no text.
    pub fn key(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, "", false)
    }

    /// The first typed character, if the key produced printable text.
    pub fn typed_char(&self) -> Option<char> {
        self.text.chars().next().filter(|c| !c.is_control())
    }
}

/// Events delivered to widgets.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Resize event.
    Resize(ResizeEvent),
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Mouse move event.
    MouseMove(MouseMoveEvent),
    /// Pointer enter event.
    Enter(EnterEvent),
    /// Pointer leave event.
    Leave(LeaveEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
}

impl WidgetEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::Resize(e) => &e.base,
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::MouseMove(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::KeyPress(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::Resize(e) => &mut e.base,
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::MouseMove(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::KeyPress(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }

    /// The pointer position in local coordinates, for pointer events.
    pub fn local_pos(&self) -> Option<Point> {
        match self {
            Self::MousePress(e) => Some(e.local_pos),
            Self::MouseRelease(e) => Some(e.local_pos),
            Self::MouseMove(e) => Some(e.local_pos),
            Self::Enter(e) => Some(e.local_pos),
            _ => None,
        }
    }

    /// Shift the pointer position of a pointer event by `(dx, dy)`.
    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Self::MousePress(e) => e.local_pos = e.local_pos.offset(dx, dy),
            Self::MouseRelease(e) => e.local_pos = e.local_pos.offset(dx, dy),
            Self::MouseMove(e) => e.local_pos = e.local_pos.offset(dx, dy),
            Self::Enter(e) => e.local_pos = e.local_pos.offset(dx, dy),
            _ => {}
        }
    }

    /// Check if this event should propagate to the parent widget.
    ///
    /// Resize and enter/leave concern only the receiving widget. Input events
    /// propagate while not accepted.
    pub fn should_propagate(&self) -> bool {
        match self {
            Self::Resize(_) | Self::Enter(_) | Self::Leave(_) => false,
            Self::MousePress(_) | Self::MouseRelease(_) | Self::MouseMove(_) | Self::KeyPress(_) => {
                !self.is_accepted()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::SHIFT.any());
        assert!(KeyboardModifiers::CTRL_SHIFT.shift && KeyboardModifiers::CTRL_SHIFT.control);
    }

    #[test]
    fn test_accept_and_propagate() {
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(1.0, 2.0),
            KeyboardModifiers::NONE,
        ));
        assert!(event.should_propagate());
        event.accept();
        assert!(event.is_accepted());
        assert!(!event.should_propagate());

        let leave = WidgetEvent::Leave(LeaveEvent::new());
        assert!(!leave.should_propagate());
    }

    #[test]
    fn test_translate_pointer_events_only() {
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(Point::new(10.0, 10.0), 0, KeyboardModifiers::NONE));
        event.translate(-4.0, -6.0);
        assert_eq!(event.local_pos(), Some(Point::new(6.0, 4.0)));

        let mut key = WidgetEvent::KeyPress(KeyPressEvent::key(Key::Home, KeyboardModifiers::NONE));
        key.translate(1.0, 1.0);
        assert_eq!(key.local_pos(), None);
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(KeyPressEvent::new(Key::B, KeyboardModifiers::NONE, "b", false).typed_char(), Some('b'));
        assert_eq!(KeyPressEvent::key(Key::Enter, KeyboardModifiers::NONE).typed_char(), None);
        assert_eq!(KeyPressEvent::new(Key::Tab, KeyboardModifiers::NONE, "\t", false).typed_char(), None);
    }

    #[test]
    fn test_mouse_move_buttons() {
        let event = MouseMoveEvent::new(Point::ZERO, 1 << MouseButton::Left as u8, KeyboardModifiers::NONE);
        assert!(event.is_button_pressed(MouseButton::Left));
        assert!(!event.is_button_pressed(MouseButton::Right));
    }
}
