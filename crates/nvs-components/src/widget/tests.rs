//! Tests for the widget system.

use std::sync::Arc;

use nvs_render::{Color, DrawCommand, Point, Rect, RecordingRenderer, Renderer, Size};
use parking_lot::Mutex;

use crate::error::{ComponentError, ComponentResult};
use crate::widget::{
    DispatchResult, KeyboardModifiers, LeaveEvent, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, PaintContext, SizeHint, Widget, WidgetBase, WidgetEvent, dispatch_event,
    paint_widget,
};

/// A widget that records the events it receives.
struct Recorder {
    base: WidgetBase,
    log: Arc<Mutex<Vec<&'static str>>>,
    accept: bool,
    fail: bool,
    child: Option<Box<Recorder>>,
}

impl Recorder {
    fn new(rect: Rect, log: Arc<Mutex<Vec<&'static str>>>) -> Self {
        let mut base = WidgetBase::new();
        base.set_geometry(rect);
        Self {
            base,
            log,
            accept: true,
            fail: false,
            child: None,
        }
    }
}

impl Widget for Recorder {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(100.0, 50.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, Color::WHITE);
    }

    fn event(&mut self, event: &mut WidgetEvent) -> ComponentResult<bool> {
        if self.fail {
            return Err(ComponentError::AppDataUnavailable);
        }
        let name = match event {
            WidgetEvent::MousePress(_) => "press",
            WidgetEvent::MouseRelease(_) => "release",
            WidgetEvent::MouseMove(_) => "move",
            WidgetEvent::Enter(_) => "enter",
            WidgetEvent::Leave(_) => "leave",
            WidgetEvent::KeyPress(_) => "key",
            WidgetEvent::Resize(_) => "resize",
        };
        self.log.lock().push(name);
        Ok(self.accept)
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.child.iter().map(|c| c.as_ref() as &dyn Widget).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        self.child
            .iter_mut()
            .map(|c| c.as_mut() as &mut dyn Widget)
            .collect()
    }
}

fn mouse_move(x: f32, y: f32) -> WidgetEvent {
    WidgetEvent::MouseMove(MouseMoveEvent::new(Point::new(x, y), 0, KeyboardModifiers::NONE))
}

fn press(x: f32, y: f32) -> WidgetEvent {
    WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Left,
        Point::new(x, y),
        KeyboardModifiers::NONE,
    ))
}

#[test]
fn test_widget_base_defaults() {
    let base = WidgetBase::new();
    assert!(base.is_visible());
    assert!(base.is_enabled());
    assert!(!base.is_hovered());
    assert!(base.needs_repaint());
    assert_eq!(base.rect(), Rect::default());
}

#[test]
fn test_geometry_changed_signal() {
    let mut base = WidgetBase::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    base.geometry_changed.connect(move |r| s.lock().push(*r));

    base.set_geometry(Rect::new(1.0, 2.0, 3.0, 4.0));
    base.set_geometry(Rect::new(1.0, 2.0, 3.0, 4.0));
    base.resize(10.0, 10.0);

    assert_eq!(
        *seen.lock(),
        vec![Rect::new(1.0, 2.0, 3.0, 4.0), Rect::new(1.0, 2.0, 10.0, 10.0)]
    );
    assert_eq!(base.map_from_parent(Point::new(5.0, 5.0)), Point::new(4.0, 3.0));
}

#[test]
fn test_move_synthesizes_enter_and_leave() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(10.0, 10.0, 50.0, 50.0), log.clone());

    dispatch_event(&mut recorder, &mut mouse_move(20.0, 20.0)).unwrap();
    assert!(recorder.is_hovered());
    dispatch_event(&mut recorder, &mut mouse_move(30.0, 30.0)).unwrap();

    let result = dispatch_event(&mut recorder, &mut mouse_move(100.0, 100.0)).unwrap();
    assert_eq!(result, DispatchResult::OutsideRegion);
    assert!(!recorder.is_hovered());

    assert_eq!(*log.lock(), vec!["enter", "move", "move", "leave"]);
}

#[test]
fn test_press_outside_is_not_delivered() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(0.0, 0.0, 50.0, 50.0), log.clone());

    let result = dispatch_event(&mut recorder, &mut press(60.0, 10.0)).unwrap();
    assert_eq!(result, DispatchResult::OutsideRegion);
    assert!(log.lock().is_empty());
}

#[test]
fn test_release_outside_is_delivered() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(0.0, 0.0, 50.0, 50.0), log.clone());
    let mut release = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
        MouseButton::Left,
        Point::new(80.0, 80.0),
        KeyboardModifiers::NONE,
    ));

    assert!(dispatch_event(&mut recorder, &mut release).unwrap().was_handled());
    assert_eq!(*log.lock(), vec!["release"]);
}

#[test]
fn test_event_position_is_restored() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(10.0, 20.0, 50.0, 50.0), log);
    let mut event = press(15.0, 25.0);

    dispatch_event(&mut recorder, &mut event).unwrap();
    assert_eq!(event.local_pos(), Some(Point::new(15.0, 25.0)));
}

#[test]
fn test_child_gets_first_chance() {
    let parent_log = Arc::new(Mutex::new(Vec::new()));
    let child_log = Arc::new(Mutex::new(Vec::new()));
    let mut parent = Recorder::new(Rect::new(0.0, 0.0, 100.0, 100.0), parent_log.clone());
    parent.child = Some(Box::new(Recorder::new(
        Rect::new(10.0, 10.0, 20.0, 20.0),
        child_log.clone(),
    )));

    let result = dispatch_event(&mut parent, &mut press(15.0, 15.0)).unwrap();
    assert_eq!(result, DispatchResult::Accepted);
    assert_eq!(*child_log.lock(), vec!["press"]);
    assert!(parent_log.lock().is_empty());

    // Outside the child only the parent sees the press.
    dispatch_event(&mut parent, &mut press(50.0, 50.0)).unwrap();
    assert_eq!(*parent_log.lock(), vec!["press"]);
}

#[test]
fn test_unaccepted_child_event_reaches_parent() {
    let parent_log = Arc::new(Mutex::new(Vec::new()));
    let child_log = Arc::new(Mutex::new(Vec::new()));
    let mut parent = Recorder::new(Rect::new(0.0, 0.0, 100.0, 100.0), parent_log.clone());
    let mut child = Recorder::new(Rect::new(10.0, 10.0, 20.0, 20.0), child_log.clone());
    child.accept = false;
    parent.child = Some(Box::new(child));

    dispatch_event(&mut parent, &mut press(15.0, 15.0)).unwrap();
    assert_eq!(*child_log.lock(), vec!["press"]);
    assert_eq!(*parent_log.lock(), vec!["press"]);
}

#[test]
fn test_leaving_parent_leaves_hovered_child() {
    let parent_log = Arc::new(Mutex::new(Vec::new()));
    let child_log = Arc::new(Mutex::new(Vec::new()));
    let mut parent = Recorder::new(Rect::new(0.0, 0.0, 100.0, 100.0), parent_log);
    parent.child = Some(Box::new(Recorder::new(
        Rect::new(10.0, 10.0, 20.0, 20.0),
        child_log.clone(),
    )));

    dispatch_event(&mut parent, &mut mouse_move(15.0, 15.0)).unwrap();
    assert!(parent.child.as_ref().unwrap().is_hovered());

    dispatch_event(&mut parent, &mut WidgetEvent::Leave(LeaveEvent::new())).unwrap();
    assert!(!parent.is_hovered());
    assert!(!parent.child.as_ref().unwrap().is_hovered());
    assert_eq!(child_log.lock().last(), Some(&"leave"));
}

#[test]
fn test_handler_errors_propagate() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(0.0, 0.0, 50.0, 50.0), log);
    recorder.fail = true;

    let err = dispatch_event(&mut recorder, &mut press(5.0, 5.0)).unwrap_err();
    assert!(matches!(err, ComponentError::AppDataUnavailable));
}

#[test]
fn test_disabled_widget_ignores_input() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(0.0, 0.0, 50.0, 50.0), log.clone());
    recorder.base.set_enabled(false);

    assert_eq!(
        dispatch_event(&mut recorder, &mut press(5.0, 5.0)).unwrap(),
        DispatchResult::Ignored
    );
    assert!(log.lock().is_empty());
}

#[test]
fn test_paint_widget_translates_clips_and_recurses() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut parent = Recorder::new(Rect::new(10.0, 20.0, 100.0, 50.0), log.clone());
    parent.child = Some(Box::new(Recorder::new(Rect::new(5.0, 5.0, 10.0, 10.0), log)));

    let mut renderer = RecordingRenderer::new();
    renderer.begin_frame(Color::BLACK, Size::new(200.0, 200.0));
    paint_widget(&mut parent, &mut renderer);

    let fills: Vec<Rect> = renderer
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(
        fills,
        vec![Rect::new(10.0, 20.0, 100.0, 50.0), Rect::new(15.0, 25.0, 10.0, 10.0)]
    );
    assert!(renderer.commands().contains(&DrawCommand::ClipRect(Rect::new(10.0, 20.0, 100.0, 50.0))));
    assert_eq!(renderer.save_depth(), 0);
    assert!(!parent.needs_repaint());
    assert!(!parent.child.as_ref().unwrap().needs_repaint());
}

#[test]
fn test_hidden_widget_is_not_painted() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recorder = Recorder::new(Rect::new(0.0, 0.0, 10.0, 10.0), log);
    recorder.base.set_visible(false);

    let mut renderer = RecordingRenderer::new();
    renderer.begin_frame(Color::BLACK, Size::new(20.0, 20.0));
    paint_widget(&mut recorder, &mut renderer);
    assert!(!renderer.commands().iter().any(DrawCommand::is_draw));
}
