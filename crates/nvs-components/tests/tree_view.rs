//! Mouse and keyboard interaction with a populated file tree view.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use nvs_components::render::{Color, DrawCommand, Paint, Point, RecordingRenderer, Rect, Renderer, Size};
use nvs_components::widget::{
    Key, KeyPressEvent, KeyboardModifiers, MouseButton, MousePressEvent, MouseReleaseEvent,
    WidgetEvent,
};
use nvs_components::{
    ComponentError, FileTreeView, Highlight, NodeId, SelectionMode, Theme, Widget,
    dispatch_event, paint_widget,
};
use parking_lot::Mutex;
use tempfile::TempDir;

const ROW: f32 = 20.0;

/// root -> [A -> [x.txt], b.txt]
fn fixture() -> (TempDir, FileTreeView) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("A")).unwrap();
    fs::write(dir.path().join("A").join("x.txt"), b"x").unwrap();
    fs::write(dir.path().join("b.txt"), b"b").unwrap();

    let mut view = FileTreeView::new();
    view.set_geometry(Rect::new(0.0, 0.0, 240.0, 200.0));
    view.set_root_directory(dir.path()).unwrap();
    (dir, view)
}

fn id(view: &FileTreeView, label: &str) -> NodeId {
    view.tree().find_by_label(label).unwrap()
}

fn labels(view: &FileTreeView) -> Vec<String> {
    view.selection()
        .selected()
        .iter()
        .map(|&id| view.tree().node(id).unwrap().label().to_string())
        .collect()
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

/// Press on the label area of visible row `row`.
fn click_row(view: &mut FileTreeView, row: usize, modifiers: KeyboardModifiers) -> bool {
    let pos = Point::new(150.0, row as f32 * ROW + ROW / 2.0);
    let mut event = WidgetEvent::MousePress(MousePressEvent::new(MouseButton::Left, pos, modifiers));
    dispatch_event(view, &mut event).unwrap().was_handled()
}

fn key(view: &mut FileTreeView, key: Key, modifiers: KeyboardModifiers) {
    let mut event = WidgetEvent::KeyPress(KeyPressEvent::key(key, modifiers));
    dispatch_event(view, &mut event).unwrap();
}

fn type_char(view: &mut FileTreeView, c: char) {
    let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(
        Key::Unknown(0),
        KeyboardModifiers::NONE,
        c.to_string(),
        false,
    ));
    dispatch_event(view, &mut event).unwrap();
}

#[test]
fn root_starts_expanded_with_directories_first() {
    let (dir, view) = fixture();
    let visible: Vec<_> = view
        .tree()
        .visible_nodes()
        .into_iter()
        .map(|id| view.tree().node(id).unwrap().label().to_string())
        .collect();

    let root_label = dir.path().file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(visible, vec![root_label, "A".to_string(), "b.txt".to_string()]);
    assert_eq!(view.root_directory(), Some(dir.path()));
}

#[test]
fn shift_click_selects_visible_range() {
    let (_dir, mut view) = fixture();

    assert!(click_row(&mut view, 1, KeyboardModifiers::NONE));
    assert_eq!(labels(&view), vec!["A"]);

    assert!(click_row(&mut view, 2, KeyboardModifiers::SHIFT));
    assert_eq!(sorted(labels(&view)), vec!["A", "b.txt"]);
    assert_eq!(view.primary(), Some(id(&view, "b.txt")));
    assert!(view.selection().check_invariants(view.tree()));
}

#[test]
fn shift_click_upwards_includes_expanded_children() {
    let (_dir, mut view) = fixture();
    view.expand_node(id(&view, "A")).unwrap();

    // Rows: root, A, x.txt, b.txt
    click_row(&mut view, 3, KeyboardModifiers::NONE);
    click_row(&mut view, 1, KeyboardModifiers::SHIFT);
    assert_eq!(sorted(labels(&view)), vec!["A", "b.txt", "x.txt"]);
}

#[test]
fn ctrl_click_toggles() {
    let (_dir, mut view) = fixture();

    click_row(&mut view, 1, KeyboardModifiers::NONE);
    click_row(&mut view, 2, KeyboardModifiers::CTRL);
    assert_eq!(sorted(labels(&view)), vec!["A", "b.txt"]);

    click_row(&mut view, 2, KeyboardModifiers::CTRL);
    assert_eq!(labels(&view), vec!["A"]);
    assert_eq!(view.primary(), Some(id(&view, "A")));

    let b = id(&view, "b.txt");
    assert_eq!(view.tree().node(b).unwrap().highlight(), Highlight::None);
}

#[test]
fn plain_click_replaces_selection() {
    let (_dir, mut view) = fixture();
    click_row(&mut view, 1, KeyboardModifiers::NONE);
    click_row(&mut view, 2, KeyboardModifiers::CTRL);
    click_row(&mut view, 0, KeyboardModifiers::NONE);
    assert_eq!(view.selection().len(), 1);
    assert_eq!(view.primary(), view.tree().first_visible());
}

#[test]
fn release_does_not_change_selection() {
    let (_dir, mut view) = fixture();
    click_row(&mut view, 1, KeyboardModifiers::NONE);
    let before = view.selection().clone();

    let mut release = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
        MouseButton::Left,
        Point::new(150.0, 2.5 * ROW),
        KeyboardModifiers::NONE,
    ));
    dispatch_event(&mut view, &mut release).unwrap();
    assert_eq!(view.selection(), &before);
}

#[test]
fn click_below_last_row_is_ignored() {
    let (_dir, mut view) = fixture();
    assert!(!click_row(&mut view, 7, KeyboardModifiers::NONE));
    assert!(view.selection().is_empty());
}

#[test]
fn expander_click_toggles_without_selecting() {
    let (_dir, mut view) = fixture();
    let a = id(&view, "A");
    let expanded = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
    let sink = expanded.clone();
    view.expanded.connect(move |path| sink.lock().push(path.clone()));

    // A is at depth 1, its expander spans x in [16, 32).
    let mut press = WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Left,
        Point::new(24.0, ROW * 1.5),
        KeyboardModifiers::NONE,
    ));
    dispatch_event(&mut view, &mut press).unwrap();

    assert!(view.tree().node(a).unwrap().is_expanded());
    assert!(view.selection().is_empty());
    assert_eq!(expanded.lock().len(), 1);
    assert!(expanded.lock()[0].ends_with("A"));
}

#[test]
fn selection_changed_reports_paths() {
    let (dir, mut view) = fixture();
    let reports = Arc::new(Mutex::new(Vec::<Vec<PathBuf>>::new()));
    let sink = reports.clone();
    view.selection_changed.connect(move |paths| sink.lock().push(paths.clone()));

    click_row(&mut view, 2, KeyboardModifiers::NONE);
    // Same click again: nothing changes, nothing is reported.
    click_row(&mut view, 2, KeyboardModifiers::NONE);

    let reports = reports.lock();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0], vec![dir.path().join("b.txt")]);
}

#[test]
fn arrow_keys_move_and_extend() {
    let (_dir, mut view) = fixture();

    // No primary yet: the first navigation key lands on the first row.
    key(&mut view, Key::ArrowDown, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), view.tree().first_visible());

    key(&mut view, Key::ArrowDown, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["A"]);

    key(&mut view, Key::ArrowDown, KeyboardModifiers::SHIFT);
    assert_eq!(sorted(labels(&view)), vec!["A", "b.txt"]);

    key(&mut view, Key::ArrowUp, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["A"]);
}

#[test]
fn left_and_right_walk_the_hierarchy() {
    let (_dir, mut view) = fixture();
    let a = id(&view, "A");
    view.select_node(a, SelectionMode::Single).unwrap();

    key(&mut view, Key::ArrowRight, KeyboardModifiers::NONE);
    assert!(view.tree().node(a).unwrap().is_expanded());
    assert_eq!(view.primary(), Some(a));

    key(&mut view, Key::ArrowRight, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(id(&view, "x.txt")));

    // Leaf: Right does nothing, Left goes to the parent.
    key(&mut view, Key::ArrowRight, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(id(&view, "x.txt")));
    key(&mut view, Key::ArrowLeft, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(a));

    key(&mut view, Key::ArrowLeft, KeyboardModifiers::NONE);
    assert!(!view.tree().node(a).unwrap().is_expanded());
    assert_eq!(view.primary(), Some(a));
}

#[test]
fn enter_toggles_and_ctrl_a_selects_visible() {
    let (_dir, mut view) = fixture();
    let a = id(&view, "A");
    view.select_node(a, SelectionMode::Single).unwrap();

    key(&mut view, Key::Enter, KeyboardModifiers::NONE);
    assert!(view.tree().node(a).unwrap().is_expanded());

    key(&mut view, Key::A, KeyboardModifiers::CTRL);
    assert_eq!(view.selection().len(), view.tree().visible_nodes().len());
    assert!(view.selection().check_invariants(view.tree()));
}

#[test]
fn home_end_and_shift_ranges() {
    let (_dir, mut view) = fixture();
    let root = view.tree().roots()[0];
    let a = id(&view, "A");
    let b = id(&view, "b.txt");

    view.select_node(a, SelectionMode::Single).unwrap();
    key(&mut view, Key::End, KeyboardModifiers::SHIFT);
    assert_eq!(view.primary(), Some(b));
    assert_eq!(sorted(labels(&view)), vec!["A", "b.txt"]);

    key(&mut view, Key::Home, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(root));
    assert_eq!(view.selection().len(), 1);
}

#[test]
fn type_ahead_wraps_around() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["beta.txt", "alpha.txt", "bravo.txt"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    let mut view = FileTreeView::new().with_sort_entries(true);
    view.set_geometry(Rect::new(0.0, 0.0, 240.0, 200.0));
    view.set_root_directory(dir.path()).unwrap();

    type_char(&mut view, 'B');
    assert_eq!(labels(&view), vec!["beta.txt"]);
    type_char(&mut view, 'b');
    assert_eq!(labels(&view), vec!["bravo.txt"]);
    type_char(&mut view, 'b');
    assert_eq!(labels(&view), vec!["beta.txt"]);

    // No match keeps the selection.
    type_char(&mut view, 'z');
    assert_eq!(labels(&view), vec!["beta.txt"]);
}

#[test]
fn page_keys_move_by_visible_rows() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..10 {
        fs::write(dir.path().join(format!("f{i}.txt")), b"").unwrap();
    }
    let mut view = FileTreeView::new().with_sort_entries(true);
    view.set_geometry(Rect::new(0.0, 0.0, 240.0, 3.0 * ROW + 5.0));
    view.set_root_directory(dir.path()).unwrap();
    assert_eq!(view.visible_row_count(), 3);

    let root = view.tree().roots()[0];
    view.select_node(root, SelectionMode::Single).unwrap();
    key(&mut view, Key::PageDown, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["f2.txt"]);
    assert!(view.scroll_offset() >= 1);

    key(&mut view, Key::PageDown, KeyboardModifiers::NONE);
    key(&mut view, Key::PageDown, KeyboardModifiers::NONE);
    key(&mut view, Key::PageDown, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["f9.txt"]);

    key(&mut view, Key::PageUp, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["f6.txt"]);
}

#[test]
fn navigation_from_collapsed_primary_starts_at_its_row() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("A")).unwrap();
    fs::write(dir.path().join("A").join("x.txt"), b"").unwrap();
    fs::write(dir.path().join("A").join("y.txt"), b"").unwrap();
    fs::write(dir.path().join("b.txt"), b"").unwrap();
    let mut view = FileTreeView::new().with_sort_entries(true);
    view.set_geometry(Rect::new(0.0, 0.0, 240.0, 200.0));
    view.set_root_directory(dir.path()).unwrap();
    let root = view.tree().roots()[0];
    let a = id(&view, "A");

    // Rows: root, A, x.txt, y.txt, b.txt
    view.expand_node(a).unwrap();
    click_row(&mut view, 2, KeyboardModifiers::NONE);
    view.collapse_node(a).unwrap();
    key(&mut view, Key::ArrowDown, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["b.txt"]);
    assert!(view.tree().is_visible(view.primary().unwrap()));

    view.expand_node(a).unwrap();
    click_row(&mut view, 3, KeyboardModifiers::NONE);
    view.collapse_node(a).unwrap();
    key(&mut view, Key::ArrowUp, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(root));

    view.expand_node(a).unwrap();
    click_row(&mut view, 2, KeyboardModifiers::NONE);
    view.collapse_node(a).unwrap();
    key(&mut view, Key::PageDown, KeyboardModifiers::NONE);
    assert_eq!(labels(&view), vec!["b.txt"]);

    view.expand_node(a).unwrap();
    click_row(&mut view, 3, KeyboardModifiers::NONE);
    view.collapse_node(a).unwrap();
    key(&mut view, Key::PageUp, KeyboardModifiers::NONE);
    assert_eq!(view.primary(), Some(root));
    assert!(view.selection().check_invariants(view.tree()));
}

#[test]
fn repopulating_clears_selection_and_rejects_old_ids() {
    let (dir, mut view) = fixture();
    click_row(&mut view, 1, KeyboardModifiers::NONE);
    let old = view.primary().unwrap();

    let cleared = Arc::new(Mutex::new(None));
    let sink = cleared.clone();
    view.selection_changed.connect(move |paths: &Vec<PathBuf>| *sink.lock() = Some(paths.len()));

    view.set_root_directory(dir.path()).unwrap();
    assert!(view.selection().is_empty());
    assert_eq!(*cleared.lock(), Some(0));
    assert!(matches!(
        view.select_node(old, SelectionMode::Single),
        Err(ComponentError::UnknownNode(_))
    ));
}

#[test]
fn missing_root_is_directory_not_found() {
    let (dir, mut view) = fixture();
    let missing = dir.path().join("does-not-exist");
    match view.set_root_directory(&missing) {
        Err(ComponentError::DirectoryNotFound { path }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(view.tree().is_empty());
}

#[test]
fn selected_rows_are_painted_with_selection_colours() {
    let (_dir, mut view) = fixture();
    click_row(&mut view, 1, KeyboardModifiers::NONE);
    let theme = Theme::default();

    let mut renderer = RecordingRenderer::new();
    renderer.begin_frame(Color::BLACK, Size::new(300.0, 300.0));
    paint_widget(&mut view, &mut renderer);
    renderer.end_frame();

    assert!(renderer.commands().contains(&DrawCommand::FillRect {
        rect: Rect::new(0.0, ROW, 240.0, ROW),
        paint: Paint::Solid(theme.selection_background),
    }));

    let label_paint = renderer.commands().iter().find_map(|c| match c {
        DrawCommand::Text { text, paint, .. } if text == "A" => Some(*paint),
        _ => None,
    });
    assert_eq!(label_paint, Some(Paint::Solid(theme.selection_foreground)));
    assert!(renderer.texts().contains(&"b.txt"));
    assert!(!view.needs_repaint());
}
