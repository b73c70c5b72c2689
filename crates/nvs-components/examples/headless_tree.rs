//! Populate a file tree view from a directory, drive it with a few synthetic
//! events and print the resulting selection and display list.
//!
//! Run with: cargo run -p nvs-components --example headless_tree -- <dir>

use std::path::PathBuf;

use nvs_components::render::{Color, RecordingRenderer, Rect, Renderer, Size};
use nvs_components::widget::{Key, KeyPressEvent, KeyboardModifiers, WidgetEvent};
use nvs_components::{ComponentResult, FileTreeView, Widget, dispatch_event, paint_widget};

fn main() -> ComponentResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut view = FileTreeView::new().with_sort_entries(true);
    view.set_geometry(Rect::new(0.0, 0.0, 320.0, 240.0));
    let root = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    view.set_root_directory(root)?;

    view.selection_changed.connect(|paths| {
        for path in paths {
            println!("selected: {}", path.display());
        }
        println!("--");
    });

    for (key, modifiers) in [
        (Key::ArrowDown, KeyboardModifiers::NONE),
        (Key::ArrowDown, KeyboardModifiers::NONE),
        (Key::ArrowDown, KeyboardModifiers::SHIFT),
        (Key::ArrowDown, KeyboardModifiers::SHIFT),
    ] {
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::key(key, modifiers));
        dispatch_event(&mut view, &mut event)?;
    }

    let mut renderer = RecordingRenderer::new();
    renderer.begin_frame(Color::BLACK, Size::new(320.0, 240.0));
    paint_widget(&mut view, &mut renderer);
    let stats = renderer.end_frame();

    println!("{} draw calls", stats.draw_calls);
    for text in renderer.texts() {
        println!("row: {text}");
    }
    Ok(())
}
