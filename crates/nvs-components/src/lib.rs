//! NVS components - custom-drawn desktop widgets.
//!
//! This is the umbrella crate. It re-exports the public APIs of
//! [`nvs_core`] and (as [`render`]) `nvs_render`, and provides:
//!
//! - [`widget`]: the widget system and the four NVS widgets
//!   ([`RoundedControl`], [`ThemedButton`], [`Thumbnail`], [`FileTreeView`])
//! - [`model`]: the file-tree and selection models behind the tree view
//! - [`resources`]: the bundled font and the per-user [`FontCache`]
//! - [`theme`]: the colour palette, loadable from TOML
//!
//! # Example
//!
//! ```no_run
//! use nvs_components::{FileTreeView, ThemedButton, Thumbnail};
//!
//! fn main() -> Result<(), nvs_components::ComponentError> {
//!     let button = ThemedButton::new("Open")?;
//!     button.clicked.connect(|_| println!("open clicked"));
//!
//!     let mut thumbnail = Thumbnail::new();
//!     thumbnail.load_image("photo.png")?;
//!
//!     let tree = FileTreeView::with_desktop_root()?;
//!     tree.selection_changed.connect(|paths| println!("{} selected", paths.len()));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod resources;
pub mod theme;
pub mod widget;

pub use nvs_core::*;

/// Geometry, painting and text primitives.
pub mod render {
    pub use nvs_render::*;
}

pub use error::{ComponentError, ComponentResult};
pub use model::{
    EntryOrder, FileTree, Highlight, NodeId, NodeKind, SelectionMode, TreeNode, TreeSelection,
};
pub use resources::{EmbeddedFonts, FontCache, FontCacheConfig};
pub use theme::Theme;
pub use widget::widgets::{
    ButtonState, FileTreeView, ImageFrame, RoundedControl, ThemedButton, Thumbnail, UpdateScope,
};
pub use widget::{Widget, WidgetEvent, dispatch_event, paint_widget};
