//! Standard NVS widgets.
//!
//! - [`RoundedControl`]: a control whose region is a rounded rectangle
//! - [`ThemedButton`]: dark push button with an uppercased label
//! - [`Thumbnail`]: framed image preview with an [`ImageFrame`] child
//! - [`FileTreeView`]: multi-select directory tree

mod file_tree_view;
mod image_frame;
mod rounded_control;
mod themed_button;
mod thumbnail;

pub use file_tree_view::{FileTreeView, UpdateScope};
pub use image_frame::ImageFrame;
pub use rounded_control::RoundedControl;
pub use themed_button::{ButtonInput, ButtonState, ButtonTransition, ThemedButton};
pub use thumbnail::Thumbnail;
