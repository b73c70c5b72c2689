//! Data models behind the widgets.
//!
//! - [`FileTree`]: an arena-backed directory tree
//! - [`TreeSelection`]: multi-selection with a primary node over a [`FileTree`]

mod file_tree;
mod selection;

pub use file_tree::{EntryOrder, FileTree, Highlight, NodeId, NodeKind, TreeNode};
pub use selection::{SelectionMode, TreeSelection};
