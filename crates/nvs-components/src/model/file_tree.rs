//! A directory tree stored as an arena of nodes.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Parent,
//! child and sibling relations are plain index fields, so the tree has no
//! ownership cycles and can be rebuilt wholesale by clearing the arena.
//!
//! Every [`NodeId`] carries the generation of the tree that issued it. After a
//! rebuild, ids from the previous generation are rejected rather than silently
//! pointing at unrelated nodes.

use std::path::{Path, PathBuf};

use nvs_core::logging::{span_names, targets};

use crate::error::{ComponentError, ComponentResult};

/// Identifier of a node inside a [`FileTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Whether a node stands for a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// Transient visual state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Drawn with the selection colours.
    Selected,
}

/// Order of entries within one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Whatever order the file system enumerates entries in.
    #[default]
    FileSystem,
    /// Sorted by file name.
    ByName,
}

/// A single file-system entry in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    label: String,
    path: PathBuf,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    index_in_parent: usize,
    depth: usize,
    expanded: bool,
    highlight: Highlight,
}

impl TreeNode {
    /// The displayed name (file or directory name).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Full path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Distance from the root level (roots have depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }
}

/// A tree of directory entries.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    generation: u32,
}

impl FileTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a directory.
    pub fn build(root: impl AsRef<Path>, order: EntryOrder) -> ComponentResult<Self> {
        let mut tree = Self::new();
        tree.rebuild(root, order)?;
        Ok(tree)
    }

    /// Discard all nodes and rebuild from `root`.
    ///
    /// The root directory becomes the single root node. Within each directory,
    /// subdirectories come first (each expanded recursively), then files.
    /// Symbolic links are listed as leaves and never followed. On error the
    /// tree is left empty.
    pub fn rebuild(&mut self, root: impl AsRef<Path>, order: EntryOrder) -> ComponentResult<()> {
        let root = root.as_ref();
        let _span = tracing::info_span!(
            target: targets::TREE_VIEW,
            span_names::TREE_POPULATE,
            root = %root.display()
        )
        .entered();
        self.clear();

        if !root.is_dir() {
            return Err(ComponentError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        if let Err(err) = self.add_directory(root, None, order) {
            self.clear();
            return Err(err);
        }

        tracing::debug!(target: targets::TREE_VIEW, nodes = self.nodes.len(), "populated tree");
        Ok(())
    }

    /// Remove every node. Ids issued before the call become unknown.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    fn add_directory(
        &mut self,
        dir: &Path,
        parent: Option<NodeId>,
        order: EntryOrder,
    ) -> ComponentResult<NodeId> {
        let id = self.push_node(dir, NodeKind::Directory, parent);

        let mut directories = Vec::new();
        let mut files = Vec::new();
        let entries = std::fs::read_dir(dir).map_err(|e| ComponentError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ComponentError::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| ComponentError::io(entry.path(), e))?;
            if file_type.is_dir() {
                directories.push(entry.path());
            } else {
                files.push(entry.path());
            }
        }

        if order == EntryOrder::ByName {
            directories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        for directory in directories {
            self.add_directory(&directory, Some(id), order)?;
        }
        for file in files {
            self.push_node(&file, NodeKind::File, Some(id));
        }

        Ok(id)
    }

    fn push_node(&mut self, path: &Path, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId {
            index: self.nodes.len() as u32,
            generation: self.generation,
        };
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let (depth, index_in_parent) = match parent {
            Some(p) => {
                let parent_node = &mut self.nodes[p.index()];
                parent_node.children.push(id);
                (parent_node.depth + 1, parent_node.children.len() - 1)
            }
            None => {
                self.roots.push(id);
                (0, self.roots.len() - 1)
            }
        };

        self.nodes.push(TreeNode {
            label,
            path: path.to_path_buf(),
            kind,
            parent,
            children: Vec::new(),
            index_in_parent,
            depth,
            expanded: false,
            highlight: Highlight::None,
        });
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `id` belongs to this tree's current generation.
    pub fn contains(&self, id: NodeId) -> bool {
        id.generation == self.generation && id.index() < self.nodes.len()
    }

    /// Return `id` unchanged if it is valid, or [`ComponentError::UnknownNode`].
    pub fn validate(&self, id: NodeId) -> ComponentResult<NodeId> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(ComponentError::UnknownNode(id))
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        if self.contains(id) {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    fn node_mut(&mut self, id: NodeId) -> ComponentResult<&mut TreeNode> {
        self.validate(id)?;
        Ok(&mut self.nodes[id.index()])
    }

    /// The top-level nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All node ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(move |index| NodeId {
            index,
            generation: self.generation,
        })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of `id`, or an empty slice for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(|n| n.depth)
    }

    /// Find the node for an exact path.
    pub fn find_by_path(&self, path: impl AsRef<Path>) -> Option<NodeId> {
        let path = path.as_ref();
        self.ids().find(|&id| self.nodes[id.index()].path == path)
    }

    /// Find the first node with the given label, in pre-order.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.ids().find(|&id| self.nodes[id.index()].label == label)
    }

    // =========================================================================
    // Siblings and visible order
    // =========================================================================

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// Position of the node among its siblings.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(|n| n.index_in_parent)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        self.siblings(id).get(index + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).map(|i| self.siblings(id)[i])
    }

    /// Check whether every ancestor of `id` is expanded.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if !self.nodes[ancestor.index()].expanded {
                return false;
            }
            current = self.parent(ancestor);
        }
        true
    }

    /// `id` itself if it is visible, otherwise its closest visible ancestor
    /// (the row a collapsed subtree containing `id` is drawn in).
    pub fn nearest_visible(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.validate(id).ok()?;
        while !self.is_visible(current) {
            current = self.parent(current)?;
        }
        Some(current)
    }

    /// The node drawn directly below `id`.
    pub fn next_visible(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.expanded
            && let Some(&first) = node.children.first()
        {
            return Some(first);
        }

        let mut current = id;
        loop {
            if let Some(next) = self.next_sibling(current) {
                return Some(next);
            }
            current = self.parent(current)?;
        }
    }

    /// The node drawn directly above `id`.
    pub fn prev_visible(&self, id: NodeId) -> Option<NodeId> {
        match self.prev_sibling(id) {
            Some(prev) => Some(self.last_visible_descendant(prev)),
            None => self.parent(id),
        }
    }

    fn last_visible_descendant(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            let node = &self.nodes[current.index()];
            match node.children.last() {
                Some(&last) if node.expanded => current = last,
                _ => return current,
            }
        }
    }

    pub fn first_visible(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    pub fn last_visible(&self) -> Option<NodeId> {
        self.roots
            .last()
            .map(|&root| self.last_visible_descendant(root))
    }

    /// All visible nodes in drawing order.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        let mut current = self.first_visible();
        while let Some(id) = current {
            visible.push(id);
            current = self.next_visible(id);
        }
        visible
    }

    /// Position of `id` among the visible nodes.
    pub fn visible_index(&self, id: NodeId) -> Option<usize> {
        if !self.is_visible(id) {
            return None;
        }
        self.visible_nodes().iter().position(|&v| v == id)
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Expand a node. Returns `true` if its state changed.
    ///
    /// Leaves cannot be expanded.
    pub fn expand(&mut self, id: NodeId) -> ComponentResult<bool> {
        let node = self.node_mut(id)?;
        if node.expanded || node.children.is_empty() {
            return Ok(false);
        }
        node.expanded = true;
        Ok(true)
    }

    /// Collapse a node. Returns `true` if its state changed.
    pub fn collapse(&mut self, id: NodeId) -> ComponentResult<bool> {
        let node = self.node_mut(id)?;
        if !node.expanded {
            return Ok(false);
        }
        node.expanded = false;
        Ok(true)
    }

    /// Flip a node's expansion. Returns `true` if its state changed.
    pub fn toggle(&mut self, id: NodeId) -> ComponentResult<bool> {
        let expanded = self.node_mut(id)?.expanded;
        if expanded {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand every node that has children.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            node.expanded = !node.children.is_empty();
        }
    }

    /// Collapse every node.
    pub fn collapse_all(&mut self) {
        for node in &mut self.nodes {
            node.expanded = false;
        }
    }

    /// Reset every node's highlight to [`Highlight::None`].
    pub fn clear_highlights(&mut self) {
        for node in &mut self.nodes {
            node.highlight = Highlight::None;
        }
    }

    pub(crate) fn set_highlight(&mut self, id: NodeId, highlight: Highlight) {
        if let Ok(node) = self.node_mut(id) {
            node.highlight = highlight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// root/
    ///   A/
    ///     x.txt
    ///   b.txt
    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("A")).unwrap();
        fs::write(dir.path().join("A").join("x.txt"), b"x").unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        dir
    }

    fn labels(tree: &FileTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| tree.node(id).unwrap().label().to_string())
            .collect()
    }

    #[test]
    fn test_build_shape() {
        let dir = sample_dir();
        let tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.roots().len(), 1);
        let root = tree.roots()[0];
        assert_eq!(
            tree.node(root).unwrap().label(),
            dir.path().file_name().unwrap().to_string_lossy()
        );
        assert_eq!(labels(&tree, tree.children(root)), vec!["A", "b.txt"]);

        let a = tree.children(root)[0];
        assert!(tree.node(a).unwrap().is_dir());
        assert_eq!(labels(&tree, tree.children(a)), vec!["x.txt"]);
        assert_eq!(tree.depth(tree.children(a)[0]), Some(2));
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn test_directories_before_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("z-dir")).unwrap();

        let tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let root = tree.roots()[0];
        assert_eq!(labels(&tree, tree.children(root)), vec!["z-dir", "a.txt"]);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let dir = sample_dir();
        let first = FileTree::build(dir.path(), EntryOrder::FileSystem).unwrap();
        let second = FileTree::build(dir.path(), EntryOrder::FileSystem).unwrap();

        let first_labels: Vec<_> = first.ids().map(|id| first.node(id).unwrap().label().to_string()).collect();
        let second_labels: Vec<_> = second.ids().map(|id| second.node(id).unwrap().label().to_string()).collect();
        assert_eq!(first_labels, second_labels);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileTree::build(dir.path().join("gone"), EntryOrder::ByName).unwrap_err();
        assert!(matches!(err, ComponentError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_stale_ids_are_rejected_after_rebuild() {
        let dir = sample_dir();
        let mut tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let old_root = tree.roots()[0];

        tree.rebuild(dir.path(), EntryOrder::ByName).unwrap();
        assert!(!tree.contains(old_root));
        assert!(tree.node(old_root).is_none());
        assert!(matches!(
            tree.expand(old_root),
            Err(ComponentError::UnknownNode(id)) if id == old_root
        ));
    }

    #[test]
    fn test_visible_navigation() {
        let dir = sample_dir();
        let mut tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let root = tree.roots()[0];
        let a = tree.find_by_label("A").unwrap();
        let x = tree.find_by_label("x.txt").unwrap();
        let b = tree.find_by_label("b.txt").unwrap();

        // Everything collapsed: only the root is visible.
        assert_eq!(tree.visible_nodes(), vec![root]);
        assert_eq!(tree.next_visible(root), None);

        tree.expand(root).unwrap();
        assert_eq!(tree.visible_nodes(), vec![root, a, b]);
        assert!(!tree.is_visible(x));

        tree.expand(a).unwrap();
        assert_eq!(tree.visible_nodes(), vec![root, a, x, b]);
        assert_eq!(tree.next_visible(x), Some(b));
        assert_eq!(tree.prev_visible(b), Some(x));
        assert_eq!(tree.prev_visible(a), Some(root));
        assert_eq!(tree.last_visible(), Some(b));
        assert_eq!(tree.visible_index(x), Some(2));
    }

    #[test]
    fn test_nearest_visible_climbs_out_of_collapsed_subtrees() {
        let dir = sample_dir();
        let mut tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let root = tree.roots()[0];
        let a = tree.find_by_label("A").unwrap();
        let x = tree.find_by_label("x.txt").unwrap();
        assert_eq!(tree.nearest_visible(x), Some(root));

        tree.expand(root).unwrap();
        tree.expand(a).unwrap();
        assert_eq!(tree.nearest_visible(x), Some(x));

        tree.collapse(a).unwrap();
        assert!(!tree.is_visible(x));
        assert_eq!(tree.nearest_visible(x), Some(a));
        assert_eq!(tree.nearest_visible(a), Some(a));
    }

    #[test]
    fn test_siblings() {
        let dir = sample_dir();
        let tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let a = tree.find_by_label("A").unwrap();
        let b = tree.find_by_label("b.txt").unwrap();

        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.prev_sibling(a), None);
        assert_eq!(tree.next_sibling(b), None);
    }

    #[test]
    fn test_expand_collapse() {
        let dir = sample_dir();
        let mut tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let a = tree.find_by_label("A").unwrap();
        let b = tree.find_by_label("b.txt").unwrap();

        assert!(tree.expand(a).unwrap());
        assert!(!tree.expand(a).unwrap());
        assert!(!tree.expand(b).unwrap(), "leaves never expand");
        assert!(tree.toggle(a).unwrap());
        assert!(!tree.node(a).unwrap().is_expanded());

        tree.expand_all();
        assert_eq!(tree.visible_nodes().len(), 4);
        tree.collapse_all();
        assert_eq!(tree.visible_nodes().len(), 1);
    }

    #[test]
    fn test_find_by_path() {
        let dir = sample_dir();
        let tree = FileTree::build(dir.path(), EntryOrder::ByName).unwrap();
        let x = tree.find_by_path(dir.path().join("A").join("x.txt")).unwrap();
        assert_eq!(tree.node(x).unwrap().label(), "x.txt");
        assert_eq!(tree.node(x).unwrap().kind(), NodeKind::File);
        assert!(tree.find_by_path(dir.path().join("nope")).is_none());
    }
}
