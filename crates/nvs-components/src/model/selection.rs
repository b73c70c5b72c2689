//! Multi-selection over a [`FileTree`].
//!
//! [`TreeSelection`] owns the selection set and the primary node. Every
//! operation also updates each affected node's [`Highlight`], so that after any
//! call exactly the selected nodes are highlighted and the primary node (if
//! any) is a member of the set.

use std::cmp::Ordering;

use super::file_tree::{FileTree, Highlight, NodeId};
use crate::error::ComponentResult;

/// How a click or navigation step changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Replace the selection with the target.
    #[default]
    Single,
    /// Add or remove the target.
    Toggle,
    /// Extend from the primary node to the target.
    Range,
}

impl SelectionMode {
    /// Pick the mode for the held modifier keys. Shift wins over Control.
    pub fn from_modifiers(shift: bool, control: bool) -> Self {
        if shift {
            SelectionMode::Range
        } else if control {
            SelectionMode::Toggle
        } else {
            SelectionMode::Single
        }
    }
}

/// The set of selected nodes plus the primary (anchor) node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSelection {
    selected: Vec<NodeId>,
    primary: Option<NodeId>,
}

impl TreeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected nodes, in the order they were added.
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// The anchor for keyboard navigation and range selection.
    pub fn primary(&self) -> Option<NodeId> {
        self.primary
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Apply `mode` to `target`.
    pub fn apply(&mut self, tree: &mut FileTree, target: NodeId, mode: SelectionMode) -> ComponentResult<()> {
        match mode {
            SelectionMode::Single => self.select_single(tree, target),
            SelectionMode::Toggle => self.toggle(tree, target),
            SelectionMode::Range => self.select_range(tree, target),
        }
    }

    /// Make `target` the only selected node and the primary node.
    pub fn select_single(&mut self, tree: &mut FileTree, target: NodeId) -> ComponentResult<()> {
        tree.validate(target)?;
        self.adopt(tree);
        self.clear(tree);
        self.add(tree, target);
        self.primary = Some(target);
        Ok(())
    }

    /// Add `target` if it is not selected, remove it otherwise.
    ///
    /// An added node becomes primary. Removing the primary node hands the
    /// role to the most recently added remaining node.
    pub fn toggle(&mut self, tree: &mut FileTree, target: NodeId) -> ComponentResult<()> {
        tree.validate(target)?;
        self.adopt(tree);
        if let Some(pos) = self.selected.iter().position(|&id| id == target) {
            self.selected.remove(pos);
            tree.set_highlight(target, Highlight::None);
            if self.primary == Some(target) {
                self.primary = self.selected.last().copied();
            }
        } else {
            self.add(tree, target);
            self.primary = Some(target);
        }
        Ok(())
    }

    /// Select every visible node between the primary node and `target`,
    /// inclusive, and make `target` primary.
    ///
    /// The run is added to the existing selection. Without a usable primary
    /// node (none set, or either end hidden inside a collapsed subtree) this
    /// behaves like [`select_single`](Self::select_single).
    pub fn select_range(&mut self, tree: &mut FileTree, target: NodeId) -> ComponentResult<()> {
        tree.validate(target)?;
        self.adopt(tree);
        let anchor = match self.primary {
            Some(primary) if tree.is_visible(primary) && tree.is_visible(target) => primary,
            _ => return self.select_single(tree, target),
        };

        let forward = visible_order(tree, anchor, target) != Ordering::Greater;
        let mut current = Some(anchor);
        while let Some(id) = current {
            self.add(tree, id);
            if id == target {
                break;
            }
            current = if forward {
                tree.next_visible(id)
            } else {
                tree.prev_visible(id)
            };
        }

        self.primary = Some(target);
        Ok(())
    }

    /// Select every visible node. The primary node is kept if set, otherwise
    /// the first visible node becomes primary.
    pub fn select_all_visible(&mut self, tree: &mut FileTree) {
        self.adopt(tree);
        for id in tree.visible_nodes() {
            self.add(tree, id);
        }
        if self.primary.is_none() {
            self.primary = tree.first_visible();
        }
    }

    /// Deselect everything and clear the primary node.
    pub fn clear(&mut self, tree: &mut FileTree) {
        self.adopt(tree);
        for id in self.selected.drain(..) {
            tree.set_highlight(id, Highlight::None);
        }
        self.primary = None;
    }

    /// An empty selection owns no highlights, so any left on the tree (for
    /// example by another selection over the same tree) are stale.
    fn adopt(&self, tree: &mut FileTree) {
        if self.selected.is_empty() {
            tree.clear_highlights();
        }
    }

    /// Drop all state without touching the tree, for use when the tree
    /// itself is being discarded.
    pub(crate) fn forget(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Check that exactly the selected nodes are highlighted, that there are
    /// no duplicates, and that the primary node is selected.
    pub fn check_invariants(&self, tree: &FileTree) -> bool {
        let primary_ok = self.primary.is_none_or(|p| self.contains(p));
        let unique = self
            .selected
            .iter()
            .enumerate()
            .all(|(i, id)| !self.selected[..i].contains(id));
        let highlights_ok = tree.ids().all(|id| {
            let highlighted = tree
                .node(id)
                .is_some_and(|n| n.highlight() == Highlight::Selected);
            highlighted == self.contains(id)
        });
        let members_ok = self.selected.iter().all(|&id| tree.contains(id));

        primary_ok && unique && highlights_ok && members_ok
    }

    fn add(&mut self, tree: &mut FileTree, id: NodeId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
        tree.set_highlight(id, Highlight::Selected);
    }
}

/// Compare two nodes by their position in drawing order.
///
/// Nodes under the same parent compare by sibling index. Otherwise the deeper
/// node is lifted to the shallower depth and both are lifted together until
/// they share a parent. If lifting reaches the other node, that node is an
/// ancestor and comes first.
fn visible_order(tree: &FileTree, a: NodeId, b: NodeId) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let depth_a = tree.depth(a).unwrap_or(0);
    let depth_b = tree.depth(b).unwrap_or(0);
    let mut x = a;
    let mut y = b;
    for _ in depth_b..depth_a {
        x = tree.parent(x).unwrap_or(x);
    }
    for _ in depth_a..depth_b {
        y = tree.parent(y).unwrap_or(y);
    }

    if x == y {
        // One node is an ancestor of the other.
        return depth_a.cmp(&depth_b);
    }

    while tree.parent(x) != tree.parent(y) {
        match (tree.parent(x), tree.parent(y)) {
            (Some(px), Some(py)) => {
                x = px;
                y = py;
            }
            _ => break,
        }
    }

    tree.index_in_parent(x).cmp(&tree.index_in_parent(y))
}
