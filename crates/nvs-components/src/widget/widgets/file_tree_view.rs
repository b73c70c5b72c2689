//! A multi-select tree of a directory's contents.
//!
//! [`FileTreeView`] shows a [`FileTree`] one row per visible node and keeps
//! a [`TreeSelection`] in sync with mouse and keyboard input.
//!
//! # Mouse
//!
//! - Plain click: select only the clicked node.
//! - Ctrl+click: toggle the clicked node.
//! - Shift+click: extend from the primary node to the clicked node.
//! - Click on the expander glyph: expand or collapse without touching the
//!   selection.
//!
//! Mouse releases never change the selection.
//!
//! # Keyboard
//!
//! | Key | Action |
//! |-----|--------|
//! | Up / Down | previous / next visible node |
//! | Left | collapse the primary node, or move to its parent |
//! | Right | expand the primary node, or move to its first child |
//! | Home / End | first / last root (with Shift: range to the first / last sibling) |
//! | PageUp / PageDown | move by one page of rows |
//! | Enter | toggle expansion of the primary node |
//! | Ctrl+A | select every visible node |
//! | other printable keys | jump to the next node whose label starts with the typed character |
//!
//! Holding Shift with a navigation key extends the selection instead of
//! replacing it.
//!
//! Every input handler runs inside an [`UpdateScope`] that defers repaint
//! requests until handling finishes, including when handling fails.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use directories::UserDirs;
use nvs_core::Signal;
use nvs_core::logging::targets;
use nvs_render::{Font, Point, Rect, Renderer, Stroke};

use crate::error::{ComponentError, ComponentResult};
use crate::model::{EntryOrder, FileTree, Highlight, NodeId, SelectionMode, TreeSelection};
use crate::theme::Theme;
use crate::widget::{
    Key, KeyPressEvent, KeyboardModifiers, MouseButton, MousePressEvent, PaintContext, SizeHint,
    Widget, WidgetBase, WidgetEvent,
};

/// A widget listing a directory tree with multi-selection.
pub struct FileTreeView {
    base: WidgetBase,
    tree: FileTree,
    selection: TreeSelection,
    root: Option<PathBuf>,
    theme: Theme,
    font: Font,
    row_height: f32,
    indentation: f32,
    sort_entries: bool,
    expand_root: bool,
    /// Index of the first visible row drawn at the top.
    scroll_offset: usize,
    update_depth: usize,
    repaint_pending: bool,

    /// Emitted with the selected paths whenever the selection changes.
    pub selection_changed: Signal<Vec<PathBuf>>,
    /// Emitted with the path of a node that was expanded.
    pub expanded: Signal<PathBuf>,
    /// Emitted with the path of a node that was collapsed.
    pub collapsed: Signal<PathBuf>,
}

impl Default for FileTreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTreeView {
    /// Create an empty view. Call
    /// [`set_root_directory`](Self::set_root_directory) to populate it.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            tree: FileTree::new(),
            selection: TreeSelection::new(),
            root: None,
            theme: Theme::default(),
            font: Font::new("DejaVu Sans", 12.0),
            row_height: 20.0,
            indentation: 16.0,
            sort_entries: false,
            expand_root: true,
            scroll_offset: 0,
            update_depth: 0,
            repaint_pending: false,
            selection_changed: Signal::new(),
            expanded: Signal::new(),
            collapsed: Signal::new(),
        }
    }

    /// Create a view rooted at the current user's desktop directory.
    pub fn with_desktop_root() -> ComponentResult<Self> {
        let desktop = UserDirs::new()
            .and_then(|dirs| dirs.desktop_dir().map(Path::to_path_buf))
            .ok_or_else(|| ComponentError::DirectoryNotFound {
                path: PathBuf::from("Desktop"),
            })?;
        let mut view = Self::new();
        view.set_root_directory(desktop)?;
        Ok(view)
    }

    /// Sort entries by name instead of enumeration order (builder form).
    pub fn with_sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Expand the root after populating (builder form).
    pub fn with_expand_root(mut self, expand: bool) -> Self {
        self.expand_root = expand;
        self
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Clear all nodes and the selection, then rebuild from `path`.
    ///
    /// Fails with [`ComponentError::DirectoryNotFound`] if `path` is not an
    /// existing directory. On failure the view is left empty.
    pub fn set_root_directory(&mut self, path: impl Into<PathBuf>) -> ComponentResult<()> {
        let path = path.into();
        let had_selection = !self.selection.is_empty();
        let order = if self.sort_entries {
            EntryOrder::ByName
        } else {
            EntryOrder::FileSystem
        };

        let result = {
            let mut scope = UpdateScope::begin(self);
            scope.selection.forget();
            scope.scroll_offset = 0;
            scope.root = None;
            scope.request_repaint();
            scope.tree.rebuild(&path, order).and_then(|()| {
                if scope.expand_root
                    && let Some(&root) = scope.tree.roots().first()
                {
                    scope.tree.expand(root)?;
                }
                scope.root = Some(path.clone());
                Ok(())
            })
        };

        tracing::debug!(
            target: targets::TREE_VIEW,
            root = %path.display(),
            nodes = self.tree.len(),
            ok = result.is_ok(),
            "root directory set"
        );

        if had_selection {
            self.emit_selection_changed();
        }
        result
    }

    /// Rebuild from the current root directory.
    pub fn refresh(&mut self) -> ComponentResult<()> {
        match self.root.clone() {
            Some(root) => self.set_root_directory(root),
            None => Ok(()),
        }
    }

    pub fn root_directory(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn selection(&self) -> &TreeSelection {
        &self.selection
    }

    /// The primary (anchor) node.
    pub fn primary(&self) -> Option<NodeId> {
        self.selection.primary()
    }

    /// Paths of the selected nodes, in selection order.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.selection
            .selected()
            .iter()
            .filter_map(|&id| self.tree.node(id))
            .map(|node| node.path().to_path_buf())
            .collect()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.request_repaint();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.request_repaint();
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn set_row_height(&mut self, height: f32) {
        self.row_height = height.max(1.0);
        self.clamp_scroll();
        self.request_repaint();
    }

    /// Horizontal offset per tree level.
    pub fn indentation(&self) -> f32 {
        self.indentation
    }

    pub fn set_indentation(&mut self, indentation: f32) {
        self.indentation = indentation.max(0.0);
        self.request_repaint();
    }

    pub fn sort_entries(&self) -> bool {
        self.sort_entries
    }

    /// Takes effect on the next population.
    pub fn set_sort_entries(&mut self, sort: bool) {
        self.sort_entries = sort;
    }

    pub fn expand_root(&self) -> bool {
        self.expand_root
    }

    /// Takes effect on the next population.
    pub fn set_expand_root(&mut self, expand: bool) {
        self.expand_root = expand;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Number of whole rows that fit in the widget (at least one).
    pub fn visible_row_count(&self) -> usize {
        ((self.base.size().height / self.row_height).floor() as usize).max(1)
    }

    /// Whether an [`UpdateScope`] is currently open.
    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rectangle of a node's row in local coordinates, if it is visible.
    pub fn row_rect(&self, id: NodeId) -> Option<Rect> {
        let index = self.tree.visible_index(id)?;
        let row = index.checked_sub(self.scroll_offset)?;
        Some(Rect::new(
            0.0,
            row as f32 * self.row_height,
            self.base.size().width,
            self.row_height,
        ))
    }

    /// Rectangle of a node's expander glyph in local coordinates.
    pub fn expander_rect(&self, id: NodeId) -> Option<Rect> {
        let row = self.row_rect(id)?;
        let depth = self.tree.depth(id)? as f32;
        Some(Rect::new(
            depth * self.indentation,
            row.top(),
            self.indentation,
            self.row_height,
        ))
    }

    /// The node drawn at a local position.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        if point.y < 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let row = (point.y / self.row_height).floor() as usize;
        let visible = self.tree.visible_nodes();
        visible.get(self.scroll_offset + row).copied()
    }

    /// Scroll so that `id` is within the visible rows.
    pub fn scroll_to(&mut self, id: NodeId) {
        let Some(index) = self.tree.visible_index(id) else {
            return;
        };
        let rows = self.visible_row_count();
        let previous = self.scroll_offset;
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + rows {
            self.scroll_offset = index + 1 - rows;
        }
        if self.scroll_offset != previous {
            self.request_repaint();
        }
    }

    fn clamp_scroll(&mut self) {
        let count = self.tree.visible_nodes().len();
        let max = count.saturating_sub(self.visible_row_count());
        self.scroll_offset = self.scroll_offset.min(max);
    }

    // =========================================================================
    // Programmatic selection and expansion
    // =========================================================================

    /// Change the selection as a click with the given mode would.
    pub fn select_node(&mut self, id: NodeId, mode: SelectionMode) -> ComponentResult<()> {
        self.with_update(|view| view.select(id, mode))
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.with_update(|view| {
            view.selection.clear(&mut view.tree);
            view.request_repaint();
        });
    }

    /// Select every visible node.
    pub fn select_all(&mut self) {
        self.with_update(|view| {
            view.selection.select_all_visible(&mut view.tree);
            view.request_repaint();
        });
    }

    pub fn expand_node(&mut self, id: NodeId) -> ComponentResult<bool> {
        self.with_update(|view| view.set_expanded(id, true))
    }

    pub fn collapse_node(&mut self, id: NodeId) -> ComponentResult<bool> {
        self.with_update(|view| view.set_expanded(id, false))
    }

    pub fn toggle_node(&mut self, id: NodeId) -> ComponentResult<bool> {
        self.with_update(|view| view.toggle_expanded(id))
    }

    pub fn expand_all(&mut self) {
        self.tree.expand_all();
        self.request_repaint();
    }

    pub fn collapse_all(&mut self) {
        self.tree.collapse_all();
        self.clamp_scroll();
        self.request_repaint();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn request_repaint(&mut self) {
        if self.update_depth > 0 {
            self.repaint_pending = true;
        } else {
            self.base.update();
        }
    }

    /// Run `f` inside an update scope and report selection changes.
    fn with_update<T>(&mut self, f: impl FnOnce(&mut FileTreeView) -> T) -> T {
        let before = self.selection.clone();
        let result = {
            let mut scope = UpdateScope::begin(self);
            f(&mut *scope)
        };
        if self.selection.selected() != before.selected() {
            self.emit_selection_changed();
        }
        result
    }

    fn emit_selection_changed(&self) {
        let paths = self.selected_paths();
        tracing::trace!(target: targets::TREE_VIEW, selected = paths.len(), "selection changed");
        self.selection_changed.emit(paths);
    }

    fn select(&mut self, id: NodeId, mode: SelectionMode) -> ComponentResult<()> {
        self.selection.apply(&mut self.tree, id, mode)?;
        self.scroll_to(id);
        self.request_repaint();
        Ok(())
    }

    /// Move the primary node to `id`, extending the selection with Shift.
    fn navigate(&mut self, id: NodeId, modifiers: KeyboardModifiers) -> ComponentResult<()> {
        let mode = if modifiers.shift {
            SelectionMode::Range
        } else {
            SelectionMode::Single
        };
        self.select(id, mode)
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) -> ComponentResult<bool> {
        let changed = if expanded {
            self.tree.expand(id)?
        } else {
            self.tree.collapse(id)?
        };
        if changed {
            let path = self
                .tree
                .node(id)
                .map(|n| n.path().to_path_buf())
                .unwrap_or_default();
            if expanded {
                self.expanded.emit(path);
            } else {
                self.clamp_scroll();
                self.collapsed.emit(path);
            }
            self.request_repaint();
        }
        Ok(changed)
    }

    fn toggle_expanded(&mut self, id: NodeId) -> ComponentResult<bool> {
        let expanded = self
            .tree
            .node(id)
            .ok_or(ComponentError::UnknownNode(id))?
            .is_expanded();
        self.set_expanded(id, !expanded)
    }

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> ComponentResult<bool> {
        if event.button != MouseButton::Left {
            return Ok(false);
        }
        let Some(id) = self.node_at(event.local_pos) else {
            return Ok(false);
        };

        let on_expander = self
            .tree
            .node(id)
            .is_some_and(|n| n.has_children())
            && self
                .expander_rect(id)
                .is_some_and(|r| r.contains(event.local_pos));
        if on_expander {
            self.toggle_expanded(id)?;
            return Ok(true);
        }

        let mode = SelectionMode::from_modifiers(event.modifiers.shift, event.modifiers.control);
        self.select(id, mode)?;
        Ok(true)
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> ComponentResult<bool> {
        let Some(first) = self.tree.first_visible() else {
            return Ok(false);
        };
        let modifiers = event.modifiers;

        if event.key == Key::A && modifiers.control {
            self.selection.select_all_visible(&mut self.tree);
            self.request_repaint();
            return Ok(true);
        }

        let Some(primary) = self.selection.primary() else {
            if event.key.is_navigation() {
                self.navigate(first, modifiers)?;
                return Ok(true);
            }
            return self.type_ahead(event);
        };

        // Row-based moves start from the row the primary node is drawn in,
        // which is an ancestor when the primary sits in a collapsed subtree.
        let current = self.tree.nearest_visible(primary).unwrap_or(primary);

        match event.key {
            Key::ArrowUp => {
                if let Some(prev) = self.tree.prev_visible(current) {
                    self.navigate(prev, modifiers)?;
                }
            }
            Key::ArrowDown => {
                if let Some(next) = self.tree.next_visible(current) {
                    self.navigate(next, modifiers)?;
                }
            }
            Key::ArrowLeft => {
                let node = self.tree.node(primary).ok_or(ComponentError::UnknownNode(primary))?;
                if node.is_expanded() && node.has_children() {
                    self.set_expanded(primary, false)?;
                } else if let Some(parent) = node.parent() {
                    self.navigate(parent, modifiers)?;
                }
            }
            Key::ArrowRight => {
                let node = self.tree.node(primary).ok_or(ComponentError::UnknownNode(primary))?;
                if node.has_children() {
                    if node.is_expanded() {
                        let child = node.children()[0];
                        self.navigate(child, modifiers)?;
                    } else {
                        self.set_expanded(primary, true)?;
                    }
                }
            }
            Key::Home | Key::End => {
                let siblings = if modifiers.shift {
                    match self.tree.parent(primary) {
                        Some(parent) => self.tree.children(parent),
                        None => self.tree.roots(),
                    }
                } else {
                    self.tree.roots()
                };
                let target = if event.key == Key::Home {
                    siblings.first()
                } else {
                    siblings.last()
                };
                if let Some(&target) = target {
                    self.navigate(target, modifiers)?;
                }
            }
            Key::PageUp | Key::PageDown => {
                let visible = self.tree.visible_nodes();
                let row = visible.iter().position(|&v| v == current).unwrap_or(0);
                let page = self.visible_row_count();
                let index = if event.key == Key::PageUp {
                    row.saturating_sub(page)
                } else {
                    (row + page).min(visible.len() - 1)
                };
                self.navigate(visible[index], modifiers)?;
            }
            Key::Enter => {
                self.toggle_expanded(primary)?;
            }
            _ => return self.type_ahead(event),
        }
        Ok(true)
    }

    /// Select the next visible node whose label starts with the typed
    /// character, searching from just after the primary node and wrapping.
    fn type_ahead(&mut self, event: &KeyPressEvent) -> ComponentResult<bool> {
        if event.modifiers.control || event.modifiers.alt {
            return Ok(false);
        }
        let Some(typed) = event.typed_char() else {
            return Ok(false);
        };
        let needle: String = typed.to_lowercase().collect();

        let visible = self.tree.visible_nodes();
        let start = self
            .selection
            .primary()
            .and_then(|p| visible.iter().position(|&v| v == p))
            .map_or(0, |i| i + 1);

        let found = visible[start..]
            .iter()
            .chain(&visible[..start])
            .copied()
            .find(|&id| {
                self.tree
                    .node(id)
                    .is_some_and(|n| n.label().to_lowercase().starts_with(&needle))
            });

        match found {
            Some(id) => {
                self.select(id, SelectionMode::Single)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn paint_expander(&self, ctx: &mut PaintContext<'_>, rect: Rect, expanded: bool, color: nvs_render::Color) {
        let center = rect.center();
        let size = 4.0;
        let stroke = Stroke::new(color, 1.5);

        if expanded {
            let left = Point::new(center.x - size, center.y - size / 2.0);
            let bottom = Point::new(center.x, center.y + size / 2.0);
            let right = Point::new(center.x + size, center.y - size / 2.0);
            ctx.renderer().draw_line(left, bottom, &stroke);
            ctx.renderer().draw_line(bottom, right, &stroke);
        } else {
            let top = Point::new(center.x - size / 2.0, center.y - size);
            let right = Point::new(center.x + size / 2.0, center.y);
            let bottom = Point::new(center.x - size / 2.0, center.y + size);
            ctx.renderer().draw_line(top, right, &stroke);
            ctx.renderer().draw_line(right, bottom, &stroke);
        }
    }
}

impl Widget for FileTreeView {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(240.0, 320.0)
            .with_minimum(nvs_render::Size::new(self.indentation * 4.0, self.row_height))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let bounds = ctx.rect();
        ctx.renderer().fill_rect(bounds, self.theme.tree_background);

        let visible = self.tree.visible_nodes();
        let rows = self.visible_row_count() + 1;
        for (row, &id) in visible.iter().skip(self.scroll_offset).take(rows).enumerate() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            let y = row as f32 * self.row_height;
            let row_rect = Rect::new(0.0, y, bounds.width(), self.row_height);
            let indent = node.depth() as f32 * self.indentation;

            let selected = node.highlight() == Highlight::Selected;
            let foreground = if selected {
                ctx.renderer()
                    .fill_rect(row_rect, self.theme.selection_background);
                self.theme.selection_foreground
            } else {
                self.theme.tree_foreground
            };

            if node.has_children() {
                let glyph = Rect::new(indent, y, self.indentation, self.row_height);
                self.paint_expander(ctx, glyph, node.is_expanded(), foreground.lighten(0.35));
            }

            let text_y = y + (self.row_height - self.font.size()) / 2.0;
            ctx.renderer().draw_text(
                node.label(),
                Point::new(indent + self.indentation, text_y),
                &self.font,
                foreground,
            );
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> ComponentResult<bool> {
        match event {
            WidgetEvent::MousePress(e) => {
                let e = *e;
                self.with_update(|view| view.handle_mouse_press(&e))
            }
            WidgetEvent::KeyPress(e) => {
                let e = e.clone();
                self.with_update(|view| view.handle_key_press(&e))
            }
            WidgetEvent::Resize(_) => {
                self.clamp_scroll();
                self.request_repaint();
                Ok(true)
            }
            // Selection is decided on press; releases are ignored.
            _ => Ok(false),
        }
    }
}

/// Deferred-repaint scope over a [`FileTreeView`].
///
/// While a scope is open, repaint requests are collected instead of issued.
/// Dropping the scope ends it and issues one repaint if any was requested.
/// Because the end happens in `Drop`, it also runs when the code inside the
/// scope returns early with an error. Scopes nest.
pub struct UpdateScope<'a> {
    view: &'a mut FileTreeView,
}

impl<'a> UpdateScope<'a> {
    /// Begin deferring repaints on `view`.
    pub fn begin(view: &'a mut FileTreeView) -> Self {
        view.update_depth += 1;
        Self { view }
    }
}

impl Deref for UpdateScope<'_> {
    type Target = FileTreeView;

    fn deref(&self) -> &FileTreeView {
        self.view
    }
}

impl DerefMut for UpdateScope<'_> {
    fn deref_mut(&mut self) -> &mut FileTreeView {
        self.view
    }
}

impl Drop for UpdateScope<'_> {
    fn drop(&mut self) {
        self.view.update_depth = self.view.update_depth.saturating_sub(1);
        if self.view.update_depth == 0 && self.view.repaint_pending {
            self.view.repaint_pending = false;
            self.view.base.update();
        }
    }
}
