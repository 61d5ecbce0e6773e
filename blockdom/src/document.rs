use std::collections::{BTreeMap, HashMap};

use crate::element::Element;
use crate::error::DomError;
use crate::focus::FocusState;
use crate::layout::{DomRect, Viewport};

/// Handle to a node in a [`Document`].
///
/// Handles are only meaningful for the document that created them. Passing a
/// handle from another document is a logic error and panics on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    rect: DomRect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory page: an arena of element nodes plus the pieces of browser
/// state a block reads (viewport, root custom properties, focus).
///
/// Removed nodes stay in the arena, detached, so handles never dangle.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    viewport: Viewport,
    custom_properties: HashMap<String, String>,
    focus: FocusState,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Document {
    /// Create an empty document whose root is a `body` element.
    pub fn new(viewport: Viewport) -> Self {
        let body = Node {
            tag: "body".to_string(),
            ..Default::default()
        };
        Self {
            nodes: vec![body],
            root: NodeId(0),
            viewport,
            custom_properties: HashMap::new(),
            focus: FocusState::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Create a detached element, the equivalent of `document.createElement`.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.into(),
            ..Default::default()
        });
        id
    }

    /// Materialize a detached subtree without attaching it.
    pub fn build(&mut self, element: Element) -> NodeId {
        let Element {
            tag,
            classes,
            attrs,
            style,
            text,
            rect,
            children,
        } = element;

        let id = self.create_element(tag);
        {
            let node = self.node_mut(id);
            node.classes = classes;
            node.attrs = attrs;
            node.style = style;
            node.text = text;
            node.rect = rect;
        }
        for child in children {
            let child_id = self.build(child);
            self.node_mut(child_id).parent = Some(id);
            self.node_mut(id).children.push(child_id);
        }
        id
    }

    /// Materialize `element` and append it under `parent`.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.build(element);
        self.node_mut(id).parent = Some(parent);
        self.node_mut(parent).children.push(id);
        id
    }

    // -------------------------------------------------------------------------
    // Tag
    // -------------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    /// Rename a node in place. Identity, children and attributes are kept.
    pub fn set_tag(&mut self, id: NodeId, tag: impl Into<String>) {
        self.node_mut(id).tag = tag.into();
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    pub fn classes(&self, id: NodeId) -> &[String] {
        &self.node(id).classes
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            return false;
        }
        self.node_mut(id).classes.push(class.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        let classes = &mut self.node_mut(id).classes;
        let before = classes.len();
        classes.retain(|c| c != class);
        classes.len() != before
    }

    /// `classList.toggle(class, force)`.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    // -------------------------------------------------------------------------
    // Attributes and inline style
    // -------------------------------------------------------------------------

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.node_mut(id).attrs.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.node_mut(id).attrs.remove(name)
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id).style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        self.node_mut(id)
            .style
            .insert(property.to_string(), value.into());
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) -> Option<String> {
        self.node_mut(id).style.remove(property)
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// The node's own text, excluding descendants.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.node_mut(id).text = Some(text.into());
    }

    pub fn clear_text(&mut self, id: NodeId) {
        self.node_mut(id).text = None;
    }

    /// Own text followed by all descendant text, trimmed and space-joined.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, id: NodeId, parts: &mut Vec<&'a str>) {
        let node = self.node(id);
        if let Some(text) = node.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                parts.push(text);
            }
        }
        for child in &node.children {
            self.collect_text(*child, parts);
        }
    }

    // -------------------------------------------------------------------------
    // Tree structure
    // -------------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// True if `node` is `ancestor` or lives somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True if the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Detach a node (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        if self.focus.focused().is_some_and(|f| self.contains(id, f)) {
            self.focus.blur();
        }
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Move `child` directly before `reference` under `parent`, or to the end
    /// when `reference` is `None`. Inserting a node before itself is a no-op.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        if self.contains(child, parent) {
            return Err(DomError::HierarchyCycle { parent, child });
        }
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, reference });
            }
            if reference == child {
                return Ok(());
            }
        }

        if let Some(old_parent) = self.node_mut(child).parent.take() {
            self.node_mut(old_parent).children.retain(|c| *c != child);
        }

        let position = match reference {
            Some(reference) => self
                .children(parent)
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(self.children(parent).len()),
            None => self.children(parent).len(),
        };
        self.node_mut(parent).children.insert(position, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// All nodes below `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.collect_descendants(id, &mut result);
        result
    }

    fn collect_descendants(&self, id: NodeId, result: &mut Vec<NodeId>) {
        for child in self.children(id) {
            result.push(*child);
            self.collect_descendants(*child, result);
        }
    }

    /// Nearest node, starting with `id` itself and walking up, that matches.
    pub fn closest(
        &self,
        id: NodeId,
        mut pred: impl FnMut(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if pred(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |doc, n| doc.has_class(n, class))
    }

    /// First descendant in document order that matches.
    pub fn find(&self, id: NodeId, mut pred: impl FnMut(&Self, NodeId) -> bool) -> Option<NodeId> {
        self.descendants(id).into_iter().find(|n| pred(self, *n))
    }

    /// `querySelector('.class')` scoped to `id`.
    pub fn query_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.find(id, |doc, n| doc.has_class(n, class))
    }

    /// `querySelectorAll('.class')` scoped to `id`.
    pub fn query_class_all(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Direct children carrying `class`.
    pub fn children_with_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.has_class(*c, class))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Host-reported bounding rect, relative to the viewport.
    pub fn rect(&self, id: NodeId) -> DomRect {
        self.node(id).rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: DomRect) {
        self.node_mut(id).rect = rect;
    }

    /// Shift every node's rect vertically, as a window scroll of `-dy` would.
    pub fn scroll_by(&mut self, dy: f64) {
        for node in &mut self.nodes {
            node.rect = node.rect.offset_y(-dy);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Computed value of a custom property on the document element.
    pub fn custom_property(&self, name: &str) -> Option<&str> {
        self.custom_properties.get(name).map(String::as_str)
    }

    pub fn set_custom_property(&mut self, name: &str, value: impl Into<String>) {
        self.custom_properties.insert(name.to_string(), value.into());
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// `document.activeElement`, `None` meaning the body.
    pub fn active_element(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Focus a connected node. Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_connected(id) {
            log::debug!("[focus] Ignoring focus on detached {}", id);
            return false;
        }
        self.focus.focus(id)
    }

    /// Blur the active element, returning it.
    pub fn blur(&mut self) -> Option<NodeId> {
        self.focus.blur()
    }

    /// Move focus to the candidate after the active one (wrapping).
    pub fn focus_next(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        self.focus.focus_next(candidates)
    }

    /// Move focus to the candidate before the active one (wrapping).
    pub fn focus_prev(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        self.focus.focus_prev(candidates)
    }
}
