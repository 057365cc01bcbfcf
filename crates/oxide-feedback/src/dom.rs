//! Arena-backed UI tree.
//!
//! A [`Document`] owns every node it creates; nodes are addressed by
//! [`NodeId`]. Ids are generational keys: once a node is deleted its slot
//! may be recycled, but the old id never resolves again, so an id stays a
//! stable identity. Detached nodes stay alive until [`Document::delete`]
//! frees them and can be re-attached, like DOM nodes held by a script.

use std::collections::BTreeMap;
use std::fmt;

use slotmap::{new_key_type, Key, SlotMap};

use crate::error::{FeedbackError, Result};

new_key_type! {
    /// Identity of a node in a [`Document`].
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.data())
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    value: String,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            value: String::new(),
        }
    }

    /// Returns the lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns whether the attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Returns whether the class is present.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns an inline style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Returns the current input value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the `type` of an `<input>`, defaulting to `text`.
    #[must_use]
    pub fn input_type(&self) -> Option<&str> {
        (self.tag == "input").then(|| self.attr("type").unwrap_or("text"))
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A tree of UI nodes rooted at a `<body>` element.
///
/// Every fallible method fails with [`FeedbackError::UnknownNode`] when an
/// id does not resolve (foreign or already deleted) and with
/// [`FeedbackError::NotAnElement`] when an element is required but the id
/// names a text node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            data: NodeData::Element(Element::new("body")),
            parent: None,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of live nodes, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.insert(Node {
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(FeedbackError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(FeedbackError::UnknownNode(id))
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Creates an element and appends it to `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is not a live element.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId> {
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Returns the element behind `id`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or a text node.
    pub fn element(&self, id: NodeId) -> Result<&Element> {
        match &self.node(id)?.data {
            NodeData::Element(el) => Ok(el),
            NodeData::Text(_) => Err(FeedbackError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(el) => Ok(el),
            NodeData::Text(_) => Err(FeedbackError::NotAnElement(id)),
        }
    }

    /// Returns the parent of `id`, if attached.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Returns the children of `id`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Returns whether `id` is reachable from the root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Returns whether `ancestor` contains `id` (or is `id`).
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.nodes.contains_key(id).then_some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(FeedbackError::Cycle(child));
        }
        self.remove(child)?;
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Appends `child` as the last child of `parent`, moving it if needed.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, `parent` is a text node, or `child`
    /// contains `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.adopt(parent, child)?;
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Inserts `child` as the first child of `parent`, moving it if needed.
    ///
    /// # Errors
    ///
    /// Same as [`Document::append_child`].
    pub fn insert_first_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.adopt(parent, child)?;
        self.node_mut(parent)?.children.insert(0, child);
        Ok(())
    }

    /// Detaches `id` from its parent, keeping it alive. Returns whether it
    /// was attached.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn remove(&mut self, id: NodeId) -> Result<bool> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(false);
        };
        self.node_mut(parent)?.children.retain(|c| *c != id);
        Ok(true)
    }

    /// Detaches `id` and frees it together with its subtree.
    ///
    /// Deleting an id that no longer resolves is a no-op. Returns whether
    /// anything was freed.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::RootRemoval`] for the root.
    pub fn delete(&mut self, id: NodeId) -> Result<bool> {
        if id == self.root {
            return Err(FeedbackError::RootRemoval(id));
        }
        if !self.nodes.contains_key(id) {
            return Ok(false);
        }
        self.remove(id)?;
        self.free_subtree(id);
        Ok(true)
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
    }

    /// Adds a class if absent.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let el = self.element_mut(id)?;
        if !el.has_class(class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Removes a class if present.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Sets an attribute.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.element_mut(id)?
            .attrs
            .insert(name.into(), value.into());
        Ok(())
    }

    /// Removes an attribute.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.element_mut(id)?.attrs.remove(name);
        Ok(())
    }

    /// Sets an inline style property.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn set_style(
        &mut self,
        id: NodeId,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.element_mut(id)?
            .style
            .insert(property.into(), value.into());
        Ok(())
    }

    /// Sets the input value.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        self.element_mut(id)?.value = value.into();
        Ok(())
    }

    /// Replaces the content of `id` with `text`.
    ///
    /// A lone text child is rewritten in place; any other content is freed
    /// and replaced by a single text node. Empty text leaves no children.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live element.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.element(id)?;
        let text = text.into();
        if !text.is_empty() {
            if let [only] = self.node(id)?.children.as_slice() {
                let only = *only;
                if let NodeData::Text(existing) = &mut self.node_mut(only)?.data {
                    *existing = text;
                    return Ok(());
                }
            }
        }

        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Frees every child of `id` and its subtree.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn clear_children(&mut self, id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    /// Returns the concatenated text of `id` and its descendants.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.collect_text(id, &mut out)?;
        Ok(out)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) -> Result<()> {
        let node = self.node(id)?;
        if let NodeData::Text(text) = &node.data {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out)?;
        }
        Ok(())
    }

    /// Returns the descendants of `scope` in document order, excluding
    /// `scope` itself.
    ///
    /// # Errors
    ///
    /// Fails if `scope` is unknown.
    pub fn descendants(&self, scope: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope)?.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id)?.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Returns every descendant element of `scope` matching `predicate`.
    ///
    /// # Errors
    ///
    /// Fails if `scope` is unknown.
    pub fn find_all(
        &self,
        scope: NodeId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Result<Vec<NodeId>> {
        Ok(self
            .descendants(scope)?
            .into_iter()
            .filter(|id| self.element(*id).is_ok_and(&predicate))
            .collect())
    }

    /// Returns the first descendant element of `scope` matching `predicate`.
    ///
    /// # Errors
    ///
    /// Fails if `scope` is unknown.
    pub fn find_first(
        &self,
        scope: NodeId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Result<Option<NodeId>> {
        Ok(self.find_all(scope, predicate)?.into_iter().next())
    }
}
