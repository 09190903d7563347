//! Arena-backed host document.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Removed
//! nodes stay in the arena (detached) until the document is dropped, so ids
//! never dangle.

mod dispatch;
mod html;
mod traverse;

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::element::{Content, Element};
use crate::error::{DomError, Result};
use crate::reaction::Reaction;

pub(crate) use dispatch::ListenerEntry;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Document,
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

pub struct Document {
    nodes: Vec<Node>,
    /// Tags registered as custom elements. Only these produce reactions.
    defined: HashSet<String>,
    reactions: VecDeque<Reaction>,
    listeners: HashMap<NodeId, Vec<ListenerEntry>>,
    /// Event types whose propagation path is cut at the keyed node.
    boundaries: HashMap<NodeId, HashSet<String>>,
    next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("defined", &self.defined)
            .field("pending_reactions", &self.reactions.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            defined: HashSet::new(),
            reactions: VecDeque::new(),
            listeners: HashMap::new(),
            boundaries: HashMap::new(),
            next_listener: 0,
        }
    }

    /// The document node. Everything reachable from here is connected.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Materialize a declarative description as a detached subtree.
    ///
    /// Custom elements inside the subtree get a `Created` reaction once the
    /// whole subtree exists, in tree order.
    pub fn create(&mut self, element: Element) -> NodeId {
        let mut created = Vec::new();
        let id = self.build(element, &mut created);
        for node in created {
            self.reactions.push_back(Reaction::Created(node));
        }
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create(Element::new(tag))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn build(&mut self, element: Element, created: &mut Vec<NodeId>) -> NodeId {
        let Element {
            tag,
            attributes,
            content,
        } = element;
        let tag = tag.to_ascii_lowercase();
        let is_custom = self.defined.contains(&tag);
        let id = self.push(NodeKind::Element { tag, attributes });
        if is_custom {
            created.push(id);
        }

        match content {
            Content::None => {}
            Content::Text(text) => {
                if !text.is_empty() {
                    let text = self.create_text(text);
                    self.link(id, text, None);
                }
            }
            Content::Children(children) => {
                for child in children {
                    let child = self.build(child, created);
                    self.link(id, child, None);
                }
            }
        }
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        let children = &mut self.nodes[parent.0].children;
        match position {
            Some(pos) => children.insert(pos, child),
            None => children.push(child),
        }
        self.nodes[child.0].parent = Some(parent);
    }

    // =========================================================================
    // Insertion and removal
    // =========================================================================

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent` before `reference` (or last).
    ///
    /// A child that already has a parent is moved. Custom elements in the
    /// inserted subtree get `Connected` reactions when `parent` is connected.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        if matches!(parent_node.kind, NodeKind::Text(_))
            || child == self.root()
            || self.contains(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };
        if let Some(r) = reference {
            if self.node(r)?.parent != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
        }

        if let Some(old_parent) = self.node(child)?.parent {
            self.remove_child(old_parent, child)?;
        }

        let position = reference.and_then(|r| {
            self.nodes[parent.0]
                .children
                .iter()
                .position(|c| *c == r)
        });
        self.link(parent, child, position);
        log::trace!("[hostdom] inserted {child} under {parent}");

        if self.is_connected(parent) {
            for node in self.subtree(child) {
                if self.is_custom(node) {
                    self.reactions.push_back(Reaction::Connected(node));
                }
            }
        }
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        let was_connected = self.is_connected(child);

        self.nodes[parent.0].children.retain(|c| *c != child);
        self.nodes[child.0].parent = None;
        log::trace!("[hostdom] removed {child} from {parent}");

        if was_connected {
            for node in self.subtree(child) {
                if self.is_custom(node) {
                    self.reactions.push_back(Reaction::Disconnected(node));
                }
            }
        }
        Ok(())
    }

    /// Detach `node` from its parent. Detached nodes are left untouched.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        match self.node(node)?.parent {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Custom element definitions
    // =========================================================================

    /// Register `tag` as a custom element tag.
    ///
    /// Existing elements with that tag are upgraded: each gets `Created`,
    /// followed by `Connected` if it is in the tree. Returns false if the tag
    /// was already defined.
    pub fn define(&mut self, tag: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        if !self.defined.insert(tag.clone()) {
            return false;
        }

        let mut upgraded = self.subtree(self.root());
        for index in 0..self.nodes.len() {
            let id = NodeId(index);
            if !upgraded.contains(&id) {
                upgraded.push(id);
            }
        }
        for node in upgraded {
            if self.tag_name(node) == Some(tag.as_str()) {
                self.reactions.push_back(Reaction::Created(node));
                if self.is_connected(node) {
                    self.reactions.push_back(Reaction::Connected(node));
                }
            }
        }
        true
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.defined.contains(&tag.to_ascii_lowercase())
    }

    fn is_custom(&self, node: NodeId) -> bool {
        self.tag_name(node).is_some_and(|tag| self.defined.contains(tag))
    }

    pub fn pop_reaction(&mut self) -> Option<Reaction> {
        self.reactions.pop_front()
    }

    pub fn take_reactions(&mut self) -> Vec<Reaction> {
        self.reactions.drain(..).collect()
    }

    pub fn has_pending_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tag_name(node).is_some()
    }

    /// Attributes in insertion order. Empty for non-elements.
    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    fn attributes_mut(&mut self, node: NodeId) -> Result<&mut Vec<(String, String)>> {
        match &mut self
            .nodes
            .get_mut(node.0)
            .ok_or(DomError::UnknownNode(node))?
            .kind
        {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.get_attribute(node, name).is_some()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let custom = self.is_custom(node);
        let attributes = self.attributes_mut(node)?;
        let old = match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value.to_string())),
            None => {
                attributes.push((name.clone(), value.to_string()));
                None
            }
        };

        if custom && old.as_deref() != Some(value) {
            self.reactions.push_back(Reaction::AttributeChanged {
                node,
                name,
                old,
                new: Some(value.to_string()),
            });
        }
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<Option<String>> {
        let name = name.to_ascii_lowercase();
        let custom = self.is_custom(node);
        let attributes = self.attributes_mut(node)?;
        let Some(index) = attributes.iter().position(|(n, _)| *n == name) else {
            return Ok(None);
        };
        let (_, old) = attributes.remove(index);

        if custom {
            self.reactions.push_back(Reaction::AttributeChanged {
                node,
                name,
                old: Some(old.clone()),
                new: None,
            });
        }
        Ok(Some(old))
    }

    /// Add or remove a boolean attribute. Returns whether it is now present.
    pub fn toggle_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool> {
        let present = self.has_attribute(node, name);
        let wanted = force.unwrap_or(!present);
        if wanted && !present {
            self.set_attribute(node, name, "")?;
        } else if !wanted && present {
            self.remove_attribute(node, name)?;
        }
        Ok(wanted)
    }

    pub fn class_list(&self, node: NodeId) -> Vec<&str> {
        self.get_attribute(node, "class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        if !self.is_element(node) {
            return Err(DomError::NotAnElement(node));
        }
        if self.has_class(node, class) {
            return Ok(());
        }
        let mut classes = self.class_list(node).join(" ");
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self.set_attribute(node, "class", &classes)
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        if !self.has_class(node, class) {
            return Ok(());
        }
        let classes: Vec<&str> = self
            .class_list(node)
            .into_iter()
            .filter(|c| *c != class)
            .collect();
        let classes = classes.join(" ");
        self.set_attribute(node, "class", &classes)
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let Some(data) = self.nodes.get(node.0) else {
            return String::new();
        };
        match &data.kind {
            NodeKind::Text(text) => text.clone(),
            _ => data
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    /// Replace all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        if !self.is_element(node) {
            return Err(DomError::NotAnElement(node));
        }
        for child in self.nodes[node.0].children.clone() {
            self.remove_child(node, child)?;
        }
        if !text.is_empty() {
            let text = self.create_text(text);
            self.link(node, text, None);
        }
        Ok(())
    }
}
