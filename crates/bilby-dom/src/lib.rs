//! Reference host document for the Bilby CSS engine.
//!
//! The engine reaches the document only through the
//! [`bilby_css::DocumentHandler`] callback interface; this crate
//! provides the reference implementation used by the test suites and
//! the CLI. It is an arena tree: all nodes live in one vector and refer
//! to each other by [`NodeId`] indices, so traversal needs no borrow
//! gymnastics and handles stay `Copy`.

use std::collections::HashMap;

use bilby_css::DocumentHandler;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Interactive element state for pseudo-class matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementState {
    /// The element is an unvisited link.
    pub link: bool,
    /// The element is a visited link.
    pub visited: bool,
    /// The pointer is over the element.
    pub hover: bool,
    /// The element is being activated.
    pub active: bool,
    /// The element has focus.
    pub focus: bool,
}

/// Element payload: name, identity, attributes, interactive state.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element name, e.g. `div`.
    pub name: String,
    /// The `id` attribute, if any.
    pub id: Option<String>,
    /// The class list.
    pub classes: Vec<String>,
    /// Other attributes, keyed by lowercased name.
    pub attrs: HashMap<String, String>,
    /// Interactive state flags.
    pub state: ElementState,
}

impl ElementData {
    /// Create an element with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    /// Add an attribute (the name is stored lowercased; attribute names
    /// match case-insensitively).
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_owned());
        self
    }

    /// Set the interactive state flags.
    #[must_use]
    pub const fn with_state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    /// Attribute lookup by (case-insensitive) name. `id`, `class`, and
    /// `lang` have dedicated storage but are still reachable here.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let lower = name.to_ascii_lowercase();
        if lower == "id" {
            return self.id.as_deref();
        }
        self.attrs.get(&lower).map(String::as_str)
    }
}

/// A node's payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document itself; only ever at [`NodeId::ROOT`].
    Document,
    /// An element.
    Element(ElementData),
    /// A text run; never matched, present so sibling navigation skips
    /// non-elements like a real host document would.
    Text(String),
}

/// One node of the arena tree.
#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena document tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding just the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                prev_sibling: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append an element under `parent` and return its id.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        self.append(parent, NodeKind::Element(data))
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_owned()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev_sibling = self.nodes[parent.0].children.last().copied();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            prev_sibling,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The element payload of a node, if it is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable element payload.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map_or(&[], |node| node.children.as_slice())
    }

    /// The parent node (document or element).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// The nearest preceding sibling that is an element.
    #[must_use]
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.nodes.get(id.0)?.prev_sibling;
        while let Some(sibling) = cursor {
            if self.element(sibling).is_some() {
                return Some(sibling);
            }
            cursor = self.nodes.get(sibling.0)?.prev_sibling;
        }
        None
    }

    /// The effective language of a node: the nearest `lang` attribute
    /// on the node or its ancestors.
    #[must_use]
    pub fn language(&self, id: NodeId) -> Option<&str> {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if let Some(lang) = self.element(node).and_then(|e| e.attribute("lang")) {
                return Some(lang);
            }
            cursor = self.parent(node);
        }
        None
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHandler for DomTree {
    type Node = NodeId;

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.name.as_str())
    }

    fn node_classes(&self, node: NodeId) -> Vec<&str> {
        self.element(node)
            .map_or_else(Vec::new, |e| e.classes.iter().map(String::as_str).collect())
    }

    fn node_id(&self, node: NodeId) -> Option<&str> {
        self.element(node)?.id.as_deref()
    }

    /// The parent *element*; the document node is not an element, so
    /// the root element reports no parent.
    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        self.element(parent).map(|_| parent)
    }

    fn prev_sibling_element(&self, node: NodeId) -> Option<NodeId> {
        self.prev_element_sibling(node)
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.attribute(name).is_some())
    }

    fn attribute_equals(&self, node: NodeId, name: &str, value: &str) -> bool {
        self.element(node)
            .and_then(|e| e.attribute(name))
            .is_some_and(|v| v == value)
    }

    fn attribute_dash_match(&self, node: NodeId, name: &str, value: &str) -> bool {
        self.element(node)
            .and_then(|e| e.attribute(name))
            .is_some_and(|v| {
                v == value
                    || (v.len() > value.len()
                        && v.as_bytes()[value.len()] == b'-'
                        && v.starts_with(value))
            })
    }

    fn attribute_includes(&self, node: NodeId, name: &str, value: &str) -> bool {
        self.element(node)
            .and_then(|e| e.attribute(name))
            .is_some_and(|v| v.split_ascii_whitespace().any(|word| word == value))
    }

    /// [CSS 2.1 § 5.11.1] "an element that is the first child of some
    /// other element" - element children only, so leading text does not
    /// break the match.
    fn is_first_child(&self, node: NodeId) -> bool {
        let Some(parent) = self.parent_node(node) else {
            return false;
        };
        self.children(parent)
            .iter()
            .find(|&&child| self.element(child).is_some())
            == Some(&node)
    }

    fn is_link(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.state.link)
    }

    fn is_visited(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.state.visited)
    }

    fn is_hover(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.state.hover)
    }

    fn is_active(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.state.active)
    }

    fn is_focus(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.state.focus)
    }

    /// [CSS 2.1 § 5.11.4] "matching... is based solely on the
    /// identifier C being either equal to, or a hyphen-separated prefix
    /// of, the element's language value."
    fn is_lang(&self, node: NodeId, lang: &str) -> bool {
        self.language(node).is_some_and(|value| {
            value.eq_ignore_ascii_case(lang)
                || (value.len() > lang.len()
                    && value.as_bytes()[lang.len()] == b'-'
                    && value[..lang.len()].eq_ignore_ascii_case(lang))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
        let body = tree.append_element(html, ElementData::new("body"));
        let _ = tree.append_text(body, "lead-in");
        let p = tree.append_element(
            body,
            ElementData::new("p").with_id("intro").with_class("note"),
        );
        (tree, html, body, p)
    }

    #[test]
    fn test_parent_node_skips_document() {
        let (tree, html, body, p) = sample_tree();
        assert_eq!(tree.parent_node(p), Some(body));
        assert_eq!(tree.parent_node(body), Some(html));
        // The root element's parent is the document, not an element.
        assert_eq!(tree.parent_node(html), None);
    }

    #[test]
    fn test_first_child_skips_text() {
        let (tree, _, _, p) = sample_tree();
        // A leading text node does not disqualify the first element.
        assert!(tree.is_first_child(p));
    }

    #[test]
    fn test_lang_prefix_match() {
        let mut tree = DomTree::new();
        let html = tree.append_element(
            NodeId::ROOT,
            ElementData::new("html").with_attr("lang", "en-GB"),
        );
        let p = tree.append_element(html, ElementData::new("p"));
        assert!(tree.is_lang(p, "en"));
        assert!(tree.is_lang(p, "en-GB"));
        assert!(!tree.is_lang(p, "e"));
        assert!(!tree.is_lang(p, "fr"));
    }

    #[test]
    fn test_attribute_matching() {
        let mut tree = DomTree::new();
        let input = tree.append_element(
            NodeId::ROOT,
            ElementData::new("input")
                .with_attr("type", "text")
                .with_attr("rel", "copyright copyleft"),
        );
        assert!(tree.has_attribute(input, "TYPE"));
        assert!(tree.attribute_equals(input, "type", "text"));
        assert!(!tree.attribute_equals(input, "type", "TEXT"));
        assert!(tree.attribute_includes(input, "rel", "copyleft"));
        assert!(!tree.attribute_includes(input, "rel", "copy"));
    }
}
