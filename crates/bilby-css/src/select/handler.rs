//! The host document interface.
//!
//! The engine never walks a document tree itself: the host answers
//! every question through this trait, keyed by an opaque copyable node
//! handle. This keeps the engine independent of any particular DOM
//! representation - an arena tree, a pointer tree, or a synthetic
//! single-element document all work.

use bilby_common::Result;

use crate::computed::default_compute_font_size;
use crate::style::values::{FontSizeValue, Length};
use crate::style::{Declaration, PropertyId};

/// Callbacks the host document provides to selection and composition.
///
/// The navigation defaults are implemented in terms of the primitive
/// accessors; hosts with indexed lookups can override them.
pub trait DocumentHandler {
    /// The host's node handle.
    type Node: Copy + PartialEq;

    /// The element name, or `None` for non-element nodes.
    fn node_name(&self, node: Self::Node) -> Option<&str>;

    /// The element's classes.
    fn node_classes(&self, node: Self::Node) -> Vec<&str>;

    /// The element's ID, if any.
    fn node_id(&self, node: Self::Node) -> Option<&str>;

    /// The parent element.
    fn parent_node(&self, node: Self::Node) -> Option<Self::Node>;

    /// The nearest preceding sibling that is an element.
    fn prev_sibling_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// The nearest ancestor element with the given name
    /// (ASCII case-insensitive).
    fn named_ancestor(&self, node: Self::Node, name: &str) -> Option<Self::Node> {
        let mut cursor = self.parent_node(node);
        while let Some(ancestor) = cursor {
            if self
                .node_name(ancestor)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
            {
                return Some(ancestor);
            }
            cursor = self.parent_node(ancestor);
        }
        None
    }

    /// The parent element, only when it has the given name.
    fn named_parent(&self, node: Self::Node, name: &str) -> Option<Self::Node> {
        self.parent_node(node).filter(|&parent| {
            self.node_name(parent)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// The immediately preceding element sibling, only when it has the
    /// given name.
    fn named_prev_sibling(&self, node: Self::Node, name: &str) -> Option<Self::Node> {
        self.prev_sibling_element(node).filter(|&sibling| {
            self.node_name(sibling)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// Attribute presence (names are ASCII case-insensitive).
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool;

    /// `[att=val]`: exact, case-sensitive value equality.
    fn attribute_equals(&self, node: Self::Node, name: &str, value: &str) -> bool;

    /// `[att|=val]`: the value is `val` or starts with `val-`.
    fn attribute_dash_match(&self, node: Self::Node, name: &str, value: &str) -> bool;

    /// `[att~=val]`: the whitespace-separated value list contains `val`.
    fn attribute_includes(&self, node: Self::Node, name: &str, value: &str) -> bool;

    /// `:first-child`.
    fn is_first_child(&self, node: Self::Node) -> bool;

    /// `:link` - an unvisited link.
    fn is_link(&self, node: Self::Node) -> bool {
        let _ = node;
        false
    }

    /// `:visited`.
    fn is_visited(&self, node: Self::Node) -> bool {
        let _ = node;
        false
    }

    /// `:hover`.
    fn is_hover(&self, node: Self::Node) -> bool {
        let _ = node;
        false
    }

    /// `:active`.
    fn is_active(&self, node: Self::Node) -> bool {
        let _ = node;
        false
    }

    /// `:focus`.
    fn is_focus(&self, node: Self::Node) -> bool {
        let _ = node;
        false
    }

    /// `:lang(tag)` - language prefix match per
    /// [§ 5.11.4](https://www.w3.org/TR/CSS21/selector.html#lang).
    fn is_lang(&self, node: Self::Node, lang: &str) -> bool {
        let _ = (node, lang);
        false
    }

    /// Presentational hints for the element (e.g. HTML `width`
    /// attributes). Applied as author-origin declarations preceding all
    /// author CSS, per
    /// [§ 6.4.4](https://www.w3.org/TR/CSS21/cascade.html#preshint).
    fn presentational_hints(&self, node: Self::Node) -> Vec<Declaration> {
        let _ = node;
        Vec::new()
    }

    /// A UA default for an inherited property at the document root,
    /// used when nothing cascaded.
    fn ua_default(&self, property: PropertyId) -> Option<Declaration> {
        let _ = property;
        None
    }

    /// Resolve a font size to an absolute length. Only the host knows
    /// the user's preferences and the font metrics; the default
    /// resolver uses fixed ratios with `medium` at 16px.
    ///
    /// # Errors
    ///
    /// Host-specific failures propagate out of composition unchanged.
    fn compute_font_size(
        &self,
        parent: Option<&Length>,
        specified: &FontSizeValue,
    ) -> Result<Length> {
        default_compute_font_size(parent, specified)
    }
}
