//! Selector matching against a host document.
//!
//! [CSS 2.1 § 5.1 Pattern matching](https://www.w3.org/TR/CSS21/selector.html#pattern-matching)
//!
//! A selector matches an element when its subject matches the element
//! and every simple selector in the combinator chain matches a node in
//! the required relationship. The chain is stored right-to-left, so the
//! walk starts at the candidate element and navigates outward through
//! the handler. Descendant steps backtrack: a nearer ancestor that
//! matches its simple selector but strands the rest of the chain must
//! not hide a farther ancestor that satisfies everything.

use crate::selector::{
    AttrMatch, Combinator, Detail, PseudoClass, PseudoElement, Selector,
};

use super::handler::DocumentHandler;

/// Does `selector` match `node` for the requested pseudo-element?
pub(crate) fn selector_matches<H: DocumentHandler>(
    handler: &H,
    node: H::Node,
    selector: &Selector,
    pseudo: Option<PseudoElement>,
) -> bool {
    // A selector addresses exactly one pseudo-element (or none); the
    // request must agree.
    if selector.pseudo_element() != pseudo {
        return false;
    }
    if !compound_matches(handler, node, selector.subject()) {
        return false;
    }
    chain_matches(handler, node, selector.chain())
}

/// Walk the combinator chain outward from `node`.
fn chain_matches<H: DocumentHandler>(
    handler: &H,
    node: H::Node,
    chain: &[(Combinator, Vec<Detail>)],
) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };

    // Fast path: a bare element-name simple selector can use the
    // host's indexed named lookups.
    let named = match compound.as_slice() {
        [Detail::Element(name)] => Some(name.as_str()),
        _ => None,
    };

    match combinator {
        Combinator::Child => {
            let parent = match named {
                Some(name) => handler.named_parent(node, name),
                None => handler
                    .parent_node(node)
                    .filter(|&p| compound_matches(handler, p, compound)),
            };
            parent.is_some_and(|p| chain_matches(handler, p, rest))
        }
        Combinator::Sibling => {
            let sibling = match named {
                Some(name) => handler.named_prev_sibling(node, name),
                None => handler
                    .prev_sibling_element(node)
                    .filter(|&s| compound_matches(handler, s, compound)),
            };
            sibling.is_some_and(|s| chain_matches(handler, s, rest))
        }
        Combinator::Descendant => {
            if let Some(name) = named {
                let mut cursor = handler.named_ancestor(node, name);
                while let Some(ancestor) = cursor {
                    if chain_matches(handler, ancestor, rest) {
                        return true;
                    }
                    cursor = handler.named_ancestor(ancestor, name);
                }
                return false;
            }
            let mut cursor = handler.parent_node(node);
            while let Some(ancestor) = cursor {
                if compound_matches(handler, ancestor, compound)
                    && chain_matches(handler, ancestor, rest)
                {
                    return true;
                }
                cursor = handler.parent_node(ancestor);
            }
            false
        }
    }
}

/// Every detail of a simple selector must hold on the node.
fn compound_matches<H: DocumentHandler>(
    handler: &H,
    node: H::Node,
    details: &[Detail],
) -> bool {
    details
        .iter()
        .all(|detail| detail_matches(handler, node, detail))
}

/// One atomic test.
fn detail_matches<H: DocumentHandler>(handler: &H, node: H::Node, detail: &Detail) -> bool {
    match detail {
        // [§ 5.4] element names are matched case-insensitively, per
        // HTML.
        Detail::Element(name) => handler
            .node_name(node)
            .is_some_and(|n| n.eq_ignore_ascii_case(name.as_str())),

        // [§ 5.3] "matches the name of any element type."
        Detail::Universal => true,

        // [§ 5.8.3] class values are case-sensitive.
        Detail::Class(name) => handler
            .node_classes(node)
            .iter()
            .any(|class| *class == name.as_str()),

        // [§ 5.9] ID values are case-sensitive.
        Detail::Id(name) => handler.node_id(node) == Some(name.as_str()),

        Detail::Attribute { name, op } => match op {
            AttrMatch::Exists => handler.has_attribute(node, name.as_str()),
            AttrMatch::Equals(value) => {
                handler.attribute_equals(node, name.as_str(), value.as_str())
            }
            AttrMatch::DashMatch(value) => {
                handler.attribute_dash_match(node, name.as_str(), value.as_str())
            }
            AttrMatch::Includes(value) => {
                handler.attribute_includes(node, name.as_str(), value.as_str())
            }
        },

        Detail::PseudoClass(class) => match class {
            PseudoClass::FirstChild => handler.is_first_child(node),
            PseudoClass::Link => handler.is_link(node),
            PseudoClass::Visited => handler.is_visited(node),
            PseudoClass::Hover => handler.is_hover(node),
            PseudoClass::Active => handler.is_active(node),
            PseudoClass::Focus => handler.is_focus(node),
            PseudoClass::Lang(tag) => handler.is_lang(node, tag.as_str()),
        },

        // Agreement with the request was checked before matching
        // started; the detail itself constrains nothing further.
        Detail::PseudoElement(_) => true,
    }
}
