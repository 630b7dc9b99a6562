//! The selector model.
//!
//! [CSS 2.1 § 5 Selectors](https://www.w3.org/TR/CSS21/selector.html)
//!
//! "A selector is a chain of one or more simple selectors separated by
//! combinators." A [`Selector`] stores the rightmost simple selector
//! (the *subject*) plus the combinator chain leading away from it, in
//! right-to-left order - matching starts at the candidate element and
//! walks outward, which is also the order the chain is stored in.

use bilby_common::Atom;
use serde::Serialize;

/// How an attribute selector matches its value.
///
/// [§ 5.8 Attribute selectors](https://www.w3.org/TR/CSS21/selector.html#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttrMatch {
    /// `[att]`: "Match when the element sets the att attribute."
    Exists,
    /// `[att=val]`: "Match when the element's att attribute value is
    /// exactly val."
    Equals(Atom),
    /// `[att~=val]`: "a list of whitespace-separated values, one of
    /// which is exactly equal to val."
    Includes(Atom),
    /// `[att|=val]`: "a hyphen-separated list of values beginning with
    /// val."
    DashMatch(Atom),
}

/// Pseudo-classes recognized by CSS 2.1.
///
/// [§ 5.11 Pseudo-classes](https://www.w3.org/TR/CSS21/selector.html#pseudo-class-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PseudoClass {
    /// [§ 5.11.1] ":first-child - an element that is the first child of
    /// some other element."
    FirstChild,
    /// [§ 5.11.2] ":link - for links that have not yet been visited."
    Link,
    /// [§ 5.11.2] ":visited - for links that have been visited."
    Visited,
    /// [§ 5.11.3] ":hover - while the user designates an element."
    Hover,
    /// [§ 5.11.3] ":active - while an element is being activated."
    Active,
    /// [§ 5.11.3] ":focus - while an element has the focus."
    Focus,
    /// [§ 5.11.4] ":lang(C) - the element is in language C."
    Lang(Atom),
}

/// Pseudo-elements recognized by CSS 2.1 (single-colon syntax).
///
/// [§ 5.12 Pseudo-elements](https://www.w3.org/TR/CSS21/selector.html#pseudo-element-selectors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PseudoElement {
    /// ":first-line - the first formatted line of a paragraph."
    FirstLine,
    /// ":first-letter - the first letter or digit of an element."
    FirstLetter,
    /// ":before - generated content before an element's content."
    Before,
    /// ":after - generated content after an element's content."
    After,
}

impl PseudoElement {
    /// Look up a pseudo-element by name (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "first-line" => Self::FirstLine,
            "first-letter" => Self::FirstLetter,
            "before" => Self::Before,
            "after" => Self::After,
            _ => return None,
        })
    }
}

/// One atomic test of a simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Detail {
    /// [§ 5.4] "A type selector matches the name of a document language
    /// element type." Matched ASCII case-insensitively, per HTML.
    Element(Atom),
    /// [§ 5.3] "The universal selector, written '*', matches the name
    /// of any element type."
    Universal,
    /// [§ 5.8.3] ".class" notation.
    Class(Atom),
    /// [§ 5.9] "#id" notation.
    Id(Atom),
    /// [§ 5.8] attribute presence and value tests.
    Attribute {
        /// The attribute name, matched case-insensitively.
        name: Atom,
        /// The value condition.
        op: AttrMatch,
    },
    /// [§ 5.11] pseudo-class test, answered by the host document.
    PseudoClass(PseudoClass),
    /// [§ 5.12] pseudo-element tail.
    PseudoElement(PseudoElement),
}

/// The relationship between adjacent simple selectors in a chain.
///
/// [§ 5.2 Selector syntax](https://www.w3.org/TR/CSS21/selector.html#selector-syntax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Combinator {
    /// [§ 5.5] "A descendant combinator is whitespace that separates two
    /// simple selectors."
    Descendant,
    /// [§ 5.6] "A child combinator ('>') describes a childhood
    /// relationship between two elements."
    Child,
    /// [§ 5.7] "Adjacent sibling combinator ('+')... E1 and E2 share the
    /// same parent and E1 immediately precedes E2."
    Sibling,
}

/// Cascade specificity.
///
/// [§ 6.4.3 Calculating a selector's specificity](https://www.w3.org/TR/CSS21/cascade.html#specificity)
///
/// "A selector's specificity is calculated as follows:
///  - count 1 if the declaration is from a 'style' attribute... (= a)
///  - count the number of ID attributes in the selector (= b)
///  - count the number of other attributes and pseudo-classes (= c)
///  - count the number of element names and pseudo-elements (= d)"
///
/// Comparison is lexicographic over `(a, b, c, d)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize,
)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32);

impl Specificity {
    /// The specificity of an inline `style` attribute declaration:
    /// "a=1, b=0, c=0, d=0".
    pub const INLINE: Self = Self(1, 0, 0, 0);

    /// Component-wise sum.
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self(
            self.0 + other.0,
            self.1 + other.1,
            self.2 + other.2,
            self.3 + other.3,
        )
    }

    /// The contribution of one detail.
    #[must_use]
    pub const fn of_detail(detail: &Detail) -> Self {
        match detail {
            // "count the number of ID attributes in the selector (= b)"
            Detail::Id(_) => Self(0, 1, 0, 0),
            // "count the number of other attributes and pseudo-classes
            // in the selector (= c)"
            Detail::Class(_) | Detail::Attribute { .. } | Detail::PseudoClass(_) => {
                Self(0, 0, 1, 0)
            }
            // "count the number of element names and pseudo-elements (= d)"
            Detail::Element(_) | Detail::PseudoElement(_) => Self(0, 0, 0, 1),
            // The universal selector is ignored.
            Detail::Universal => Self(0, 0, 0, 0),
        }
    }
}

/// A complete selector: subject plus combinator chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// The rightmost simple selector; the elements a selector represents
    /// are the elements matched by its subject.
    subject: Vec<Detail>,
    /// The chain read right-to-left: for `A > B C`, the subject is `C`
    /// and the chain is `[(Descendant, B), (Child, A)]`.
    chain: Vec<(Combinator, Vec<Detail>)>,
    /// Precomputed specificity over the whole chain.
    specificity: Specificity,
}

impl Selector {
    /// Assemble a selector and precompute its specificity.
    ///
    /// Specificity is a pure function of the structure: the sum of the
    /// detail contributions across the subject and every simple selector
    /// in the chain.
    #[must_use]
    pub fn new(subject: Vec<Detail>, chain: Vec<(Combinator, Vec<Detail>)>) -> Self {
        let mut specificity = Specificity::default();
        for detail in &subject {
            specificity = specificity.add(Specificity::of_detail(detail));
        }
        for (_, details) in &chain {
            for detail in details {
                specificity = specificity.add(Specificity::of_detail(detail));
            }
        }
        Self {
            subject,
            chain,
            specificity,
        }
    }

    /// The subject's details.
    #[must_use]
    pub fn subject(&self) -> &[Detail] {
        &self.subject
    }

    /// The combinator chain, right-to-left.
    #[must_use]
    pub fn chain(&self) -> &[(Combinator, Vec<Detail>)] {
        &self.chain
    }

    /// The precomputed specificity.
    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// The pseudo-element this selector addresses, if any.
    ///
    /// [§ 5.12] "Only one pseudo-element may appear per selector, and if
    /// present it must appear after the sequence of simple selectors
    /// that represents the subject."
    #[must_use]
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        self.subject.iter().find_map(|detail| match detail {
            Detail::PseudoElement(pe) => Some(*pe),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use bilby_common::Interner;

    use super::*;

    #[test]
    fn test_specificity_is_structural() {
        let interner = Interner::new();
        // p.note#main:hover -> a=0 b=1 c=2 d=1
        let selector = Selector::new(
            vec![
                Detail::Element(interner.intern("p")),
                Detail::Class(interner.intern("note")),
                Detail::Id(interner.intern("main")),
                Detail::PseudoClass(PseudoClass::Hover),
            ],
            Vec::new(),
        );
        assert_eq!(selector.specificity(), Specificity(0, 1, 2, 1));
    }

    #[test]
    fn test_specificity_sums_over_chain() {
        let interner = Interner::new();
        // div p -> d=2
        let selector = Selector::new(
            vec![Detail::Element(interner.intern("p"))],
            vec![(
                Combinator::Descendant,
                vec![Detail::Element(interner.intern("div"))],
            )],
        );
        assert_eq!(selector.specificity(), Specificity(0, 0, 0, 2));
    }

    #[test]
    fn test_specificity_ordering() {
        // [§ 6.4.3] "Concatenating the four numbers a-b-c-d (in a number
        // system with a large base) gives the specificity."
        assert!(Specificity(0, 1, 0, 0) > Specificity(0, 0, 10, 10));
        assert!(Specificity::INLINE > Specificity(0, 5, 0, 0));
    }

    #[test]
    fn test_universal_contributes_nothing() {
        let selector = Selector::new(vec![Detail::Universal], Vec::new());
        assert_eq!(selector.specificity(), Specificity::default());
    }
}
