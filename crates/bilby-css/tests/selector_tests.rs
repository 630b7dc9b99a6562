//! Selector parsing and specificity tests, driven through the full
//! stylesheet pipeline.
//!
//! [CSS 2.1 § 5 Selectors](https://www.w3.org/TR/CSS21/selector.html)

mod common;

use bilby_common::Interner;
use bilby_css::selector::{Combinator, Detail, PseudoClass, PseudoElement};
use bilby_css::{RuleBody, Specificity, Stylesheet};

use common::sheet_from;

/// The selectors of the first selector-rule in the sheet.
fn selectors_of(sheet: &Stylesheet) -> &[bilby_css::selector::Selector] {
    sheet
        .top_rules()
        .iter()
        .find_map(|&id| match &sheet.rule(id)?.body {
            RuleBody::Selectors { selectors, .. } => Some(selectors.as_slice()),
            _ => None,
        })
        .expect("no selector rule in sheet")
}

fn parse(css: &str) -> (Stylesheet, Interner) {
    let interner = Interner::new();
    let sheet = sheet_from(css, &interner);
    (sheet, interner)
}

fn selector_rule_count(sheet: &Stylesheet) -> usize {
    sheet
        .rule_ids()
        .filter(|&id| {
            matches!(
                sheet.rule(id).map(|r| &r.body),
                Some(RuleBody::Selectors { .. })
            )
        })
        .count()
}

#[test]
fn test_simple_selector_details() {
    let (sheet, interner) = parse("p.note#main { color: red }");
    let selectors = selectors_of(&sheet);
    assert_eq!(selectors.len(), 1);
    assert_eq!(
        selectors[0].subject(),
        &[
            Detail::Element(interner.intern("p")),
            Detail::Class(interner.intern("note")),
            Detail::Id(interner.intern("main")),
        ]
    );
    assert_eq!(selectors[0].specificity(), Specificity(0, 1, 1, 1));
}

#[test]
fn test_selector_list_splits_on_commas() {
    let (sheet, _) = parse("h1, h2 , h3 { color: red }");
    assert_eq!(selectors_of(&sheet).len(), 3);
}

#[test]
fn test_combinator_chain_is_right_to_left() {
    let (sheet, interner) = parse("html > body p + span { color: red }");
    let selectors = selectors_of(&sheet);
    let selector = &selectors[0];
    assert_eq!(
        selector.subject(),
        &[Detail::Element(interner.intern("span"))]
    );
    let chain = selector.chain();
    assert_eq!(chain.len(), 3);
    // Read outward from the subject: +p, then descendant body, then
    // child html.
    assert_eq!(chain[0].0, Combinator::Sibling);
    assert_eq!(chain[0].1, vec![Detail::Element(interner.intern("p"))]);
    assert_eq!(chain[1].0, Combinator::Descendant);
    assert_eq!(chain[1].1, vec![Detail::Element(interner.intern("body"))]);
    assert_eq!(chain[2].0, Combinator::Child);
    assert_eq!(chain[2].1, vec![Detail::Element(interner.intern("html"))]);
}

#[test]
fn test_trailing_whitespace_before_comma_is_not_a_combinator() {
    // `html , body` is two selectors, not a descendant chain.
    let (sheet, _) = parse("html , body { color: red }");
    let selectors = selectors_of(&sheet);
    assert_eq!(selectors.len(), 2);
    assert!(selectors.iter().all(|s| s.chain().is_empty()));
}

#[test]
fn test_universal_selector() {
    let (sheet, _) = parse("* { color: red }");
    let selectors = selectors_of(&sheet);
    assert_eq!(selectors[0].subject(), &[Detail::Universal]);
    assert_eq!(selectors[0].specificity(), Specificity(0, 0, 0, 0));
}

#[test]
fn test_attribute_selectors() {
    use bilby_css::selector::AttrMatch;
    let (sheet, interner) = parse("a[href][rel~=copyright][lang|=en][title=x] { color: red }");
    let details = selectors_of(&sheet)[0].subject();
    assert_eq!(details.len(), 5);
    assert_eq!(
        details[1],
        Detail::Attribute {
            name: interner.intern("href"),
            op: AttrMatch::Exists,
        }
    );
    assert_eq!(
        details[2],
        Detail::Attribute {
            name: interner.intern("rel"),
            op: AttrMatch::Includes(interner.intern("copyright")),
        }
    );
    assert_eq!(
        details[3],
        Detail::Attribute {
            name: interner.intern("lang"),
            op: AttrMatch::DashMatch(interner.intern("en")),
        }
    );
    assert_eq!(
        details[4],
        Detail::Attribute {
            name: interner.intern("title"),
            op: AttrMatch::Equals(interner.intern("x")),
        }
    );
    // Four attribute selectors count toward "c".
    assert_eq!(
        selectors_of(&sheet)[0].specificity(),
        Specificity(0, 0, 4, 1)
    );
}

#[test]
fn test_pseudo_classes_and_lang() {
    let (sheet, interner) = parse("a:hover:lang(en-GB) { color: red }");
    let details = selectors_of(&sheet)[0].subject();
    assert_eq!(details[1], Detail::PseudoClass(PseudoClass::Hover));
    assert_eq!(
        details[2],
        Detail::PseudoClass(PseudoClass::Lang(interner.intern("en-GB")))
    );
}

#[test]
fn test_pseudo_elements_are_recognized() {
    let (sheet, _) = parse("p:first-line { color: red }");
    let selector = &selectors_of(&sheet)[0];
    assert_eq!(selector.pseudo_element(), Some(PseudoElement::FirstLine));
    // A pseudo-element counts toward "d" like an element name.
    assert_eq!(selector.specificity(), Specificity(0, 0, 0, 2));
}

#[test]
fn test_unknown_pseudo_class_drops_the_whole_rule() {
    // [§ 4.1.7] "the entire rule is dropped" - including the other,
    // valid selectors in the list.
    let (sheet, _) = parse("p:sparkle, h1 { color: red } h2 { color: blue }");
    assert_eq!(selector_rule_count(&sheet), 1);
}

#[test]
fn test_pseudo_element_only_on_subject() {
    let (sheet, _) = parse("p:first-line span { color: red }");
    assert_eq!(selector_rule_count(&sheet), 0);
}

#[test]
fn test_malformed_selector_recovers_at_block() {
    let (sheet, _) = parse("p[ { color: red } h1 { color: blue }");
    // The malformed rule is discarded; the following rule survives.
    assert_eq!(selector_rule_count(&sheet), 1);
}

#[test]
fn test_specificity_across_list_members_is_independent() {
    let (sheet, _) = parse("#a, .b, i { color: red }");
    let selectors = selectors_of(&sheet);
    assert_eq!(selectors[0].specificity(), Specificity(0, 1, 0, 0));
    assert_eq!(selectors[1].specificity(), Specificity(0, 0, 1, 0));
    assert_eq!(selectors[2].specificity(), Specificity(0, 0, 0, 1));
}
