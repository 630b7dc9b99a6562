//! Composition tests: inheritance, initial values, shorthand
//! expansion, and the absolute-value fix-ups.
//!
//! [CSS 2.1 § 6.1 Specified, computed, and actual values](https://www.w3.org/TR/CSS21/cascade.html#value-stages)

mod common;

use bilby_common::Fixed;
use bilby_css::style::values::{
    BorderStyle, Color, Display, Float, FontFamily, Length, LengthAuto, Position, Spacing, Unit,
};
use bilby_css::{compose, default_compute_font_size, ComputedStyle, PartialStyle};
use bilby_dom::{DomTree, ElementData, NodeId};
use pretty_assertions::assert_eq;

use common::{author_ctx, computed_for};

fn compose_default(
    parent: Option<&ComputedStyle>,
    child: &PartialStyle,
) -> ComputedStyle {
    compose(parent, child, &mut default_compute_font_size).unwrap()
}

#[test]
fn test_empty_child_reproduces_initialise_plus_inheritance() {
    let parent_partial = PartialStyle::new();
    let parent = compose_default(None, &parent_partial);

    let child = compose_default(Some(&parent), &PartialStyle::new());

    let mut expected = ComputedStyle::inherit_from(&parent);
    // Fix-ups that always run: static position forces offsets to auto,
    // and the root-only display rules do not apply to the child.
    expected.border_top_color = expected.color;
    expected.border_right_color = expected.color;
    expected.border_bottom_color = expected.color;
    expected.border_left_color = expected.color;
    assert_eq!(child, expected);
}

#[test]
fn test_root_display_is_blockified() {
    // display:inline on the root element computes to block (§ 9.7).
    let computed = compose_default(None, &PartialStyle::new());
    assert_eq!(computed.display, Display::Block);
    assert_eq!(computed.float, Float::None);
}

#[test]
fn test_inheritance_of_font_family() {
    // Scenario: `body { font-family: "X" }`, computed <p> inherits it.
    let (ctx, interner) = author_ctx("body { font-family: \"X\" }");
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(
        computed.font_family,
        vec![FontFamily::Named(interner.intern("X"))]
    );
}

#[test]
fn test_background_color_is_not_inherited() {
    let (ctx, _) = author_ctx("body { background-color: red }");
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(
        computed.background_color,
        bilby_css::style::values::BackgroundColor::Transparent
    );
}

#[test]
fn test_explicit_inherit_copies_parent() {
    let (ctx, _) = author_ctx(
        "body { background-color: red } p { background-color: inherit }",
    );
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(
        computed.background_color,
        bilby_css::style::values::BackgroundColor::Color(Color::rgb(255, 0, 0))
    );
}

#[test]
fn test_border_shorthand_expansion() {
    // Scenario: `div { border: 2px solid red }` yields the longhands on
    // all four edges.
    let (ctx, _) = author_ctx("div { border: 2px solid red }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.border_top_style, BorderStyle::Solid);
    assert_eq!(computed.border_top_width, Length::px(2));
    assert_eq!(computed.border_top_color, Color::rgb(255, 0, 0));
    assert_eq!(computed.border_right_style, BorderStyle::Solid);
    assert_eq!(computed.border_bottom_width, Length::px(2));
    assert_eq!(computed.border_left_color, Color::rgb(255, 0, 0));
}

#[test]
fn test_border_color_defaults_to_color() {
    // § 8.5.2: an unset border color takes the computed 'color'.
    let (ctx, _) = author_ctx("div { color: green; border-top-style: solid }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.border_top_color, Color::rgb(0, 128, 0));
}

#[test]
fn test_border_shorthand_resets_color_to_current() {
    // The shorthand resets omitted components: the earlier explicit
    // red must not survive.
    let (ctx, _) = author_ctx(
        "div { color: green; border-top-color: red; border-top: 1px solid }",
    );
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.border_top_color, Color::rgb(0, 128, 0));
}

#[test]
fn test_border_width_keywords_and_hidden_styles() {
    let (ctx, _) = author_ctx(
        "div { border-top: thin solid; border-right: medium solid;\n\
               border-bottom: thick solid; border-left-width: 9px }",
    );
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.border_top_width, Length::px(1));
    assert_eq!(computed.border_right_width, Length::px(2));
    assert_eq!(computed.border_bottom_width, Length::px(4));
    // No style on the left edge: the width computes to zero.
    assert_eq!(computed.border_left_width, Length::ZERO);
}

#[test]
fn test_position_static_forces_offsets_auto() {
    // Scenario: `div { position: static; top: 10px }` computes top:auto.
    let (ctx, _) = author_ctx("div { position: static; top: 10px }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.top, LengthAuto::Auto);
}

#[test]
fn test_relative_offsets_mirror() {
    let (ctx, _) = author_ctx("div { position: relative; top: 10px; left: 4px }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.top, LengthAuto::Length(Length::px(10)));
    assert_eq!(computed.bottom, LengthAuto::Length(Length::px(-10)));
    assert_eq!(computed.left, LengthAuto::Length(Length::px(4)));
    assert_eq!(computed.right, LengthAuto::Length(Length::px(-4)));
}

#[test]
fn test_relative_bottom_prefers_negated_top() {
    // Known idiosyncrasy carried forward: with both offsets set,
    // `bottom` still mirrors `-top`.
    let (ctx, _) = author_ctx(
        "div { position: relative; top: 10px; bottom: 99px }",
    );
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.bottom, LengthAuto::Length(Length::px(-10)));
}

#[test]
fn test_absolute_position_forces_block_and_no_float() {
    let (ctx, _) = author_ctx(
        "body { display: block } span { position: absolute; float: left; display: inline }",
    );
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let span = tree.append_element(body, ElementData::new("span"));

    let computed = computed_for(&ctx, &tree, span);
    assert_eq!(computed.position, Position::Absolute);
    assert_eq!(computed.float, Float::None);
    assert_eq!(computed.display, Display::Block);
}

#[test]
fn test_floated_inline_becomes_block() {
    let (ctx, _) = author_ctx("body { display: block } span { float: right }");
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let span = tree.append_element(body, ElementData::new("span"));

    let computed = computed_for(&ctx, &tree, span);
    assert_eq!(computed.float, Float::Right);
    assert_eq!(computed.display, Display::Block);
}

#[test]
fn test_no_ex_unit_survives_composition() {
    let (ctx, _) = author_ctx(
        "div { margin-left: 4ex; letter-spacing: 2ex; text-indent: 1ex }",
    );
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    // The default resolver makes 1ex = 0.5em.
    assert_eq!(
        computed.margin_left,
        LengthAuto::Length(Length::new(Fixed::from_int(2), Unit::Em))
    );
    assert_eq!(
        computed.text_indent,
        Length::new(Fixed::from_raw(128), Unit::Em)
    );
    assert_eq!(
        computed.uncommon().letter_spacing,
        Spacing::Length(Length::new(Fixed::ONE, Unit::Em))
    );
}

#[test]
fn test_font_size_resolution_chain() {
    // em font sizes compound down the tree against the parent size.
    let (ctx, _) = author_ctx(
        "html { font-size: 20px } body { font-size: 1.5em } p { font-size: 50% }",
    );
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));

    assert_eq!(computed_for(&ctx, &tree, html).font_size, Length::px(20));
    assert_eq!(computed_for(&ctx, &tree, body).font_size, Length::px(30));
    assert_eq!(computed_for(&ctx, &tree, p).font_size, Length::px(15));
}

#[test]
fn test_font_size_keywords() {
    let (ctx, _) = author_ctx("p { font-size: x-large }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));
    assert_eq!(computed_for(&ctx, &tree, p).font_size, Length::px(24));
}

#[test]
fn test_margin_shorthand_expansion() {
    let (ctx, _) = author_ctx("div { margin: 1px 2px 3px 4px; padding: 5px 6px }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.margin_top, LengthAuto::Length(Length::px(1)));
    assert_eq!(computed.margin_right, LengthAuto::Length(Length::px(2)));
    assert_eq!(computed.margin_bottom, LengthAuto::Length(Length::px(3)));
    assert_eq!(computed.margin_left, LengthAuto::Length(Length::px(4)));
    assert_eq!(computed.padding_top, Length::px(5));
    assert_eq!(computed.padding_right, Length::px(6));
    assert_eq!(computed.padding_bottom, Length::px(5));
    assert_eq!(computed.padding_left, Length::px(6));
}

#[test]
fn test_font_shorthand() {
    let (ctx, _) = author_ctx(
        "p { font: italic bold 12px/1.5 \"Helvetica Neue\", sans-serif }",
    );
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(
        computed.font_style,
        bilby_css::style::values::FontStyle::Italic
    );
    assert_eq!(
        computed.font_weight,
        bilby_css::style::values::FontWeight::Bold
    );
    assert_eq!(computed.font_size, Length::px(12));
    assert_eq!(
        computed.line_height,
        bilby_css::style::values::LineHeight::Number(Fixed::from_raw(384))
    );
    assert_eq!(computed.font_family.len(), 2);
    assert_eq!(computed.font_family[1], FontFamily::SansSerif);
}

#[test]
fn test_rgb_and_rgba_functions() {
    let (ctx, _) = author_ctx(
        "div { color: rgb(10, 20, 30); background-color: rgba(1, 2, 3, 0.5) }",
    );
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));

    let computed = computed_for(&ctx, &tree, div);
    assert_eq!(computed.color, Color::rgb(10, 20, 30));
    let bilby_css::style::values::BackgroundColor::Color(bg) = computed.background_color
    else {
        panic!("expected a background color");
    };
    assert_eq!((bg.r, bg.g, bg.b), (1, 2, 3));
    assert!((126..=128).contains(&bg.a), "alpha 0.5 within rounding");
}

#[test]
fn test_invalid_declaration_does_not_poison_the_block() {
    let (ctx, _) = author_ctx("p { color: 12deg; display: block }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::BLACK);
    assert_eq!(computed.display, Display::Block);
}
