//! Selection and cascade tests over the reference document.
//!
//! [CSS 2.1 § 6.4 The cascade](https://www.w3.org/TR/CSS21/cascade.html#cascade)

mod common;

use bilby_common::Interner;
use bilby_css::style::values::{Color, Content, ContentItem, Display};
use bilby_css::{
    compose, DocumentHandler, Media, Origin, Params, PseudoElement, SelectCtx, Stylesheet,
};
use bilby_dom::{DomTree, ElementData, ElementState, NodeId};
use pretty_assertions::assert_eq;

use common::{author_ctx, computed_for, computed_with_inline, sheet_from};

#[test]
fn test_direct_property() {
    // Scenario: `p { color: red }` against <p>.
    let (ctx, _) = author_ctx("p { color: red }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color.to_rgba(), 0xff00_00ff);
}

#[test]
fn test_specificity_ordering() {
    // ID beats class beats element, regardless of source order.
    let (ctx, _) = author_ctx(
        "p { color: red } p.x { color: blue } #id { color: green }",
    );
    let mut tree = DomTree::new();
    let p = tree.append_element(
        NodeId::ROOT,
        ElementData::new("p").with_class("x").with_id("id"),
    );

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::rgb(0, 128, 0));
}

#[test]
fn test_important_beats_specificity_within_origin() {
    let (ctx, _) = author_ctx("p { color: red !important } p#id { color: blue }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p").with_id("id"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::rgb(255, 0, 0));
}

#[test]
fn test_source_order_breaks_ties() {
    let (ctx, _) = author_ctx("p { color: red } p { color: blue }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_origin_ordering() {
    let interner = Interner::new();
    let mut ctx = SelectCtx::new();
    ctx.append_sheet(
        sheet_from("p { color: red; display: block }", &interner),
        Origin::UserAgent,
        Media::ALL,
    );
    ctx.append_sheet(
        sheet_from("p { color: blue }", &interner),
        Origin::User,
        Media::ALL,
    );
    ctx.append_sheet(
        sheet_from("p { color: green }", &interner),
        Origin::Author,
        Media::ALL,
    );
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    // Author wins for color; the UA display declaration is unopposed.
    assert_eq!(computed.color, Color::rgb(0, 128, 0));
    assert_eq!(computed.display, Display::Block);
}

#[test]
fn test_user_important_beats_author_important() {
    let interner = Interner::new();
    let mut ctx = SelectCtx::new();
    ctx.append_sheet(
        sheet_from("p { color: blue !important }", &interner),
        Origin::User,
        Media::ALL,
    );
    ctx.append_sheet(
        sheet_from("p { color: green !important }", &interner),
        Origin::Author,
        Media::ALL,
    );
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_descendant_child_and_sibling_combinators() {
    let (ctx, _) = author_ctx(
        "body span { color: red }\n\
         body > div { color: blue }\n\
         h1 + p { color: green }",
    );
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let div = tree.append_element(body, ElementData::new("div"));
    let span = tree.append_element(div, ElementData::new("span"));
    let _h1 = tree.append_element(body, ElementData::new("h1"));
    let p = tree.append_element(body, ElementData::new("p"));

    // span is a descendant (not child) of body.
    assert_eq!(computed_for(&ctx, &tree, span).color, Color::rgb(255, 0, 0));
    // div is a direct child.
    assert_eq!(computed_for(&ctx, &tree, div).color, Color::rgb(0, 0, 255));
    // p immediately follows h1.
    assert_eq!(computed_for(&ctx, &tree, p).color, Color::rgb(0, 128, 0));
}

#[test]
fn test_child_combinator_does_not_match_descendant() {
    let (ctx, _) = author_ctx("body > span { color: red }");
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let div = tree.append_element(body, ElementData::new("div"));
    let span = tree.append_element(div, ElementData::new("span"));

    let computed = computed_for(&ctx, &tree, span);
    assert_eq!(computed.color, Color::BLACK);
}

#[test]
fn test_descendant_backtracks_past_near_miss() {
    // The inner div matches `div` but has no `section` above it; the
    // outer one does. Greedy nearest-ancestor matching would fail.
    let (ctx, _) = author_ctx("section div p { color: red }");
    let mut tree = DomTree::new();
    let section = tree.append_element(NodeId::ROOT, ElementData::new("section"));
    let outer = tree.append_element(section, ElementData::new("div"));
    let inner = tree.append_element(outer, ElementData::new("div"));
    let p = tree.append_element(inner, ElementData::new("p"));

    assert_eq!(computed_for(&ctx, &tree, p).color, Color::rgb(255, 0, 0));
}

#[test]
fn test_attribute_and_pseudo_class_matching() {
    let (ctx, _) = author_ctx(
        "input[type=text] { color: red }\n\
         a:hover { color: blue }\n\
         p:first-child { color: green }",
    );
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let input = tree.append_element(body, ElementData::new("input").with_attr("type", "text"));
    let a = tree.append_element(
        body,
        ElementData::new("a").with_state(ElementState {
            hover: true,
            ..ElementState::default()
        }),
    );

    assert_eq!(computed_for(&ctx, &tree, input).color, Color::rgb(255, 0, 0));
    assert_eq!(computed_for(&ctx, &tree, a).color, Color::rgb(0, 0, 255));

    // `input` is the first child, so `p:first-child` must not match the
    // later <p>.
    let p = tree.append_element(body, ElementData::new("p"));
    assert_eq!(computed_for(&ctx, &tree, p).color, Color::BLACK);
}

#[test]
fn test_lang_pseudo_class() {
    let (ctx, _) = author_ctx("p:lang(en) { color: red }");
    let mut tree = DomTree::new();
    let html = tree.append_element(
        NodeId::ROOT,
        ElementData::new("html").with_attr("lang", "en-US"),
    );
    let p = tree.append_element(html, ElementData::new("p"));

    assert_eq!(computed_for(&ctx, &tree, p).color, Color::rgb(255, 0, 0));
}

#[test]
fn test_media_filtering() {
    let (ctx, _) = author_ctx("@media print { p { color: red } } p { display: block }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    // The helper selects for SCREEN: the print block must not apply.
    let computed = computed_for(&ctx, &tree, p);
    assert_eq!(computed.color, Color::BLACK);
    assert_eq!(computed.display, Display::Block);

    // Selecting for print picks it up.
    let partial = ctx
        .select_style(p, None, Media::PRINT, None, &tree)
        .unwrap();
    let computed = compose(None, &partial, &mut |parent, size| {
        tree.compute_font_size(parent, size)
    })
    .unwrap();
    assert_eq!(computed.color, Color::rgb(255, 0, 0));
}

#[test]
fn test_disabled_sheet_is_skipped() {
    let interner = Interner::new();
    let mut sheet = sheet_from("p { color: red }", &interner);
    sheet.set_disabled(true);
    let mut ctx = SelectCtx::new();
    ctx.append_sheet(sheet, Origin::Author, Media::ALL);

    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));
    assert_eq!(computed_for(&ctx, &tree, p).color, Color::BLACK);
}

#[test]
fn test_imported_rules_precede_importing_sheet() {
    let interner = Interner::new();
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        ..Params::default()
    });
    sheet
        .append_data(b"@import url(child.css);\np { color: blue }")
        .unwrap();
    assert!(sheet.data_done().is_err());
    sheet
        .register_import(sheet_from("p { color: red }", &interner))
        .unwrap();

    let mut ctx = SelectCtx::new();
    ctx.append_sheet(sheet, Origin::Author, Media::ALL);
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    // Equal specificity: the importing sheet's own rule comes later in
    // source order and wins.
    assert_eq!(computed_for(&ctx, &tree, p).color, Color::rgb(0, 0, 255));
}

#[test]
fn test_inline_style_wins_over_sheet_ids() {
    let (ctx, interner) = author_ctx("#id { color: red }");
    let mut inline = Stylesheet::new(Params {
        interner,
        inline_style: true,
        ..Params::default()
    });
    inline.append_data(b"color: blue").unwrap();
    inline.data_done().unwrap();

    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p").with_id("id"));

    let computed = computed_with_inline(&ctx, &tree, p, Some(&inline));
    assert_eq!(computed.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_important_sheet_rule_beats_normal_inline() {
    let (ctx, interner) = author_ctx("p { color: red !important }");
    let mut inline = Stylesheet::new(Params {
        interner,
        inline_style: true,
        ..Params::default()
    });
    inline.append_data(b"color: blue").unwrap();
    inline.data_done().unwrap();

    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    let computed = computed_with_inline(&ctx, &tree, p, Some(&inline));
    assert_eq!(computed.color, Color::rgb(255, 0, 0));
}

#[test]
fn test_pseudo_element_selection() {
    let (ctx, interner) = author_ctx(
        "p:before { content: \"note: \" }\np { color: red }",
    );
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));

    // The default request must not see the :before rule.
    let partial = ctx
        .select_style(p, None, Media::SCREEN, None, &tree)
        .unwrap();
    let computed = compose(None, &partial, &mut |parent, size| {
        tree.compute_font_size(parent, size)
    })
    .unwrap();
    assert_eq!(computed.uncommon().content, Content::Normal);

    // The :before request sees only rules addressing it.
    let partial = ctx
        .select_style(p, Some(PseudoElement::Before), Media::SCREEN, None, &tree)
        .unwrap();
    let computed = compose(None, &partial, &mut |parent, size| {
        tree.compute_font_size(parent, size)
    })
    .unwrap();
    assert_eq!(
        computed.uncommon().content,
        Content::Items(vec![ContentItem::String(interner.intern("note: "))])
    );
    assert_eq!(computed.color, Color::BLACK, "p's own color must not leak");
}

#[test]
fn test_universal_selector_matches_everything() {
    let (ctx, _) = author_ctx("* { color: red }");
    let mut tree = DomTree::new();
    let anything = tree.append_element(NodeId::ROOT, ElementData::new("whatever"));
    assert_eq!(
        computed_for(&ctx, &tree, anything).color,
        Color::rgb(255, 0, 0)
    );
}

#[test]
fn test_element_name_matching_is_case_insensitive() {
    let (ctx, _) = author_ctx("DIV { color: red }");
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));
    assert_eq!(computed_for(&ctx, &tree, div).color, Color::rgb(255, 0, 0));
}

#[test]
fn test_class_matching_is_case_sensitive() {
    let (ctx, _) = author_ctx(".Note { color: red }");
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p").with_class("note"));
    assert_eq!(computed_for(&ctx, &tree, p).color, Color::BLACK);
}
