//! Stylesheet construction, at-rule gating, imports, and rule removal.

mod common;

use bilby_common::{Error, Interner};
use bilby_css::{Media, Params, RuleBody, Stylesheet};

use common::sheet_from;

fn rule_kinds(sheet: &Stylesheet) -> Vec<&'static str> {
    sheet
        .top_rules()
        .iter()
        .filter_map(|&id| sheet.rule(id).map(|r| r.body.kind()))
        .collect()
}

#[test]
fn test_charset_only_first() {
    let interner = Interner::new();
    let sheet = sheet_from("@charset \"utf-8\";\np { color: red }", &interner);
    assert_eq!(rule_kinds(&sheet), vec!["charset", "selectors"]);

    // After any rule, @charset is dropped.
    let sheet = sheet_from("p { color: red }\n@charset \"utf-8\";", &interner);
    assert_eq!(rule_kinds(&sheet), vec!["selectors"]);
}

#[test]
fn test_import_gating() {
    let interner = Interner::new();
    // Before any rule: kept. After a rule: dropped.
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        url: "test://base/site.css".to_owned(),
        ..Params::default()
    });
    sheet
        .append_data(b"@import url(a.css);\np { color: red }\n@import url(b.css);")
        .unwrap();
    assert_eq!(sheet.data_done(), Err(Error::ImportsPending));
    assert_eq!(rule_kinds(&sheet), vec!["import", "selectors"]);

    let (url, media) = sheet.next_pending_import().unwrap();
    assert_eq!(url.as_str(), "test://base/a.css");
    assert_eq!(media, Media::ALL);
}

#[test]
fn test_import_registration_completes_the_sheet() {
    let interner = Interner::new();
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        ..Params::default()
    });
    sheet
        .append_data(b"@import url(child.css) print;")
        .unwrap();
    assert_eq!(sheet.data_done(), Err(Error::ImportsPending));

    let (_, media) = sheet.next_pending_import().unwrap();
    assert_eq!(media, Media::PRINT);

    let child = sheet_from("h1 { color: blue }", &interner);
    sheet.register_import(child).unwrap();
    assert!(sheet.next_pending_import().is_none());

    // A second registration has no slot to fill.
    let extra = sheet_from("h2 { color: green }", &interner);
    assert_eq!(sheet.register_import(extra), Err(Error::BadParameter));
}

#[test]
fn test_media_rule_nests_children() {
    let interner = Interner::new();
    let sheet = sheet_from(
        "@media print, tv { p { color: red } h1 { color: blue } }",
        &interner,
    );
    let media_id = sheet.top_rules()[0];
    let Some(RuleBody::Media { media, children }) = sheet.rule(media_id).map(|r| &r.body)
    else {
        panic!("expected a media rule");
    };
    assert!(media.intersects(Media::PRINT));
    assert!(media.intersects(Media::TV));
    assert!(!media.intersects(Media::SCREEN));
    assert_eq!(children.len(), 2);
    for &child in children {
        assert_eq!(sheet.rule(child).unwrap().parent, Some(media_id));
    }
}

#[test]
fn test_rule_indices_strictly_increase() {
    let interner = Interner::new();
    let sheet = sheet_from(
        "p { color: red } @media screen { i { color: blue } } b { color: green }",
        &interner,
    );
    let indices: Vec<u32> = sheet
        .rule_ids()
        .filter_map(|id| sheet.rule(id).map(|r| r.index))
        .collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(indices.len(), sorted.len(), "indices must be unique");
}

#[test]
fn test_remove_rule() {
    let interner = Interner::new();
    let mut sheet = sheet_from("p { color: red } h1 { color: blue }", &interner);
    let first = sheet.top_rules()[0];
    let before = sheet.size();

    sheet.remove_rule(first).unwrap();
    assert!(sheet.rule(first).is_none());
    assert_eq!(sheet.top_rules().len(), 1);
    assert!(sheet.size() < before);

    // Removing again is a caller error.
    assert_eq!(sheet.remove_rule(first), Err(Error::BadParameter));
}

#[test]
fn test_font_face_and_page_rules() {
    let interner = Interner::new();
    let sheet = sheet_from(
        "@font-face { font-family: \"X\"; font-weight: bold }\n\
         @page :first { margin-top: 2cm }",
        &interner,
    );
    assert_eq!(rule_kinds(&sheet), vec!["font-face", "page"]);
    let Some(RuleBody::Page { pseudo, style }) =
        sheet.rule(sheet.top_rules()[1]).map(|r| &r.body)
    else {
        panic!("expected a page rule");
    };
    assert_eq!(pseudo.as_ref().map(bilby_common::Atom::as_str), Some("first"));
    assert_eq!(style.len(), 1);
}

#[test]
fn test_unknown_at_rule_is_retained_but_inert() {
    let interner = Interner::new();
    let sheet = sheet_from(
        "@keyframes spin { from { left: 0 } }\np { color: red }",
        &interner,
    );
    assert_eq!(rule_kinds(&sheet), vec!["unknown", "selectors"]);
}

#[test]
fn test_quirks_latch() {
    let interner = Interner::new();
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        quirks_allowed: true,
        ..Params::default()
    });
    sheet.append_data(b"p { color: ff0000 }").unwrap();
    sheet.data_done().unwrap();
    assert!(sheet.quirks_allowed());
    assert!(sheet.used_quirks());

    // Without the quirky declaration the latch stays clear.
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        quirks_allowed: true,
        ..Params::default()
    });
    sheet.append_data(b"p { color: #ff0000 }").unwrap();
    sheet.data_done().unwrap();
    assert!(!sheet.used_quirks());
}

#[test]
fn test_charset_accessor_reports_decoding() {
    let interner = Interner::new();
    let sheet = sheet_from("p { color: red }", &interner);
    assert_eq!(sheet.charset(), Some("UTF-8"));
}

#[test]
fn test_disabled_flag_round_trip() {
    let interner = Interner::new();
    let mut sheet = sheet_from("p { color: red }", &interner);
    assert!(!sheet.disabled());
    sheet.set_disabled(true);
    assert!(sheet.disabled());
}

#[test]
fn test_inline_style_sheet() {
    let interner = Interner::new();
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        inline_style: true,
        ..Params::default()
    });
    sheet.append_data(b"color: red; margin: 0").unwrap();
    sheet.data_done().unwrap();
    assert!(sheet.is_inline());
    // color + four margin longhands.
    assert_eq!(sheet.inline_declarations().unwrap().len(), 5);
}

#[test]
fn test_chunked_append() {
    // A token split across chunk boundaries must survive.
    let interner = Interner::new();
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        ..Params::default()
    });
    sheet.append_data(b"p { col").unwrap();
    sheet.append_data(b"or: re").unwrap();
    sheet.append_data(b"d }").unwrap();
    sheet.data_done().unwrap();
    assert_eq!(rule_kinds(&sheet), vec!["selectors"]);
}
