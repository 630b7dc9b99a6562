//! Shared helpers for the integration suites: stylesheet construction
//! and ancestry-aware style computation over the reference document.

use bilby_common::Interner;
use bilby_css::{
    compose, ComputedStyle, DocumentHandler, Media, Origin, Params, SelectCtx, Stylesheet,
};
use bilby_dom::{DomTree, NodeId};

/// Parse an author sheet from source.
pub fn sheet_from(css: &str, interner: &Interner) -> Stylesheet {
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        url: "test://sheet.css".to_owned(),
        ..Params::default()
    });
    sheet.append_data(css.as_bytes()).unwrap();
    sheet.data_done().unwrap();
    sheet
}

/// A context holding one author sheet.
pub fn author_ctx(css: &str) -> (SelectCtx, Interner) {
    let interner = Interner::new();
    let mut ctx = SelectCtx::new();
    ctx.append_sheet(sheet_from(css, &interner), Origin::Author, Media::ALL);
    (ctx, interner)
}

/// Select and compose `node`, composing every ancestor first so
/// inheritance behaves as in a real document.
pub fn computed_for(ctx: &SelectCtx, tree: &DomTree, node: NodeId) -> ComputedStyle {
    computed_with_inline(ctx, tree, node, None)
}

/// As [`computed_for`], with an inline style on the target element.
pub fn computed_with_inline(
    ctx: &SelectCtx,
    tree: &DomTree,
    node: NodeId,
    inline: Option<&Stylesheet>,
) -> ComputedStyle {
    let mut chain = vec![node];
    let mut cursor = node;
    while let Some(parent) = tree.parent_node(cursor) {
        chain.push(parent);
        cursor = parent;
    }
    chain.reverse();

    let mut parent_style: Option<ComputedStyle> = None;
    for &current in &chain {
        let node_inline = if current == node { inline } else { None };
        let partial = ctx
            .select_style(current, None, Media::SCREEN, node_inline, tree)
            .unwrap();
        let computed = compose(parent_style.as_ref(), &partial, &mut |parent, size| {
            tree.compute_font_size(parent, size)
        })
        .unwrap();
        parent_style = Some(computed);
    }
    parent_style.unwrap()
}
