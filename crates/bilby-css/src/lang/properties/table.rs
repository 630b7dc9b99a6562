//! Table properties.
//!
//! [CSS 2.1 § 17 Tables](https://www.w3.org/TR/CSS21/tables.html)

use bilby_common::Result;

use crate::lang::value::{keyword, parse_length, Cursor, Env, LengthRules};
use crate::style::values::{BorderCollapse, BorderSpacing, CaptionSide, EmptyCells, TableLayout};
use crate::style::PropertyDeclaration;

use super::parse_inheritable;

const COLLAPSES: [(&str, BorderCollapse); 2] = [
    ("collapse", BorderCollapse::Collapse),
    ("separate", BorderCollapse::Separate),
];

const CAPTION_SIDES: [(&str, CaptionSide); 2] = [
    ("top", CaptionSide::Top),
    ("bottom", CaptionSide::Bottom),
];

const EMPTY_CELLS: [(&str, EmptyCells); 2] = [
    ("show", EmptyCells::Show),
    ("hide", EmptyCells::Hide),
];

const LAYOUTS: [(&str, TableLayout); 2] = [
    ("auto", TableLayout::Auto),
    ("fixed", TableLayout::Fixed),
];

/// `border-collapse: collapse | separate | inherit`
pub(super) fn border_collapse(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BorderCollapse(parse_inheritable(
        cursor,
        |c| keyword(c, &COLLAPSES),
    )?))
}

/// `border-spacing: <length> <length>? | inherit`
///
/// [§ 17.6.1] "If one length is specified, it gives both the horizontal
/// and vertical spacing. Lengths may not be negative."
pub(super) fn border_spacing(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BorderSpacing(parse_inheritable(
        cursor,
        |c| {
            let horizontal = parse_length(c, env, LengthRules::LENGTH_ONLY)?;
            c.skip_ws();
            let vertical = parse_length(c, env, LengthRules::LENGTH_ONLY).unwrap_or(horizontal);
            Ok(BorderSpacing {
                horizontal,
                vertical,
            })
        },
    )?))
}

/// `caption-side: top | bottom | inherit`
pub(super) fn caption_side(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::CaptionSide(parse_inheritable(
        cursor,
        |c| keyword(c, &CAPTION_SIDES),
    )?))
}

/// `empty-cells: show | hide | inherit`
pub(super) fn empty_cells(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::EmptyCells(parse_inheritable(
        cursor,
        |c| keyword(c, &EMPTY_CELLS),
    )?))
}

/// `table-layout: auto | fixed | inherit`
pub(super) fn table_layout(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::TableLayout(parse_inheritable(
        cursor,
        |c| keyword(c, &LAYOUTS),
    )?))
}
