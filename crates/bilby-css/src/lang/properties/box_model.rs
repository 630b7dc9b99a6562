//! Box model, positioning, and visual-effect properties.
//!
//! [CSS 2.1 § 8 Box model](https://www.w3.org/TR/CSS21/box.html),
//! [§ 9 Visual formatting model](https://www.w3.org/TR/CSS21/visuren.html),
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS21/visudet.html),
//! [§ 11 Visual effects](https://www.w3.org/TR/CSS21/visufx.html).

use bilby_common::{Error, Result};

use crate::lang::value::{
    keyword, parse_integer, parse_length, Cursor, Env, LengthRules,
};
use crate::style::values::{
    Clear, Clip, ClipEdge, ClipRect, Direction, Display, Float, Length, LengthAuto, LengthNone,
    Overflow, Position, UnicodeBidi, VerticalAlign, Visibility, ZIndex,
};
use crate::style::{Inheritable, PropertyDeclaration};

use super::{box_sides, parse_inheritable};

/// The four box edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Edge {
    /// *-top
    Top,
    /// *-right
    Right,
    /// *-bottom
    Bottom,
    /// *-left
    Left,
}

const DISPLAYS: [(&str, Display); 16] = [
    ("inline", Display::Inline),
    ("block", Display::Block),
    ("list-item", Display::ListItem),
    ("run-in", Display::RunIn),
    ("inline-block", Display::InlineBlock),
    ("table", Display::Table),
    ("inline-table", Display::InlineTable),
    ("table-row-group", Display::TableRowGroup),
    ("table-header-group", Display::TableHeaderGroup),
    ("table-footer-group", Display::TableFooterGroup),
    ("table-row", Display::TableRow),
    ("table-column-group", Display::TableColumnGroup),
    ("table-column", Display::TableColumn),
    ("table-cell", Display::TableCell),
    ("table-caption", Display::TableCaption),
    ("none", Display::None),
];

const POSITIONS: [(&str, Position); 4] = [
    ("static", Position::Static),
    ("relative", Position::Relative),
    ("absolute", Position::Absolute),
    ("fixed", Position::Fixed),
];

const FLOATS: [(&str, Float); 3] = [
    ("left", Float::Left),
    ("right", Float::Right),
    ("none", Float::None),
];

const CLEARS: [(&str, Clear); 4] = [
    ("none", Clear::None),
    ("left", Clear::Left),
    ("right", Clear::Right),
    ("both", Clear::Both),
];

const OVERFLOWS: [(&str, Overflow); 4] = [
    ("visible", Overflow::Visible),
    ("hidden", Overflow::Hidden),
    ("scroll", Overflow::Scroll),
    ("auto", Overflow::Auto),
];

const VISIBILITIES: [(&str, Visibility); 3] = [
    ("visible", Visibility::Visible),
    ("hidden", Visibility::Hidden),
    ("collapse", Visibility::Collapse),
];

const DIRECTIONS: [(&str, Direction); 2] = [("ltr", Direction::Ltr), ("rtl", Direction::Rtl)];

const UNICODE_BIDIS: [(&str, UnicodeBidi); 3] = [
    ("normal", UnicodeBidi::Normal),
    ("embed", UnicodeBidi::Embed),
    ("bidi-override", UnicodeBidi::BidiOverride),
];

const VERTICAL_ALIGNS: [(&str, VerticalAlign); 8] = [
    ("baseline", VerticalAlign::Baseline),
    ("sub", VerticalAlign::Sub),
    ("super", VerticalAlign::Super),
    ("top", VerticalAlign::Top),
    ("text-top", VerticalAlign::TextTop),
    ("middle", VerticalAlign::Middle),
    ("bottom", VerticalAlign::Bottom),
    ("text-bottom", VerticalAlign::TextBottom),
];

/// `margin-X: <margin-width> | inherit`
pub(super) fn margin(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    edge: Edge,
) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| length_auto(c, env, LengthRules::ANY))?;
    Ok(make_margin(edge, value))
}

/// `margin: <margin-width>{1,4} | inherit`
pub(super) fn margin_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            make_margin(Edge::Top, Inheritable::Inherit),
            make_margin(Edge::Right, Inheritable::Inherit),
            make_margin(Edge::Bottom, Inheritable::Inherit),
            make_margin(Edge::Left, Inheritable::Inherit),
        ]);
    }
    let mut values = Vec::new();
    while values.len() < 4 {
        cursor.skip_ws();
        match length_auto(cursor, env, LengthRules::ANY) {
            Ok(value) => values.push(value),
            Err(_) => break,
        }
    }
    let [top, right, bottom, left] = box_sides(&values)?;
    Ok(vec![
        make_margin(Edge::Top, Inheritable::Value(top)),
        make_margin(Edge::Right, Inheritable::Value(right)),
        make_margin(Edge::Bottom, Inheritable::Value(bottom)),
        make_margin(Edge::Left, Inheritable::Value(left)),
    ])
}

/// `padding-X: <padding-width> | inherit` (no negative, no auto)
pub(super) fn padding(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    edge: Edge,
) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| parse_length(c, env, LengthRules::NON_NEGATIVE))?;
    Ok(make_padding(edge, value))
}

/// `padding: <padding-width>{1,4} | inherit`
pub(super) fn padding_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            make_padding(Edge::Top, Inheritable::Inherit),
            make_padding(Edge::Right, Inheritable::Inherit),
            make_padding(Edge::Bottom, Inheritable::Inherit),
            make_padding(Edge::Left, Inheritable::Inherit),
        ]);
    }
    let mut values = Vec::new();
    while values.len() < 4 {
        cursor.skip_ws();
        match parse_length(cursor, env, LengthRules::NON_NEGATIVE) {
            Ok(value) => values.push(value),
            Err(_) => break,
        }
    }
    let [top, right, bottom, left] = box_sides(&values)?;
    Ok(vec![
        make_padding(Edge::Top, Inheritable::Value(top)),
        make_padding(Edge::Right, Inheritable::Value(right)),
        make_padding(Edge::Bottom, Inheritable::Value(bottom)),
        make_padding(Edge::Left, Inheritable::Value(left)),
    ])
}

/// `top/right/bottom/left: <length> | <percentage> | auto | inherit`
///
/// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#position-props)
pub(super) fn offset(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    edge: Edge,
) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| length_auto(c, env, LengthRules::ANY))?;
    Ok(match edge {
        Edge::Top => PropertyDeclaration::Top(value),
        Edge::Right => PropertyDeclaration::Right(value),
        Edge::Bottom => PropertyDeclaration::Bottom(value),
        Edge::Left => PropertyDeclaration::Left(value),
    })
}

/// `width: <length> | <percentage> | auto | inherit` (non-negative)
pub(super) fn width(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Width(parse_inheritable(cursor, |c| {
        length_auto(c, env, LengthRules::NON_NEGATIVE)
    })?))
}

/// `height: <length> | <percentage> | auto | inherit` (non-negative)
pub(super) fn height(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Height(parse_inheritable(cursor, |c| {
        length_auto(c, env, LengthRules::NON_NEGATIVE)
    })?))
}

/// `min-width: <length> | <percentage> | inherit`
pub(super) fn min_width(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::MinWidth(parse_inheritable(
        cursor,
        |c| parse_length(c, env, LengthRules::NON_NEGATIVE),
    )?))
}

/// `min-height: <length> | <percentage> | inherit`
pub(super) fn min_height(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::MinHeight(parse_inheritable(
        cursor,
        |c| parse_length(c, env, LengthRules::NON_NEGATIVE),
    )?))
}

/// `max-width: <length> | <percentage> | none | inherit`
pub(super) fn max_width(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::MaxWidth(parse_inheritable(
        cursor,
        |c| length_none(c, env),
    )?))
}

/// `max-height: <length> | <percentage> | none | inherit`
pub(super) fn max_height(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::MaxHeight(parse_inheritable(
        cursor,
        |c| length_none(c, env),
    )?))
}

/// `display: <display> | inherit`
pub(super) fn display(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Display(parse_inheritable(cursor, |c| {
        keyword(c, &DISPLAYS)
    })?))
}

/// `position: static | relative | absolute | fixed | inherit`
pub(super) fn position(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Position(parse_inheritable(
        cursor,
        |c| keyword(c, &POSITIONS),
    )?))
}

/// `float: left | right | none | inherit`
pub(super) fn float(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Float(parse_inheritable(cursor, |c| {
        keyword(c, &FLOATS)
    })?))
}

/// `clear: none | left | right | both | inherit`
pub(super) fn clear(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Clear(parse_inheritable(cursor, |c| {
        keyword(c, &CLEARS)
    })?))
}

/// `z-index: auto | <integer> | inherit`
pub(super) fn z_index(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::ZIndex(parse_inheritable(cursor, |c| {
        if c.try_keyword("auto") {
            Ok(ZIndex::Auto)
        } else {
            parse_integer(c).map(ZIndex::Integer)
        }
    })?))
}

/// `direction: ltr | rtl | inherit`
pub(super) fn direction(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Direction(parse_inheritable(
        cursor,
        |c| keyword(c, &DIRECTIONS),
    )?))
}

/// `unicode-bidi: normal | embed | bidi-override | inherit`
pub(super) fn unicode_bidi(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::UnicodeBidi(parse_inheritable(
        cursor,
        |c| keyword(c, &UNICODE_BIDIS),
    )?))
}

/// `overflow: visible | hidden | scroll | auto | inherit`
pub(super) fn overflow(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Overflow(parse_inheritable(
        cursor,
        |c| keyword(c, &OVERFLOWS),
    )?))
}

/// `visibility: visible | hidden | collapse | inherit`
pub(super) fn visibility(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Visibility(parse_inheritable(
        cursor,
        |c| keyword(c, &VISIBILITIES),
    )?))
}

/// `clip: <shape> | auto | inherit`
///
/// [§ 11.1.2] "In CSS 2.1, the only valid <shape> value is:
/// rect(<top>, <right>, <bottom>, <left>)". The comma-less form also
/// found in legacy content is accepted too.
pub(super) fn clip(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Clip(parse_inheritable(cursor, |c| {
        clip_value(c, env)
    })?))
}

fn clip_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Clip> {
    if cursor.try_keyword("auto") {
        return Ok(Clip::Auto);
    }
    let mark = cursor.mark();
    let result = clip_rect(cursor, env);
    if result.is_err() {
        cursor.reset(mark);
    }
    result
}

fn clip_rect(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Clip> {
    match cursor.next() {
        crate::tokenizer::Token::Function(name) if name.eq_str_ignore_ascii_case("rect") => {}
        _ => return Err(Error::Invalid),
    }
    let mut edges = [ClipEdge::Auto; 4];
    for (i, edge) in edges.iter_mut().enumerate() {
        cursor.skip_ws();
        if i > 0 {
            // Commas are optional between offsets.
            if cursor.expect_char(',').is_ok() {
                cursor.skip_ws();
            }
        }
        *edge = if cursor.try_keyword("auto") {
            ClipEdge::Auto
        } else {
            ClipEdge::Length(parse_length(cursor, env, LengthRules::ANY)?)
        };
    }
    cursor.skip_ws();
    cursor.expect_char(')')?;
    Ok(Clip::Rect(ClipRect {
        top: edges[0],
        right: edges[1],
        bottom: edges[2],
        left: edges[3],
    }))
}

/// `vertical-align: keyword | <percentage> | <length> | inherit`
pub(super) fn vertical_align(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::VerticalAlign(parse_inheritable(
        cursor,
        |c| {
            if let Ok(value) = keyword(c, &VERTICAL_ALIGNS) {
                return Ok(value);
            }
            parse_length(c, env, LengthRules::ANY).map(VerticalAlign::Length)
        },
    )?))
}

/// `auto | <length> | <percentage>`
fn length_auto(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    rules: LengthRules,
) -> Result<LengthAuto> {
    if cursor.try_keyword("auto") {
        return Ok(LengthAuto::Auto);
    }
    parse_length(cursor, env, rules).map(LengthAuto::Length)
}

/// `none | <length> | <percentage>`
fn length_none(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<LengthNone> {
    if cursor.try_keyword("none") {
        return Ok(LengthNone::None);
    }
    parse_length(cursor, env, LengthRules::NON_NEGATIVE).map(LengthNone::Length)
}

/// Build a margin declaration for an edge.
fn make_margin(edge: Edge, value: Inheritable<LengthAuto>) -> PropertyDeclaration {
    match edge {
        Edge::Top => PropertyDeclaration::MarginTop(value),
        Edge::Right => PropertyDeclaration::MarginRight(value),
        Edge::Bottom => PropertyDeclaration::MarginBottom(value),
        Edge::Left => PropertyDeclaration::MarginLeft(value),
    }
}

/// Build a padding declaration for an edge.
fn make_padding(edge: Edge, value: Inheritable<Length>) -> PropertyDeclaration {
    match edge {
        Edge::Top => PropertyDeclaration::PaddingTop(value),
        Edge::Right => PropertyDeclaration::PaddingRight(value),
        Edge::Bottom => PropertyDeclaration::PaddingBottom(value),
        Edge::Left => PropertyDeclaration::PaddingLeft(value),
    }
}
