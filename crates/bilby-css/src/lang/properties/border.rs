//! Border and outline properties.
//!
//! [CSS 2.1 § 8.5 Border properties](https://www.w3.org/TR/CSS21/box.html#border-properties)
//! and [§ 18.4 Dynamic outlines](https://www.w3.org/TR/CSS21/ui.html#dynamic-outlines).

use bilby_common::{Error, Result};

use crate::lang::value::{keyword, parse_color, parse_length, Cursor, Env, LengthRules};
use crate::style::values::{BorderColor, BorderStyle, BorderWidth, OutlineColor};
use crate::style::{Inheritable, PropertyDeclaration};

use super::{box_sides, parse_inheritable};

/// The four border edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    /// border-top-*
    Top,
    /// border-right-*
    Right,
    /// border-bottom-*
    Bottom,
    /// border-left-*
    Left,
}

const SIDES: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

const STYLES: [(&str, BorderStyle); 10] = [
    ("none", BorderStyle::None),
    ("hidden", BorderStyle::Hidden),
    ("dotted", BorderStyle::Dotted),
    ("dashed", BorderStyle::Dashed),
    ("solid", BorderStyle::Solid),
    ("double", BorderStyle::Double),
    ("groove", BorderStyle::Groove),
    ("ridge", BorderStyle::Ridge),
    ("inset", BorderStyle::Inset),
    ("outset", BorderStyle::Outset),
];

const WIDTH_KEYWORDS: [(&str, BorderWidth); 3] = [
    ("thin", BorderWidth::Thin),
    ("medium", BorderWidth::Medium),
    ("thick", BorderWidth::Thick),
];

/// `border-X-color: <color> | transparent | inherit`
pub(super) fn side_color(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    side: Side,
) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| color_value(c, env))?;
    Ok(make_color(side, value))
}

/// `border-X-style: <border-style> | inherit`
pub(super) fn side_style(cursor: &mut Cursor<'_>, side: Side) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| keyword(c, &STYLES))?;
    Ok(make_style(side, value))
}

/// `border-X-width: thin | medium | thick | <length> | inherit`
pub(super) fn side_width(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    side: Side,
) -> Result<PropertyDeclaration> {
    let value = parse_inheritable(cursor, |c| width_value(c, env))?;
    Ok(make_width(side, value))
}

/// `border-color: [<color>|transparent]{1,4} | inherit`
pub(super) fn color_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(SIDES
            .iter()
            .map(|&side| make_color(side, Inheritable::Inherit))
            .collect());
    }
    let values = collect_values(cursor, |c| color_value(c, env))?;
    let [top, right, bottom, left] = box_sides(&values)?;
    Ok(vec![
        make_color(Side::Top, Inheritable::Value(top)),
        make_color(Side::Right, Inheritable::Value(right)),
        make_color(Side::Bottom, Inheritable::Value(bottom)),
        make_color(Side::Left, Inheritable::Value(left)),
    ])
}

/// `border-style: <border-style>{1,4} | inherit`
pub(super) fn style_shorthand(cursor: &mut Cursor<'_>) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(SIDES
            .iter()
            .map(|&side| make_style(side, Inheritable::Inherit))
            .collect());
    }
    let values = collect_values(cursor, |c| keyword(c, &STYLES))?;
    let [top, right, bottom, left] = box_sides(&values)?;
    Ok(vec![
        make_style(Side::Top, Inheritable::Value(top)),
        make_style(Side::Right, Inheritable::Value(right)),
        make_style(Side::Bottom, Inheritable::Value(bottom)),
        make_style(Side::Left, Inheritable::Value(left)),
    ])
}

/// `border-width: [thin|medium|thick|<length>]{1,4} | inherit`
pub(super) fn width_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(SIDES
            .iter()
            .map(|&side| make_width(side, Inheritable::Inherit))
            .collect());
    }
    let values = collect_values(cursor, |c| width_value(c, env))?;
    let [top, right, bottom, left] = box_sides(&values)?;
    Ok(vec![
        make_width(Side::Top, Inheritable::Value(top)),
        make_width(Side::Right, Inheritable::Value(right)),
        make_width(Side::Bottom, Inheritable::Value(bottom)),
        make_width(Side::Left, Inheritable::Value(left)),
    ])
}

/// `border-top` and friends: `[width || style || color] | inherit`.
pub(super) fn side_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    side: Side,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            make_width(side, Inheritable::Inherit),
            make_style(side, Inheritable::Inherit),
            make_color(side, Inheritable::Inherit),
        ]);
    }
    let (width, style, color) = edge_components(cursor, env)?;
    Ok(vec![
        make_width(side, Inheritable::Value(width)),
        make_style(side, Inheritable::Value(style)),
        make_color(side, Inheritable::Value(color)),
    ])
}

/// `border: [width || style || color] | inherit` - sets all four edges.
///
/// [§ 8.5.4] "Unlike the shorthand 'margin' and 'padding' properties,
/// the 'border' property cannot set different values on the four
/// borders."
pub(super) fn shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(SIDES
            .iter()
            .flat_map(|&side| {
                [
                    make_width(side, Inheritable::Inherit),
                    make_style(side, Inheritable::Inherit),
                    make_color(side, Inheritable::Inherit),
                ]
            })
            .collect());
    }
    let (width, style, color) = edge_components(cursor, env)?;
    Ok(SIDES
        .iter()
        .flat_map(|&side| {
            [
                make_width(side, Inheritable::Value(width)),
                make_style(side, Inheritable::Value(style)),
                make_color(side, Inheritable::Value(color)),
            ]
        })
        .collect())
}

/// `outline-color: <color> | invert | inherit`
pub(super) fn outline_color(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::OutlineColor(parse_inheritable(
        cursor,
        |c| outline_color_value(c, env),
    )?))
}

/// `outline-style: <border-style> | inherit` (hidden excluded).
pub(super) fn outline_style(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::OutlineStyle(parse_inheritable(
        cursor,
        outline_style_value,
    )?))
}

/// `outline-width: thin | medium | thick | <length> | inherit`
pub(super) fn outline_width(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::OutlineWidth(parse_inheritable(
        cursor,
        |c| width_value(c, env),
    )?))
}

/// `outline: [color || style || width] | inherit`
pub(super) fn outline_shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            PropertyDeclaration::OutlineColor(Inheritable::Inherit),
            PropertyDeclaration::OutlineStyle(Inheritable::Inherit),
            PropertyDeclaration::OutlineWidth(Inheritable::Inherit),
        ]);
    }

    let mut color = None;
    let mut style = None;
    let mut width = None;
    let mut matched_any = false;
    loop {
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        if color.is_none() {
            if let Ok(value) = outline_color_value(cursor, env) {
                color = Some(value);
                matched_any = true;
                continue;
            }
        }
        if style.is_none() {
            if let Ok(value) = outline_style_value(cursor) {
                style = Some(value);
                matched_any = true;
                continue;
            }
        }
        if width.is_none() {
            if let Ok(value) = width_value(cursor, env) {
                width = Some(value);
                matched_any = true;
                continue;
            }
        }
        break;
    }
    if !matched_any {
        return Err(Error::Invalid);
    }
    Ok(vec![
        PropertyDeclaration::OutlineColor(Inheritable::Value(
            color.unwrap_or(OutlineColor::Invert),
        )),
        PropertyDeclaration::OutlineStyle(Inheritable::Value(style.unwrap_or(BorderStyle::None))),
        PropertyDeclaration::OutlineWidth(Inheritable::Value(width.unwrap_or(BorderWidth::Medium))),
    ])
}

/// `[width || style || color]` for one edge, any order, at least one.
fn edge_components(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<(BorderWidth, BorderStyle, BorderColor)> {
    let mut width = None;
    let mut style = None;
    let mut color = None;
    let mut matched_any = false;
    loop {
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        if width.is_none() {
            if let Ok(value) = width_value(cursor, env) {
                width = Some(value);
                matched_any = true;
                continue;
            }
        }
        if style.is_none() {
            if let Ok(value) = keyword(cursor, &STYLES) {
                style = Some(value);
                matched_any = true;
                continue;
            }
        }
        if color.is_none() {
            if let Ok(value) = color_value(cursor, env) {
                color = Some(value);
                matched_any = true;
                continue;
            }
        }
        break;
    }
    if !matched_any {
        return Err(Error::Invalid);
    }
    // "Omitted values are set to their initial values."
    Ok((
        width.unwrap_or(BorderWidth::Medium),
        style.unwrap_or(BorderStyle::None),
        color.unwrap_or(BorderColor::Current),
    ))
}

/// Collect 1-4 whitespace-separated values.
fn collect_values<T>(
    cursor: &mut Cursor<'_>,
    mut parse: impl FnMut(&mut Cursor<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut values = Vec::new();
    while values.len() < 4 {
        cursor.skip_ws();
        match parse(cursor) {
            Ok(value) => values.push(value),
            Err(_) => break,
        }
    }
    if values.is_empty() {
        Err(Error::Invalid)
    } else {
        Ok(values)
    }
}

/// `<color> | transparent`
fn color_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<BorderColor> {
    if cursor.try_keyword("transparent") {
        return Ok(BorderColor::Color(crate::style::values::Color::TRANSPARENT));
    }
    parse_color(cursor, env).map(BorderColor::Color)
}

/// `invert | <color>`
fn outline_color_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<OutlineColor> {
    if cursor.try_keyword("invert") {
        return Ok(OutlineColor::Invert);
    }
    parse_color(cursor, env).map(OutlineColor::Color)
}

/// Outline styles are border styles minus `hidden`.
fn outline_style_value(cursor: &mut Cursor<'_>) -> Result<BorderStyle> {
    let mark = cursor.mark();
    let style = keyword(cursor, &STYLES)?;
    if style == BorderStyle::Hidden {
        cursor.reset(mark);
        return Err(Error::Invalid);
    }
    Ok(style)
}

/// `thin | medium | thick | <length>` (non-negative, no percentage).
fn width_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<BorderWidth> {
    if let Ok(value) = keyword(cursor, &WIDTH_KEYWORDS) {
        return Ok(value);
    }
    parse_length(cursor, env, LengthRules::LENGTH_ONLY).map(BorderWidth::Length)
}

/// Build the color declaration for an edge.
fn make_color(side: Side, value: Inheritable<BorderColor>) -> PropertyDeclaration {
    match side {
        Side::Top => PropertyDeclaration::BorderTopColor(value),
        Side::Right => PropertyDeclaration::BorderRightColor(value),
        Side::Bottom => PropertyDeclaration::BorderBottomColor(value),
        Side::Left => PropertyDeclaration::BorderLeftColor(value),
    }
}

/// Build the style declaration for an edge.
fn make_style(side: Side, value: Inheritable<BorderStyle>) -> PropertyDeclaration {
    match side {
        Side::Top => PropertyDeclaration::BorderTopStyle(value),
        Side::Right => PropertyDeclaration::BorderRightStyle(value),
        Side::Bottom => PropertyDeclaration::BorderBottomStyle(value),
        Side::Left => PropertyDeclaration::BorderLeftStyle(value),
    }
}

/// Build the width declaration for an edge.
fn make_width(side: Side, value: Inheritable<BorderWidth>) -> PropertyDeclaration {
    match side {
        Side::Top => PropertyDeclaration::BorderTopWidth(value),
        Side::Right => PropertyDeclaration::BorderRightWidth(value),
        Side::Bottom => PropertyDeclaration::BorderBottomWidth(value),
        Side::Left => PropertyDeclaration::BorderLeftWidth(value),
    }
}
