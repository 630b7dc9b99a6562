//! List properties.
//!
//! [CSS 2.1 § 12.5 Lists](https://www.w3.org/TR/CSS21/generate.html#lists)

use bilby_common::{Error, Result};

use crate::lang::value::{keyword, parse_uri, Cursor, Env};
use crate::style::values::{ListStyleImage, ListStylePosition, ListStyleType};
use crate::style::{Inheritable, PropertyDeclaration};

use super::parse_inheritable;

const TYPES: [(&str, ListStyleType); 15] = [
    ("disc", ListStyleType::Disc),
    ("circle", ListStyleType::Circle),
    ("square", ListStyleType::Square),
    ("decimal", ListStyleType::Decimal),
    ("decimal-leading-zero", ListStyleType::DecimalLeadingZero),
    ("lower-roman", ListStyleType::LowerRoman),
    ("upper-roman", ListStyleType::UpperRoman),
    ("lower-greek", ListStyleType::LowerGreek),
    ("lower-latin", ListStyleType::LowerLatin),
    ("upper-latin", ListStyleType::UpperLatin),
    ("armenian", ListStyleType::Armenian),
    ("georgian", ListStyleType::Georgian),
    ("lower-alpha", ListStyleType::LowerAlpha),
    ("upper-alpha", ListStyleType::UpperAlpha),
    ("none", ListStyleType::None),
];

const POSITIONS: [(&str, ListStylePosition); 2] = [
    ("inside", ListStylePosition::Inside),
    ("outside", ListStylePosition::Outside),
];

/// `list-style-type: <type keyword> | inherit`
pub(super) fn style_type(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::ListStyleType(parse_inheritable(
        cursor,
        |c| keyword(c, &TYPES),
    )?))
}

/// `list-style-position: inside | outside | inherit`
pub(super) fn style_position(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::ListStylePosition(parse_inheritable(
        cursor,
        |c| keyword(c, &POSITIONS),
    )?))
}

/// `list-style-image: <uri> | none | inherit`
pub(super) fn style_image(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::ListStyleImage(parse_inheritable(
        cursor,
        |c| image_value(c, env),
    )?))
}

/// `list-style: [type || position || image] | inherit`
///
/// [§ 12.5.1] A lone `none` sets both type and image to none; with one
/// of them given explicitly, `none` applies to the other.
pub(super) fn shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            PropertyDeclaration::ListStyleType(Inheritable::Inherit),
            PropertyDeclaration::ListStylePosition(Inheritable::Inherit),
            PropertyDeclaration::ListStyleImage(Inheritable::Inherit),
        ]);
    }

    let mut style_type = None;
    let mut position = None;
    let mut image = None;
    let mut nones = 0u32;
    let mut matched_any = false;
    loop {
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        if cursor.try_keyword("none") {
            nones += 1;
            matched_any = true;
            continue;
        }
        if style_type.is_none() {
            if let Ok(value) = keyword(cursor, &TYPES) {
                style_type = Some(value);
                matched_any = true;
                continue;
            }
        }
        if position.is_none() {
            if let Ok(value) = keyword(cursor, &POSITIONS) {
                position = Some(value);
                matched_any = true;
                continue;
            }
        }
        if image.is_none() {
            if let Ok(uri) = parse_uri(cursor, env) {
                image = Some(ListStyleImage::Uri(uri));
                matched_any = true;
                continue;
            }
        }
        break;
    }
    if !matched_any || nones > 2 {
        return Err(Error::Invalid);
    }

    // Distribute `none` over whatever was not set explicitly.
    let mut remaining_nones = nones;
    if remaining_nones > 0 && style_type.is_none() {
        style_type = Some(ListStyleType::None);
        remaining_nones -= 1;
    }
    if remaining_nones > 0 && image.is_none() {
        image = Some(ListStyleImage::None);
        remaining_nones -= 1;
    }
    if remaining_nones > 0 {
        return Err(Error::Invalid);
    }

    Ok(vec![
        PropertyDeclaration::ListStyleType(Inheritable::Value(
            style_type.unwrap_or(ListStyleType::Disc),
        )),
        PropertyDeclaration::ListStylePosition(Inheritable::Value(
            position.unwrap_or(ListStylePosition::Outside),
        )),
        PropertyDeclaration::ListStyleImage(Inheritable::Value(
            image.unwrap_or(ListStyleImage::None),
        )),
    ])
}

/// `<uri> | none`
fn image_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<ListStyleImage> {
    if cursor.try_keyword("none") {
        return Ok(ListStyleImage::None);
    }
    parse_uri(cursor, env).map(ListStyleImage::Uri)
}
