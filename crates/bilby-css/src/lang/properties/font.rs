//! Font properties.
//!
//! [CSS 2.1 § 15 Fonts](https://www.w3.org/TR/CSS21/fonts.html)

use bilby_common::{Error, Result};

use crate::lang::value::{
    integer_from_token, keyword, parse_length, Cursor, Env, LengthRules,
};
use crate::style::values::{
    FontFamily, FontSizeValue, FontStyle, FontVariant, FontWeight, LineHeight,
};
use crate::style::{Inheritable, PropertyDeclaration};
use crate::tokenizer::Token;

use super::parse_inheritable;
use crate::lang::properties::text::line_height_value;

const STYLES: [(&str, FontStyle); 3] = [
    ("normal", FontStyle::Normal),
    ("italic", FontStyle::Italic),
    ("oblique", FontStyle::Oblique),
];

const VARIANTS: [(&str, FontVariant); 2] = [
    ("normal", FontVariant::Normal),
    ("small-caps", FontVariant::SmallCaps),
];

const WEIGHT_KEYWORDS: [(&str, FontWeight); 4] = [
    ("normal", FontWeight::Normal),
    ("bold", FontWeight::Bold),
    ("bolder", FontWeight::Bolder),
    ("lighter", FontWeight::Lighter),
];

const SIZE_KEYWORDS: [(&str, FontSizeValue); 9] = [
    ("xx-small", FontSizeValue::XxSmall),
    ("x-small", FontSizeValue::XSmall),
    ("small", FontSizeValue::Small),
    ("medium", FontSizeValue::Medium),
    ("large", FontSizeValue::Large),
    ("x-large", FontSizeValue::XLarge),
    ("xx-large", FontSizeValue::XxLarge),
    ("larger", FontSizeValue::Larger),
    ("smaller", FontSizeValue::Smaller),
];

const GENERIC_FAMILIES: [(&str, FontFamily); 5] = [
    ("serif", FontFamily::Serif),
    ("sans-serif", FontFamily::SansSerif),
    ("cursive", FontFamily::Cursive),
    ("fantasy", FontFamily::Fantasy),
    ("monospace", FontFamily::Monospace),
];

/// `font-family: [[<family-name> | <generic-family>],]* ... | inherit`
pub(super) fn family(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::FontFamily(parse_inheritable(
        cursor,
        |c| family_list(c, env),
    )?))
}

/// `font-size: <absolute-size> | <relative-size> | <length> |
/// <percentage> | inherit`
pub(super) fn size(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::FontSize(parse_inheritable(
        cursor,
        |c| size_value(c, env),
    )?))
}

/// `font-style: normal | italic | oblique | inherit`
pub(super) fn style(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::FontStyle(parse_inheritable(
        cursor,
        |c| keyword(c, &STYLES),
    )?))
}

/// `font-variant: normal | small-caps | inherit`
pub(super) fn variant(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::FontVariant(parse_inheritable(
        cursor,
        |c| keyword(c, &VARIANTS),
    )?))
}

/// `font-weight: normal | bold | bolder | lighter | 100..900 | inherit`
pub(super) fn weight(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::FontWeight(parse_inheritable(
        cursor,
        weight_value,
    )?))
}

/// `font` shorthand:
/// `[ <font-style> || <font-variant> || <font-weight> ]? <font-size>
///  [ / <line-height> ]? <font-family> | inherit`
///
/// The system-font keywords (`caption`, `icon`, ...) are not supported;
/// they invalidate the declaration like any unknown value.
pub(super) fn shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            PropertyDeclaration::FontStyle(Inheritable::Inherit),
            PropertyDeclaration::FontVariant(Inheritable::Inherit),
            PropertyDeclaration::FontWeight(Inheritable::Inherit),
            PropertyDeclaration::FontSize(Inheritable::Inherit),
            PropertyDeclaration::LineHeight(Inheritable::Inherit),
            PropertyDeclaration::FontFamily(Inheritable::Inherit),
        ]);
    }

    let mut font_style = None;
    let mut font_variant = None;
    let mut font_weight = None;

    // Up to three leading components; "normal" may satisfy any of them.
    for _ in 0..3 {
        cursor.skip_ws();
        if cursor.try_keyword("normal") {
            continue;
        }
        if font_style.is_none() {
            if let Ok(value) = keyword(cursor, &STYLES) {
                font_style = Some(value);
                continue;
            }
        }
        if font_variant.is_none() {
            if let Ok(value) = keyword(cursor, &VARIANTS) {
                font_variant = Some(value);
                continue;
            }
        }
        if font_weight.is_none() {
            if let Ok(value) = weight_value(cursor) {
                font_weight = Some(value);
                continue;
            }
        }
        break;
    }

    cursor.skip_ws();
    let size = size_value(cursor, env)?;

    cursor.skip_ws();
    let line_height = if cursor.expect_char('/').is_ok() {
        cursor.skip_ws();
        Some(line_height_value(cursor, env)?)
    } else {
        None
    };

    cursor.skip_ws();
    let families = family_list(cursor, env)?;

    Ok(vec![
        PropertyDeclaration::FontStyle(Inheritable::Value(
            font_style.unwrap_or(FontStyle::Normal),
        )),
        PropertyDeclaration::FontVariant(Inheritable::Value(
            font_variant.unwrap_or(FontVariant::Normal),
        )),
        PropertyDeclaration::FontWeight(Inheritable::Value(
            font_weight.unwrap_or(FontWeight::Normal),
        )),
        PropertyDeclaration::FontSize(Inheritable::Value(size)),
        PropertyDeclaration::LineHeight(Inheritable::Value(
            line_height.unwrap_or(LineHeight::Normal),
        )),
        PropertyDeclaration::FontFamily(Inheritable::Value(families)),
    ])
}

/// One or more families, comma-separated.
///
/// [§ 15.3] "Font family names must either be given quoted as strings,
/// or unquoted as a sequence of one or more identifiers"; unquoted
/// multi-word names are joined with single spaces.
fn family_list(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Vec<FontFamily>> {
    let mut families = Vec::new();
    loop {
        cursor.skip_ws();
        let family = family_name(cursor, env)?;
        families.push(family);
        cursor.skip_ws();
        if cursor.expect_char(',').is_err() {
            break;
        }
    }
    Ok(families)
}

fn family_name(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<FontFamily> {
    // Quoted name.
    if let Token::String(name) = cursor.peek() {
        let name = name.clone();
        let _ = cursor.next();
        return Ok(FontFamily::Named(name));
    }

    // Identifier sequence; a lone identifier may be a generic family.
    let mark = cursor.mark();
    let mut words: Vec<String> = Vec::new();
    loop {
        match cursor.peek() {
            Token::Ident(word) => {
                words.push(word.as_str().to_owned());
                let _ = cursor.next();
                cursor.skip_ws();
            }
            _ => break,
        }
    }
    match words.len() {
        0 => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
        1 => {
            for (name, generic) in &GENERIC_FAMILIES {
                if words[0].eq_ignore_ascii_case(name) {
                    return Ok(generic.clone());
                }
            }
            Ok(FontFamily::Named(env.intern(&words[0])))
        }
        _ => Ok(FontFamily::Named(env.intern(&words.join(" ")))),
    }
}

fn size_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<FontSizeValue> {
    if let Ok(value) = keyword(cursor, &SIZE_KEYWORDS) {
        return Ok(value);
    }
    parse_length(cursor, env, LengthRules::NON_NEGATIVE).map(FontSizeValue::Length)
}

fn weight_value(cursor: &mut Cursor<'_>) -> Result<FontWeight> {
    if let Ok(value) = keyword(cursor, &WEIGHT_KEYWORDS) {
        return Ok(value);
    }
    let mark = cursor.mark();
    match cursor.next() {
        Token::Number(text) => {
            let weight = match integer_from_token(&text) {
                Ok(100) => Some(FontWeight::W100),
                Ok(200) => Some(FontWeight::W200),
                Ok(300) => Some(FontWeight::W300),
                Ok(400) => Some(FontWeight::W400),
                Ok(500) => Some(FontWeight::W500),
                Ok(600) => Some(FontWeight::W600),
                Ok(700) => Some(FontWeight::W700),
                Ok(800) => Some(FontWeight::W800),
                Ok(900) => Some(FontWeight::W900),
                _ => None,
            };
            match weight {
                Some(weight) => Ok(weight),
                None => {
                    cursor.reset(mark);
                    Err(Error::Invalid)
                }
            }
        }
        _ => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
    }
}
