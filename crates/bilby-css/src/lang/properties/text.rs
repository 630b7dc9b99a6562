//! Color and text properties.
//!
//! [CSS 2.1 § 14.1 Foreground color](https://www.w3.org/TR/CSS21/colors.html#colors)
//! and [§ 16 Text](https://www.w3.org/TR/CSS21/text.html).

use bilby_common::{Error, Result};

use crate::lang::value::{
    keyword, number_from_token, parse_color, parse_length, Cursor, Env, LengthRules,
};
use crate::style::values::{
    LineHeight, Spacing, TextAlign, TextDecoration, TextTransform, WhiteSpace,
};
use crate::style::PropertyDeclaration;
use crate::tokenizer::Token;

use super::parse_inheritable;

const ALIGNS: [(&str, TextAlign); 4] = [
    ("left", TextAlign::Left),
    ("right", TextAlign::Right),
    ("center", TextAlign::Center),
    ("justify", TextAlign::Justify),
];

const TRANSFORMS: [(&str, TextTransform); 4] = [
    ("capitalize", TextTransform::Capitalize),
    ("uppercase", TextTransform::Uppercase),
    ("lowercase", TextTransform::Lowercase),
    ("none", TextTransform::None),
];

const WHITE_SPACES: [(&str, WhiteSpace); 5] = [
    ("normal", WhiteSpace::Normal),
    ("pre", WhiteSpace::Pre),
    ("nowrap", WhiteSpace::Nowrap),
    ("pre-wrap", WhiteSpace::PreWrap),
    ("pre-line", WhiteSpace::PreLine),
];

/// `color: <color> | inherit`
pub(super) fn color(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Color(parse_inheritable(cursor, |c| {
        parse_color(c, env)
    })?))
}

/// `letter-spacing: normal | <length> | inherit`
pub(super) fn letter_spacing(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::LetterSpacing(parse_inheritable(
        cursor,
        |c| spacing_value(c, env),
    )?))
}

/// `word-spacing: normal | <length> | inherit`
pub(super) fn word_spacing(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::WordSpacing(parse_inheritable(
        cursor,
        |c| spacing_value(c, env),
    )?))
}

/// `line-height: normal | <number> | <length> | <percentage> | inherit`
pub(super) fn line_height(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::LineHeight(parse_inheritable(
        cursor,
        |c| line_height_value(c, env),
    )?))
}

/// The `line-height` value grammar, shared with the `font` shorthand.
pub(super) fn line_height_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<LineHeight> {
    if cursor.try_keyword("normal") {
        return Ok(LineHeight::Normal);
    }
    // A bare number must be tried before the length parser, which would
    // otherwise claim it in quirks mode. "Negative values are illegal."
    if let Token::Number(text) = cursor.peek() {
        let text = text.clone();
        if let Ok(value) = number_from_token(&text) {
            if !value.is_negative() {
                let _ = cursor.next();
                return Ok(LineHeight::Number(value));
            }
        }
        return Err(Error::Invalid);
    }
    parse_length(cursor, env, LengthRules::NON_NEGATIVE).map(LineHeight::Length)
}

/// `text-align: left | right | center | justify | inherit`
pub(super) fn text_align(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::TextAlign(parse_inheritable(
        cursor,
        |c| keyword(c, &ALIGNS),
    )?))
}

/// `text-decoration: none | [underline || overline || line-through ||
/// blink] | inherit`
pub(super) fn text_decoration(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::TextDecoration(parse_inheritable(
        cursor,
        decoration_value,
    )?))
}

fn decoration_value(cursor: &mut Cursor<'_>) -> Result<TextDecoration> {
    if cursor.try_keyword("none") {
        return Ok(TextDecoration::NONE);
    }
    let mut value = TextDecoration::NONE;
    let mut matched_any = false;
    loop {
        cursor.skip_ws();
        if cursor.try_keyword("underline") {
            value.underline = true;
        } else if cursor.try_keyword("overline") {
            value.overline = true;
        } else if cursor.try_keyword("line-through") {
            value.line_through = true;
        } else if cursor.try_keyword("blink") {
            value.blink = true;
        } else {
            break;
        }
        matched_any = true;
    }
    if matched_any {
        Ok(value)
    } else {
        Err(Error::Invalid)
    }
}

/// `text-indent: <length> | <percentage> | inherit`
pub(super) fn text_indent(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::TextIndent(parse_inheritable(
        cursor,
        |c| parse_length(c, env, LengthRules::ANY),
    )?))
}

/// `text-transform: capitalize | uppercase | lowercase | none | inherit`
pub(super) fn text_transform(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::TextTransform(parse_inheritable(
        cursor,
        |c| keyword(c, &TRANSFORMS),
    )?))
}

/// `white-space: normal | pre | nowrap | pre-wrap | pre-line | inherit`
pub(super) fn white_space(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::WhiteSpace(parse_inheritable(
        cursor,
        |c| keyword(c, &WHITE_SPACES),
    )?))
}

/// `normal | <length>` - spacing takes no percentages.
fn spacing_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Spacing> {
    if cursor.try_keyword("normal") {
        return Ok(Spacing::Normal);
    }
    parse_length(
        cursor,
        env,
        LengthRules {
            negative: true,
            percent: false,
        },
    )
    .map(Spacing::Length)
}
