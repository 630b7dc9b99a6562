//! Background properties.
//!
//! [CSS 2.1 § 14.2.1 Background properties](https://www.w3.org/TR/CSS21/colors.html#background-properties)

use bilby_common::{Error, Fixed, Result};

use crate::lang::value::{keyword, parse_color, parse_length, parse_uri, Cursor, Env, LengthRules};
use crate::style::values::{
    BackgroundAttachment, BackgroundColor, BackgroundImage, BackgroundPosition, BackgroundRepeat,
    Length, Unit,
};
use crate::style::{Inheritable, PropertyDeclaration};

use super::parse_inheritable;

const ATTACHMENTS: [(&str, BackgroundAttachment); 2] = [
    ("scroll", BackgroundAttachment::Scroll),
    ("fixed", BackgroundAttachment::Fixed),
];

const REPEATS: [(&str, BackgroundRepeat); 4] = [
    ("repeat", BackgroundRepeat::Repeat),
    ("repeat-x", BackgroundRepeat::RepeatX),
    ("repeat-y", BackgroundRepeat::RepeatY),
    ("no-repeat", BackgroundRepeat::NoRepeat),
];

/// `background-attachment: scroll | fixed | inherit`
pub(super) fn attachment(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BackgroundAttachment(
        parse_inheritable(cursor, |c| keyword(c, &ATTACHMENTS))?,
    ))
}

/// `background-color: <color> | transparent | inherit`
pub(super) fn color(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BackgroundColor(parse_inheritable(
        cursor,
        |c| color_value(c, env),
    )?))
}

/// `background-image: <uri> | none | inherit`
pub(super) fn image(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BackgroundImage(parse_inheritable(
        cursor,
        |c| image_value(c, env),
    )?))
}

/// `background-repeat: repeat | repeat-x | repeat-y | no-repeat | inherit`
pub(super) fn repeat(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BackgroundRepeat(parse_inheritable(
        cursor,
        |c| keyword(c, &REPEATS),
    )?))
}

/// `background-position` per the § 14.2.1 grammar.
pub(super) fn position(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::BackgroundPosition(parse_inheritable(
        cursor,
        |c| position_value(c, env),
    )?))
}

/// `background` shorthand: `[color || image || repeat || attachment ||
/// position] | inherit`.
pub(super) fn shorthand(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<Vec<PropertyDeclaration>> {
    if cursor.try_keyword("inherit") {
        return Ok(vec![
            PropertyDeclaration::BackgroundColor(Inheritable::Inherit),
            PropertyDeclaration::BackgroundImage(Inheritable::Inherit),
            PropertyDeclaration::BackgroundRepeat(Inheritable::Inherit),
            PropertyDeclaration::BackgroundAttachment(Inheritable::Inherit),
            PropertyDeclaration::BackgroundPosition(Inheritable::Inherit),
        ]);
    }

    let mut color = None;
    let mut image = None;
    let mut repeat = None;
    let mut attachment = None;
    let mut position = None;
    let mut matched_any = false;

    loop {
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        if color.is_none() {
            if let Ok(value) = color_value(cursor, env) {
                color = Some(value);
                matched_any = true;
                continue;
            }
        }
        if image.is_none() {
            if let Ok(value) = image_value(cursor, env) {
                image = Some(value);
                matched_any = true;
                continue;
            }
        }
        if repeat.is_none() {
            if let Ok(value) = keyword(cursor, &REPEATS) {
                repeat = Some(value);
                matched_any = true;
                continue;
            }
        }
        if attachment.is_none() {
            if let Ok(value) = keyword(cursor, &ATTACHMENTS) {
                attachment = Some(value);
                matched_any = true;
                continue;
            }
        }
        if position.is_none() {
            if let Ok(value) = position_value(cursor, env) {
                position = Some(value);
                matched_any = true;
                continue;
            }
        }
        break;
    }

    if !matched_any {
        return Err(Error::Invalid);
    }

    // "Given a valid declaration, the 'background' property first sets
    // all the individual background properties to their initial values,
    // then assigns explicit values given in the declaration."
    Ok(vec![
        PropertyDeclaration::BackgroundColor(Inheritable::Value(
            color.unwrap_or(BackgroundColor::Transparent),
        )),
        PropertyDeclaration::BackgroundImage(Inheritable::Value(
            image.unwrap_or(BackgroundImage::None),
        )),
        PropertyDeclaration::BackgroundRepeat(Inheritable::Value(
            repeat.unwrap_or(BackgroundRepeat::Repeat),
        )),
        PropertyDeclaration::BackgroundAttachment(Inheritable::Value(
            attachment.unwrap_or(BackgroundAttachment::Scroll),
        )),
        PropertyDeclaration::BackgroundPosition(Inheritable::Value(
            position.unwrap_or(BackgroundPosition {
                horizontal: percent(0),
                vertical: percent(0),
            }),
        )),
    ])
}

/// `<color> | transparent`
fn color_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<BackgroundColor> {
    if cursor.try_keyword("transparent") {
        return Ok(BackgroundColor::Transparent);
    }
    parse_color(cursor, env).map(BackgroundColor::Color)
}

/// `<uri> | none`
fn image_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<BackgroundImage> {
    if cursor.try_keyword("none") {
        return Ok(BackgroundImage::None);
    }
    parse_uri(cursor, env).map(BackgroundImage::Uri)
}

/// A percentage length.
fn percent(value: i32) -> Length {
    Length::new(Fixed::from_int(value), Unit::Percent)
}

/// One position term.
enum Term {
    Len(Length),
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

fn position_term(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Term> {
    if cursor.try_keyword("left") {
        return Ok(Term::Left);
    }
    if cursor.try_keyword("right") {
        return Ok(Term::Right);
    }
    if cursor.try_keyword("top") {
        return Ok(Term::Top);
    }
    if cursor.try_keyword("bottom") {
        return Ok(Term::Bottom);
    }
    if cursor.try_keyword("center") {
        return Ok(Term::Center);
    }
    parse_length(cursor, env, LengthRules::ANY).map(Term::Len)
}

/// [§ 14.2.1 'background-position']
///
/// `[<percentage>|<length>|left|center|right]
///  [<percentage>|<length>|top|center|bottom]?`
/// or the two keywords in either order. Keywords are stored as their
/// percentage equivalents: "'center' is equivalent to '50%'".
fn position_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<BackgroundPosition> {
    let mark = cursor.mark();
    let first = position_term(cursor, env)?;
    cursor.skip_ws();
    let second = position_term(cursor, env).ok();

    let resolved = match (&first, &second) {
        // Single value: "the second value is assumed to be 'center'".
        (term, None) => match term {
            Term::Len(len) => Some((*len, percent(50))),
            Term::Left => Some((percent(0), percent(50))),
            Term::Right => Some((percent(100), percent(50))),
            Term::Center => Some((percent(50), percent(50))),
            Term::Top => Some((percent(50), percent(0))),
            Term::Bottom => Some((percent(50), percent(100))),
        },
        // Keyword pair, either order.
        (a, Some(b)) if !matches!(a, Term::Len(_)) && !matches!(b, Term::Len(_)) => {
            keyword_pair(a, b)
        }
        // Positional pair: horizontal then vertical.
        (a, Some(b)) => {
            let horizontal = match a {
                Term::Len(len) => Some(*len),
                Term::Left => Some(percent(0)),
                Term::Center => Some(percent(50)),
                Term::Right => Some(percent(100)),
                Term::Top | Term::Bottom => None,
            };
            let vertical = match b {
                Term::Len(len) => Some(*len),
                Term::Top => Some(percent(0)),
                Term::Center => Some(percent(50)),
                Term::Bottom => Some(percent(100)),
                Term::Left | Term::Right => None,
            };
            match (horizontal, vertical) {
                (Some(h), Some(v)) => Some((h, v)),
                _ => None,
            }
        }
    };

    match resolved {
        Some((horizontal, vertical)) => Ok(BackgroundPosition {
            horizontal,
            vertical,
        }),
        None => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
    }
}

/// Resolve a two-keyword position, accepting either order.
fn keyword_pair(a: &Term, b: &Term) -> Option<(Length, Length)> {
    let mut horizontal = None;
    let mut vertical = None;
    let mut centers = 0u32;
    for term in [a, b] {
        match term {
            Term::Left if horizontal.is_none() => horizontal = Some(percent(0)),
            Term::Right if horizontal.is_none() => horizontal = Some(percent(100)),
            Term::Top if vertical.is_none() => vertical = Some(percent(0)),
            Term::Bottom if vertical.is_none() => vertical = Some(percent(100)),
            Term::Center => centers += 1,
            _ => return None,
        }
    }
    for _ in 0..centers {
        if horizontal.is_none() {
            horizontal = Some(percent(50));
        } else if vertical.is_none() {
            vertical = Some(percent(50));
        }
    }
    Some((
        horizontal.unwrap_or_else(|| percent(50)),
        vertical.unwrap_or_else(|| percent(50)),
    ))
}
