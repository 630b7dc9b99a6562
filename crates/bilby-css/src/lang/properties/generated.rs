//! Generated content, counters, quotes, and cursors.
//!
//! [CSS 2.1 § 12 Generated content](https://www.w3.org/TR/CSS21/generate.html)
//! and [§ 18.1 Cursors](https://www.w3.org/TR/CSS21/ui.html#cursor-props).

use bilby_common::{Error, Result};

use crate::lang::value::{keyword, parse_integer, parse_string, parse_uri, Cursor, Env};
use crate::style::values::{
    Content, ContentItem, CounterDelta, CounterUpdate, Cursor as CursorValue, CursorKind,
    QuotePair, Quotes,
};
use crate::style::PropertyDeclaration;
use crate::tokenizer::Token;

use super::parse_inheritable;

const CURSOR_KINDS: [(&str, CursorKind); 17] = [
    ("auto", CursorKind::Auto),
    ("crosshair", CursorKind::Crosshair),
    ("default", CursorKind::Default),
    ("pointer", CursorKind::Pointer),
    ("move", CursorKind::Move),
    ("e-resize", CursorKind::EResize),
    ("ne-resize", CursorKind::NeResize),
    ("nw-resize", CursorKind::NwResize),
    ("n-resize", CursorKind::NResize),
    ("se-resize", CursorKind::SeResize),
    ("sw-resize", CursorKind::SwResize),
    ("s-resize", CursorKind::SResize),
    ("w-resize", CursorKind::WResize),
    ("text", CursorKind::Text),
    ("wait", CursorKind::Wait),
    ("help", CursorKind::Help),
    ("progress", CursorKind::Progress),
];

/// `content: normal | none | [...]+ | inherit`
pub(super) fn content(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Content(parse_inheritable(
        cursor,
        |c| content_value(c, env),
    )?))
}

fn content_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Content> {
    if cursor.try_keyword("normal") {
        return Ok(Content::Normal);
    }
    if cursor.try_keyword("none") {
        return Ok(Content::None);
    }

    let mut items = Vec::new();
    loop {
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        match content_item(cursor, env) {
            Ok(item) => items.push(item),
            Err(_) => break,
        }
    }
    if items.is_empty() {
        Err(Error::Invalid)
    } else {
        Ok(Content::Items(items))
    }
}

/// One content item:
/// `<string> | <uri> | <counter> | attr(X) | open-quote | close-quote |
/// no-open-quote | no-close-quote`
fn content_item(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<ContentItem> {
    if cursor.try_keyword("open-quote") {
        return Ok(ContentItem::OpenQuote);
    }
    if cursor.try_keyword("close-quote") {
        return Ok(ContentItem::CloseQuote);
    }
    if cursor.try_keyword("no-open-quote") {
        return Ok(ContentItem::NoOpenQuote);
    }
    if cursor.try_keyword("no-close-quote") {
        return Ok(ContentItem::NoCloseQuote);
    }
    if let Ok(text) = parse_string(cursor) {
        return Ok(ContentItem::String(text));
    }
    if let Ok(uri) = parse_uri(cursor, env) {
        return Ok(ContentItem::Uri(uri));
    }

    let mark = cursor.mark();
    let result = match cursor.next() {
        Token::Function(name) if name.eq_str_ignore_ascii_case("attr") => {
            attr_args(cursor)
        }
        Token::Function(name) if name.eq_str_ignore_ascii_case("counter") => {
            counter_args(cursor)
        }
        Token::Function(name) if name.eq_str_ignore_ascii_case("counters") => {
            counters_args(cursor)
        }
        _ => Err(Error::Invalid),
    };
    if result.is_err() {
        cursor.reset(mark);
    }
    result
}

/// `attr(X)`
fn attr_args(cursor: &mut Cursor<'_>) -> Result<ContentItem> {
    cursor.skip_ws();
    let name = cursor.expect_ident()?;
    cursor.skip_ws();
    cursor.expect_char(')')?;
    Ok(ContentItem::Attr(name))
}

/// `counter(name)` or `counter(name, style)`.
///
/// Counter styles are not validated against the list-style-type
/// keywords: an unknown ident is kept verbatim.
fn counter_args(cursor: &mut Cursor<'_>) -> Result<ContentItem> {
    cursor.skip_ws();
    let name = cursor.expect_ident()?;
    cursor.skip_ws();
    let style = if cursor.expect_char(',').is_ok() {
        cursor.skip_ws();
        let style = cursor.expect_ident()?;
        cursor.skip_ws();
        Some(style)
    } else {
        None
    };
    cursor.expect_char(')')?;
    Ok(ContentItem::Counter { name, style })
}

/// `counters(name, separator)` or `counters(name, separator, style)`.
fn counters_args(cursor: &mut Cursor<'_>) -> Result<ContentItem> {
    cursor.skip_ws();
    let name = cursor.expect_ident()?;
    cursor.skip_ws();
    cursor.expect_char(',')?;
    cursor.skip_ws();
    let separator = parse_string(cursor)?;
    cursor.skip_ws();
    let style = if cursor.expect_char(',').is_ok() {
        cursor.skip_ws();
        let style = cursor.expect_ident()?;
        cursor.skip_ws();
        Some(style)
    } else {
        None
    };
    cursor.expect_char(')')?;
    Ok(ContentItem::Counters {
        name,
        separator,
        style,
    })
}

/// `counter-increment: [<identifier> <integer>?]+ | none | inherit`
pub(super) fn counter_increment(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::CounterIncrement(parse_inheritable(
        cursor,
        |c| counter_list(c, 1),
    )?))
}

/// `counter-reset: [<identifier> <integer>?]+ | none | inherit`
pub(super) fn counter_reset(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::CounterReset(parse_inheritable(
        cursor,
        |c| counter_list(c, 0),
    )?))
}

/// `[<identifier> <integer>?]+ | none`; the default value differs
/// between increment (1) and reset (0).
fn counter_list(cursor: &mut Cursor<'_>, default: i32) -> Result<CounterUpdate> {
    if cursor.try_keyword("none") {
        return Ok(CounterUpdate::None);
    }
    let mut deltas = Vec::new();
    loop {
        cursor.skip_ws();
        let Ok(name) = cursor.expect_ident() else {
            break;
        };
        cursor.skip_ws();
        let value = parse_integer(cursor).unwrap_or(default);
        deltas.push(CounterDelta { name, value });
    }
    if deltas.is_empty() {
        Err(Error::Invalid)
    } else {
        Ok(CounterUpdate::List(deltas))
    }
}

/// `quotes: [<string> <string>]+ | none | inherit`
pub(super) fn quotes(cursor: &mut Cursor<'_>) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Quotes(parse_inheritable(
        cursor,
        quotes_value,
    )?))
}

fn quotes_value(cursor: &mut Cursor<'_>) -> Result<Quotes> {
    if cursor.try_keyword("none") {
        return Ok(Quotes::None);
    }
    let mut pairs = Vec::new();
    loop {
        cursor.skip_ws();
        let Ok(open) = parse_string(cursor) else {
            break;
        };
        cursor.skip_ws();
        // "Values... come in pairs"; a dangling open string is invalid.
        let close = parse_string(cursor)?;
        pairs.push(QuotePair { open, close });
    }
    if pairs.is_empty() {
        Err(Error::Invalid)
    } else {
        Ok(Quotes::Pairs(pairs))
    }
}

/// `cursor: [[<uri> ,]* keyword] | inherit`
pub(super) fn cursor_prop(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
) -> Result<PropertyDeclaration> {
    Ok(PropertyDeclaration::Cursor(parse_inheritable(cursor, |c| {
        cursor_value(c, env)
    })?))
}

fn cursor_value(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<CursorValue> {
    let mut uris = Vec::new();
    loop {
        cursor.skip_ws();
        match parse_uri(cursor, env) {
            Ok(uri) => {
                uris.push(uri);
                cursor.skip_ws();
                // [§ 18.1] the URI list is comma-separated and must end
                // with a generic keyword.
                cursor.expect_char(',')?;
            }
            Err(_) => break,
        }
    }
    cursor.skip_ws();
    let kind = keyword(cursor, &CURSOR_KINDS)?;
    Ok(CursorValue { uris, kind })
}
