//! Selector parsing from ruleset prelude tokens.
//!
//! [CSS 2.1 § 5.2 Selector syntax](https://www.w3.org/TR/CSS21/selector.html#selector-syntax)
//!
//! ```text
//! selector_list : selector ("," selector)*
//! selector      : simple_selector (combinator simple_selector)*
//! simple        : (IDENT | "*")? specific*
//! specific      : HASH | "." IDENT | "[" attrib "]" | ":" pseudo
//! combinator    : ws "+" ws | ws ">" ws | ws+
//! ```
//!
//! Whitespace is significant here: a run of whitespace between two
//! simple selectors is the descendant combinator, while trailing
//! whitespace before a comma separates nothing. An unparseable selector
//! invalidates the whole ruleset, per
//! [§ 4.1.7](https://www.w3.org/TR/CSS21/syndata.html#rule-sets): "the
//! entire rule is dropped if any selector is invalid" applies to the
//! whole comma-separated list.

use bilby_common::{Error, Result};

use crate::selector::{AttrMatch, Combinator, Detail, PseudoClass, PseudoElement, Selector};
use crate::tokenizer::Token;

use super::value::Cursor;

/// Parse a comma-separated selector list.
pub(crate) fn parse_selector_list(tokens: &[Token]) -> Result<Vec<Selector>> {
    let mut cursor = Cursor::new(tokens);
    let mut selectors = Vec::new();
    loop {
        cursor.skip_ws();
        selectors.push(parse_selector(&mut cursor)?);
        cursor.skip_ws();
        if cursor.finished() {
            break;
        }
        cursor.expect_char(',')?;
    }
    if selectors.is_empty() {
        return Err(Error::Invalid);
    }
    Ok(selectors)
}

/// Parse one selector: a chain of simple selectors.
fn parse_selector(cursor: &mut Cursor<'_>) -> Result<Selector> {
    let mut compounds = vec![parse_simple(cursor)?];
    let mut combinators: Vec<Combinator> = Vec::new();

    loop {
        let mark = cursor.mark();
        cursor.skip_ws();
        let had_ws = cursor.mark() != mark;

        let combinator = if cursor.peek().is_char('+') {
            let _ = cursor.next();
            cursor.skip_ws();
            Some(Combinator::Sibling)
        } else if cursor.peek().is_char('>') {
            let _ = cursor.next();
            cursor.skip_ws();
            Some(Combinator::Child)
        } else if had_ws && starts_simple(cursor.peek()) {
            Some(Combinator::Descendant)
        } else {
            // A whitespace run followed by "," or "{" separates nothing:
            // `html , body` is two selectors, not a descendant chain.
            cursor.reset(mark);
            None
        };

        match combinator {
            None => break,
            Some(combinator) => {
                compounds.push(parse_simple(cursor)?);
                combinators.push(combinator);
            }
        }
    }

    // The rightmost simple selector is the subject; the chain is stored
    // right-to-left so matching can walk it outward.
    let subject = compounds.pop().ok_or(Error::Invalid)?;
    let mut chain = Vec::new();
    while let (Some(compound), Some(combinator)) = (compounds.pop(), combinators.pop()) {
        // [§ 5.12] a pseudo-element may only follow the subject.
        if compound
            .iter()
            .any(|d| matches!(d, Detail::PseudoElement(_)))
        {
            return Err(Error::Invalid);
        }
        chain.push((combinator, compound));
    }

    Ok(Selector::new(subject, chain))
}

/// `true` when the token can open a simple selector.
fn starts_simple(token: &Token) -> bool {
    matches!(token, Token::Ident(_) | Token::Hash(_))
        || token.is_char('*')
        || token.is_char('.')
        || token.is_char('[')
        || token.is_char(':')
}

/// Parse one simple selector: optional element name plus specifics.
fn parse_simple(cursor: &mut Cursor<'_>) -> Result<Vec<Detail>> {
    let mut details = Vec::new();

    match cursor.peek() {
        Token::Ident(name) => {
            details.push(Detail::Element(name.clone()));
            let _ = cursor.next();
        }
        token if token.is_char('*') => {
            details.push(Detail::Universal);
            let _ = cursor.next();
        }
        _ => {}
    }

    loop {
        // A pseudo-element terminates the simple selector: nothing may
        // follow it.
        if matches!(details.last(), Some(Detail::PseudoElement(_))) {
            break;
        }
        match cursor.peek() {
            Token::Hash(name) => {
                details.push(Detail::Id(name.clone()));
                let _ = cursor.next();
            }
            token if token.is_char('.') => {
                let _ = cursor.next();
                let name = cursor.expect_ident()?;
                details.push(Detail::Class(name));
            }
            token if token.is_char('[') => {
                let _ = cursor.next();
                details.push(parse_attrib(cursor)?);
            }
            token if token.is_char(':') => {
                let _ = cursor.next();
                details.push(parse_pseudo(cursor)?);
            }
            _ => break,
        }
    }

    if details.is_empty() {
        return Err(Error::Invalid);
    }
    Ok(details)
}

/// Parse an attribute selector after its `[`.
///
/// [§ 5.8.1 Matching attributes and attribute values](https://www.w3.org/TR/CSS21/selector.html#matching-attrs)
fn parse_attrib(cursor: &mut Cursor<'_>) -> Result<Detail> {
    cursor.skip_ws();
    let name = cursor.expect_ident()?;
    cursor.skip_ws();

    let op = if cursor.expect_char(']').is_ok() {
        return Ok(Detail::Attribute {
            name,
            op: AttrMatch::Exists,
        });
    } else if cursor.expect_char('=').is_ok() {
        AttrKind::Equals
    } else if matches!(cursor.peek(), Token::Includes) {
        let _ = cursor.next();
        AttrKind::Includes
    } else if matches!(cursor.peek(), Token::DashMatch) {
        let _ = cursor.next();
        AttrKind::DashMatch
    } else {
        return Err(Error::Invalid);
    };

    cursor.skip_ws();
    let value = match cursor.next() {
        Token::Ident(value) | Token::String(value) => value,
        _ => return Err(Error::Invalid),
    };
    cursor.skip_ws();
    cursor.expect_char(']')?;

    let op = match op {
        AttrKind::Equals => AttrMatch::Equals(value),
        AttrKind::Includes => AttrMatch::Includes(value),
        AttrKind::DashMatch => AttrMatch::DashMatch(value),
    };
    Ok(Detail::Attribute { name, op })
}

/// Attribute operator kinds pending their value.
enum AttrKind {
    Equals,
    Includes,
    DashMatch,
}

/// Parse a pseudo-class or pseudo-element after its `:`.
///
/// [§ 5.12] first-line, first-letter, before, and after are the CSS 2.1
/// pseudo-elements (single-colon syntax); every other known name with
/// pseudo-class grammar is a pseudo-class; `lang()` is the only
/// function-form pseudo-class. Unknown names invalidate the selector.
fn parse_pseudo(cursor: &mut Cursor<'_>) -> Result<Detail> {
    match cursor.next() {
        Token::Ident(name) => {
            if let Some(pseudo_element) = PseudoElement::from_name(name.as_str()) {
                return Ok(Detail::PseudoElement(pseudo_element));
            }
            let lower = name.as_str().to_ascii_lowercase();
            let class = match lower.as_str() {
                "first-child" => PseudoClass::FirstChild,
                "link" => PseudoClass::Link,
                "visited" => PseudoClass::Visited,
                "hover" => PseudoClass::Hover,
                "active" => PseudoClass::Active,
                "focus" => PseudoClass::Focus,
                _ => return Err(Error::Invalid),
            };
            Ok(Detail::PseudoClass(class))
        }
        Token::Function(name) if name.eq_str_ignore_ascii_case("lang") => {
            cursor.skip_ws();
            let tag = cursor.expect_ident()?;
            cursor.skip_ws();
            cursor.expect_char(')')?;
            Ok(Detail::PseudoClass(PseudoClass::Lang(tag)))
        }
        _ => Err(Error::Invalid),
    }
}
