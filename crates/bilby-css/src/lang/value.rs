//! Token cursor and shared value parsers.
//!
//! Property parsers walk a declaration's value tokens through a
//! [`Cursor`]. Every parser observes one contract: on failure the
//! cursor position is exactly what it was on entry, so the caller can
//! try an alternative or discard the declaration without bookkeeping.

use bilby_common::{Atom, Error, Fixed, Result};

use crate::stylesheet::Stylesheet;
use crate::style::values::{Color, Length, Unit};
use crate::tokenizer::Token;

/// Shared state for property parsing, borrowed from the sheet being
/// built.
pub(crate) struct Env<'a> {
    sheet: &'a Stylesheet,
    /// Latched when a quirk was relied upon; copied back onto the sheet
    /// after parsing.
    pub used_quirks: bool,
}

impl<'a> Env<'a> {
    /// Borrow parsing state from a sheet.
    pub(crate) fn new(sheet: &'a Stylesheet) -> Self {
        Self {
            sheet,
            used_quirks: false,
        }
    }

    /// Whether quirks may be accepted.
    pub(crate) fn quirks_allowed(&self) -> bool {
        self.sheet.quirks_allowed()
    }

    /// Intern a string in the sheet's interner.
    pub(crate) fn intern(&self, text: &str) -> Atom {
        self.sheet.interner().intern(text)
    }

    /// Resolve a URL against the sheet base and intern the result.
    pub(crate) fn resolve_uri(&self, relative: &str) -> Result<Atom> {
        let absolute = self.sheet.resolve_url(relative)?;
        Ok(self.intern(&absolute))
    }
}

/// A restorable cursor over a declaration's value tokens.
///
/// Tokens are returned by value; cloning a token is a reference-count
/// bump on its atom, so parsers stay free of borrow entanglements with
/// the cursor.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
    eof: Token,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the tokens.
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            eof: Token::Eof,
        }
    }

    /// The next token without consuming it (EOF once exhausted).
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    /// Consume and return the next token.
    pub(crate) fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Skip whitespace tokens.
    pub(crate) fn skip_ws(&mut self) {
        while self.peek().is_whitespace() {
            let _ = self.next();
        }
    }

    /// Current position, for save/restore.
    pub(crate) fn mark(&self) -> usize {
        self.position
    }

    /// Restore a saved position.
    pub(crate) fn reset(&mut self, mark: usize) {
        self.position = mark;
    }

    /// `true` when every remaining token is whitespace or EOF.
    pub(crate) fn finished(&self) -> bool {
        self.tokens[self.position..]
            .iter()
            .all(|t| t.is_whitespace() || t.is_eof())
    }

    /// Consume an identifier token, returning its atom.
    pub(crate) fn expect_ident(&mut self) -> Result<Atom> {
        match self.peek() {
            Token::Ident(name) => {
                let name = name.clone();
                let _ = self.next();
                Ok(name)
            }
            _ => Err(Error::Invalid),
        }
    }

    /// Consume the given delimiter character.
    pub(crate) fn expect_char(&mut self, c: char) -> Result<()> {
        if self.peek().is_char(c) {
            let _ = self.next();
            Ok(())
        } else {
            Err(Error::Invalid)
        }
    }

    /// Consume an identifier matching `name` (ASCII case-insensitive).
    pub(crate) fn try_keyword(&mut self, name: &str) -> bool {
        if self.peek().is_ident(name) {
            let _ = self.next();
            true
        } else {
            false
        }
    }
}

/// Match a single identifier against a keyword table.
pub(crate) fn keyword<T: Copy>(cursor: &mut Cursor<'_>, table: &[(&str, T)]) -> Result<T> {
    let mark = cursor.mark();
    let name = cursor.expect_ident()?;
    for (keyword, value) in table {
        if name.eq_str_ignore_ascii_case(keyword) {
            return Ok(*value);
        }
    }
    cursor.reset(mark);
    Err(Error::Invalid)
}

/// Parse a `<number>` token into fixed point. The whole token text must
/// be numeric.
pub(crate) fn number_from_token(text: &Atom) -> Result<Fixed> {
    let (value, consumed) = Fixed::parse_number(text.as_str());
    if consumed == text.len() {
        Ok(value)
    } else {
        Err(Error::Invalid)
    }
}

/// Parse an `<integer>` token.
pub(crate) fn integer_from_token(text: &Atom) -> Result<i32> {
    if text.as_str().contains('.') {
        return Err(Error::Invalid);
    }
    Ok(number_from_token(text)?.to_int())
}

/// Parse an `<integer>` term.
pub(crate) fn parse_integer(cursor: &mut Cursor<'_>) -> Result<i32> {
    let mark = cursor.mark();
    match cursor.next() {
        Token::Number(text) => match integer_from_token(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                cursor.reset(mark);
                Err(e)
            }
        },
        _ => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
    }
}

/// Options for [`parse_length`].
#[derive(Clone, Copy)]
pub(crate) struct LengthRules {
    /// Permit negative magnitudes.
    pub negative: bool,
    /// Permit percentage units.
    pub percent: bool,
}

impl LengthRules {
    /// `<length> | <percentage>` with negatives permitted.
    pub(crate) const ANY: Self = Self {
        negative: true,
        percent: true,
    };
    /// Non-negative `<length> | <percentage>`.
    pub(crate) const NON_NEGATIVE: Self = Self {
        negative: false,
        percent: true,
    };
    /// A bare `<length>`, no percentage (e.g. border-spacing).
    pub(crate) const LENGTH_ONLY: Self = Self {
        negative: false,
        percent: false,
    };
}

/// Parse a `<length>` or `<percentage>` term.
///
/// [§ 4.3.2](https://www.w3.org/TR/CSS21/syndata.html#length-units)
/// "After a zero length, the unit identifier is optional." In quirks
/// mode any unitless number is accepted as pixels, which is the legacy
/// behavior HTML documents rely on.
pub(crate) fn parse_length(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    rules: LengthRules,
) -> Result<Length> {
    let mark = cursor.mark();
    let length = match cursor.next() {
        Token::Dimension(text) => {
            let (value, consumed) = Fixed::parse_number(text.as_str());
            match Unit::from_name(&text.as_str()[consumed..]) {
                Some(unit) if unit.is_length() && unit != Unit::Percent => {
                    Ok(Length::new(value, unit))
                }
                _ => Err(Error::Invalid),
            }
        }
        Token::Percentage(text) if rules.percent => {
            number_from_token(&text).map(|value| Length::new(value, Unit::Percent))
        }
        Token::Number(text) => match number_from_token(&text) {
            Err(e) => Err(e),
            Ok(value) if value == Fixed::ZERO => Ok(Length::new(Fixed::ZERO, Unit::Px)),
            Ok(value) => {
                if env.quirks_allowed() {
                    env.used_quirks = true;
                    Ok(Length::new(value, Unit::Px))
                } else {
                    Err(Error::Invalid)
                }
            }
        },
        _ => Err(Error::Invalid),
    };

    match length {
        Ok(length) if length.value.is_negative() && !rules.negative => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
        Ok(length) => Ok(length),
        Err(e) => {
            cursor.reset(mark);
            Err(e)
        }
    }
}

/// Parse a `<color>` term.
///
/// [§ 4.3.6 Colors](https://www.w3.org/TR/CSS21/syndata.html#color-units):
/// keyword, `#hex`, `rgb(...)` - plus `rgba(...)` with an alpha
/// component, a leniency the engine keeps deliberately. In quirks mode
/// a bare hex value without the `#` is accepted.
pub(crate) fn parse_color(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Color> {
    let mark = cursor.mark();
    let color = match cursor.next() {
        Token::Hash(text) => Color::from_hex(text.as_str()).ok_or(Error::Invalid),
        Token::Ident(name) => match Color::from_named(name.as_str()) {
            Some(color) => Ok(color),
            None => quirk_hex(name.as_str(), env).ok_or(Error::Invalid),
        },
        Token::Function(name)
            if name.eq_str_ignore_ascii_case("rgb")
                || name.eq_str_ignore_ascii_case("rgba") =>
        {
            let with_alpha = name.eq_str_ignore_ascii_case("rgba");
            parse_rgb_args(cursor, with_alpha)
        }
        // Quirk: bare 6-digit values starting with a digit tokenize as
        // NUMBER ("123456") or DIMENSION ("00aabb").
        Token::Number(text) | Token::Dimension(text) => {
            quirk_hex(text.as_str(), env).ok_or(Error::Invalid)
        }
        _ => Err(Error::Invalid),
    };
    match color {
        Ok(color) => Ok(color),
        Err(e) => {
            cursor.reset(mark);
            Err(e)
        }
    }
}

/// Accept a bare `rgb`/`rrggbb` value when quirks are allowed.
fn quirk_hex(text: &str, env: &mut Env<'_>) -> Option<Color> {
    if !env.quirks_allowed() {
        return None;
    }
    if !matches!(text.len(), 3 | 6) || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let color = Color::from_hex(text)?;
    env.used_quirks = true;
    Some(color)
}

/// Parse the arguments of `rgb(` / `rgba(` after the function token.
///
/// [§ 4.3.6] "The format of an RGB value in the functional notation is
/// 'rgb(' followed by a comma-separated list of three numerical values
/// (either three integer values or three percentage values)".
fn parse_rgb_args(cursor: &mut Cursor<'_>, with_alpha: bool) -> Result<Color> {
    cursor.skip_ws();
    let r = parse_rgb_component(cursor)?;
    cursor.skip_ws();
    cursor.expect_char(',')?;
    cursor.skip_ws();
    let g = parse_rgb_component(cursor)?;
    cursor.skip_ws();
    cursor.expect_char(',')?;
    cursor.skip_ws();
    let b = parse_rgb_component(cursor)?;
    cursor.skip_ws();

    let a = if with_alpha {
        cursor.expect_char(',')?;
        cursor.skip_ws();
        let alpha = match cursor.next() {
            // "The alpha component is a number between 0 and 1."
            Token::Number(text) => number_from_token(&text)?,
            Token::Percentage(text) => number_from_token(&text)? / Fixed::from_int(100),
            _ => return Err(Error::Invalid),
        };
        cursor.skip_ws();
        clamp_channel(alpha.mul_int(255))
    } else {
        255
    };

    cursor.expect_char(')')?;
    Ok(Color {
        r,
        g,
        b,
        a,
    })
}

/// One `rgb()` channel: an integer 0-255 or a percentage.
/// "Values outside the device gamut should be clipped."
fn parse_rgb_component(cursor: &mut Cursor<'_>) -> Result<u8> {
    match cursor.next() {
        Token::Number(text) => Ok(clamp_channel(number_from_token(&text)?)),
        Token::Percentage(text) => {
            let pct = number_from_token(&text)?;
            Ok(clamp_channel(pct.mul_int(255) / Fixed::from_int(100)))
        }
        _ => Err(Error::Invalid),
    }
}

/// Clamp a fixed-point channel value into 0-255.
fn clamp_channel(value: Fixed) -> u8 {
    value.to_int().clamp(0, 255) as u8
}

/// Parse a `<uri>` term, resolving it against the sheet base.
pub(crate) fn parse_uri(cursor: &mut Cursor<'_>, env: &mut Env<'_>) -> Result<Atom> {
    let mark = cursor.mark();
    match cursor.next() {
        Token::Uri(value) => match env.resolve_uri(value.as_str()) {
            Ok(atom) => Ok(atom),
            Err(e) => {
                cursor.reset(mark);
                Err(e)
            }
        },
        _ => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
    }
}

/// Parse a `<string>` term.
pub(crate) fn parse_string(cursor: &mut Cursor<'_>) -> Result<Atom> {
    let mark = cursor.mark();
    match cursor.next() {
        Token::String(value) => Ok(value),
        _ => {
            cursor.reset(mark);
            Err(Error::Invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use bilby_common::Interner;

    use super::*;
    use crate::stylesheet::Params;
    use crate::tokenizer::Tokenizer;

    fn tokens(css: &str) -> Vec<Token> {
        Tokenizer::new(css, Interner::new()).run()
    }

    fn test_sheet() -> Stylesheet {
        Stylesheet::new(Params::default())
    }

    #[test]
    fn test_parsers_restore_cursor_on_failure() {
        let sheet = test_sheet();
        let mut env = Env::new(&sheet);
        let input = tokens("12deg solid");
        let mut cursor = Cursor::new(&input);
        cursor.skip_ws();
        let mark = cursor.mark();

        assert!(parse_length(&mut cursor, &mut env, LengthRules::ANY).is_err());
        assert_eq!(cursor.mark(), mark, "parse_length must restore the cursor");

        assert!(parse_color(&mut cursor, &mut env).is_err());
        assert_eq!(cursor.mark(), mark, "parse_color must restore the cursor");

        assert!(parse_uri(&mut cursor, &mut env).is_err());
        assert_eq!(cursor.mark(), mark, "parse_uri must restore the cursor");

        assert!(parse_integer(&mut cursor).is_err());
        assert_eq!(cursor.mark(), mark, "parse_integer must restore the cursor");
    }

    #[test]
    fn test_partial_rgb_failure_restores() {
        let sheet = test_sheet();
        let mut env = Env::new(&sheet);
        // The function consumes arguments before discovering the error.
        let input = tokens("rgb(1, 2)");
        let mut cursor = Cursor::new(&input);
        let mark = cursor.mark();
        assert!(parse_color(&mut cursor, &mut env).is_err());
        assert_eq!(cursor.mark(), mark);
    }

    #[test]
    fn test_quirk_length_latches() {
        let sheet = Stylesheet::new(Params {
            quirks_allowed: true,
            ..Params::default()
        });
        let mut env = Env::new(&sheet);
        let input = tokens("5");
        let mut cursor = Cursor::new(&input);
        let length = parse_length(&mut cursor, &mut env, LengthRules::ANY).unwrap();
        assert_eq!(length, Length::new(Fixed::from_int(5), Unit::Px));
        assert!(env.used_quirks);
    }
}
