//! CSS 2.1 token types.
//!
//! [CSS 2.1 § 4.1.1 Tokenization](https://www.w3.org/TR/CSS21/syndata.html#tokenization)
//!
//! "All levels of CSS - level 1, level 2, and any future levels - use
//! the same core syntax."
//!
//! Identifier-like tokens carry interned [`Atom`]s; numeric tokens carry
//! their textual form and are converted on demand by the language parser
//! (a dimension atom holds the full `1.5px` text, split later with
//! [`bilby_common::Fixed::parse_number`]).

use core::fmt;

use bilby_common::Atom;

/// A CSS 2.1 token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `IDENT`: an identifier such as `color` or `solid`.
    Ident(Atom),

    /// `ATKEYWORD`: `@` followed by an identifier; the value excludes the
    /// `@`.
    AtKeyword(Atom),

    /// `STRING`: a quoted string; the value excludes the quotes and has
    /// escapes resolved.
    String(Atom),

    /// `HASH`: `#` followed by a name; the value excludes the `#`.
    Hash(Atom),

    /// `URI`: `url(...)`; the value is the unquoted, unescaped URL text,
    /// not yet resolved against the stylesheet base.
    Uri(Atom),

    /// `FUNCTION`: an identifier immediately followed by `(`; the value
    /// excludes the parenthesis.
    Function(Atom),

    /// `NUMBER`: the textual form of the number.
    Number(Atom),

    /// `PERCENTAGE`: the textual form of the number, excluding the `%`.
    Percentage(Atom),

    /// `DIMENSION`: the full textual form including the unit
    /// (e.g. `1.5px`).
    Dimension(Atom),

    /// `S`: one token per run of whitespace.
    Whitespace,

    /// `INCLUDES`: `~=`.
    Includes,

    /// `DASHMATCH`: `|=`.
    DashMatch,

    /// `CDO`: `<!--`.
    Cdo,

    /// `CDC`: `-->`.
    Cdc,

    /// `DELIM`/`CHAR`: any other single code point, including the
    /// punctuation the grammar consumes directly (`{ } ( ) [ ] ; : ,`).
    Char(char),

    /// `ERROR`: a malformed construct (bad string, bad URI). The parser
    /// discards the declaration or rule containing it.
    Error,

    /// `EOF`: end of input.
    Eof,
}

impl Token {
    /// `true` for the EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// `true` for the whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// `true` when this token is the given delimiter character.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Self::Char(d) if *d == c)
    }

    /// `true` for an identifier matching `name` ASCII case-insensitively.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Self::Ident(atom) if atom.eq_str_ignore_ascii_case(name))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "<ident:{v}>"),
            Self::AtKeyword(v) => write!(f, "<at-keyword:@{v}>"),
            Self::String(v) => write!(f, "<string:\"{v}\">"),
            Self::Hash(v) => write!(f, "<hash:#{v}>"),
            Self::Uri(v) => write!(f, "<uri:{v}>"),
            Self::Function(v) => write!(f, "<function:{v}(>"),
            Self::Number(v) => write!(f, "<number:{v}>"),
            Self::Percentage(v) => write!(f, "<percentage:{v}%>"),
            Self::Dimension(v) => write!(f, "<dimension:{v}>"),
            Self::Whitespace => write!(f, "<s>"),
            Self::Includes => write!(f, "<includes>"),
            Self::DashMatch => write!(f, "<dashmatch>"),
            Self::Cdo => write!(f, "<cdo>"),
            Self::Cdc => write!(f, "<cdc>"),
            Self::Char(c) => write!(f, "<char:{c}>"),
            Self::Error => write!(f, "<error>"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}
