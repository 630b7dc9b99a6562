//! Tokenizer integration tests.
//!
//! [CSS 2.1 § 4.1.1 Tokenization](https://www.w3.org/TR/CSS21/syndata.html#tokenization)

use bilby_common::Interner;
use bilby_css::tokenizer::Tokenizer;
use bilby_css::Token;

fn tokens(css: &str) -> (Vec<Token>, Interner) {
    let interner = Interner::new();
    let out = Tokenizer::new(css, interner.clone()).run();
    (out, interner)
}

/// Tokens with whitespace and the trailing EOF stripped, for compact
/// comparisons.
fn significant(css: &str) -> (Vec<Token>, Interner) {
    let (out, interner) = tokens(css);
    let filtered = out
        .into_iter()
        .filter(|t| !t.is_whitespace() && !t.is_eof())
        .collect();
    (filtered, interner)
}

#[test]
fn test_idents_and_punctuation() {
    let (out, interner) = significant("p { color : red ; }");
    assert_eq!(
        out,
        vec![
            Token::Ident(interner.intern("p")),
            Token::Char('{'),
            Token::Ident(interner.intern("color")),
            Token::Char(':'),
            Token::Ident(interner.intern("red")),
            Token::Char(';'),
            Token::Char('}'),
        ]
    );
}

#[test]
fn test_whitespace_run_is_one_token() {
    let (out, _) = tokens("a  \t\n  b");
    assert_eq!(
        out.iter().filter(|t| t.is_whitespace()).count(),
        1,
        "a run of whitespace becomes exactly one S token"
    );
}

#[test]
fn test_comments_are_stripped() {
    let (out, interner) = significant("a/* comment */b /* multi\nline */ c");
    assert_eq!(
        out,
        vec![
            Token::Ident(interner.intern("a")),
            Token::Ident(interner.intern("b")),
            Token::Ident(interner.intern("c")),
        ]
    );
}

#[test]
fn test_at_keyword_and_hash() {
    let (out, interner) = significant("@import #main #ff0000");
    assert_eq!(
        out,
        vec![
            Token::AtKeyword(interner.intern("import")),
            Token::Hash(interner.intern("main")),
            Token::Hash(interner.intern("ff0000")),
        ]
    );
}

#[test]
fn test_numeric_tokens_keep_textual_form() {
    let (out, interner) = significant("12 1.5px 50% -3em .25");
    assert_eq!(
        out,
        vec![
            Token::Number(interner.intern("12")),
            Token::Dimension(interner.intern("1.5px")),
            Token::Percentage(interner.intern("50")),
            Token::Dimension(interner.intern("-3em")),
            Token::Number(interner.intern(".25")),
        ]
    );
}

#[test]
fn test_strings_resolve_escapes() {
    let (out, interner) = significant(r#""hello" 'wor\6C d' "a\"b""#);
    assert_eq!(
        out,
        vec![
            Token::String(interner.intern("hello")),
            Token::String(interner.intern("world")),
            Token::String(interner.intern("a\"b")),
        ]
    );
}

#[test]
fn test_string_with_newline_is_an_error_token() {
    let (out, _) = tokens("\"broken\nrest");
    assert!(
        out.iter().any(|t| matches!(t, Token::Error)),
        "a raw newline in a string marks the token as an error"
    );
}

#[test]
fn test_unterminated_string_closes_at_eof() {
    // [§ 4.2] "User agents must close all open constructs... at the end
    // of the style sheet."
    let (out, interner) = significant("\"dangling");
    assert_eq!(out, vec![Token::String(interner.intern("dangling"))]);
}

#[test]
fn test_uri_forms() {
    let (out, interner) =
        significant("url(plain.png) url( spaced.png ) url(\"quoted.png\") url('q2.png')");
    assert_eq!(
        out,
        vec![
            Token::Uri(interner.intern("plain.png")),
            Token::Uri(interner.intern("spaced.png")),
            Token::Uri(interner.intern("quoted.png")),
            Token::Uri(interner.intern("q2.png")),
        ]
    );
}

#[test]
fn test_bad_uri_is_an_error_token() {
    let (out, _) = tokens("url(bad one.png)");
    assert!(out.iter().any(|t| matches!(t, Token::Error)));
}

#[test]
fn test_function_token() {
    let (out, interner) = significant("rgb(1,2,3)");
    assert_eq!(out[0], Token::Function(interner.intern("rgb")));
    assert_eq!(*out.last().unwrap(), Token::Char(')'));
}

#[test]
fn test_includes_and_dashmatch() {
    let (out, _) = significant("[rel~=copyright][lang|=en]");
    assert!(out.contains(&Token::Includes));
    assert!(out.contains(&Token::DashMatch));
}

#[test]
fn test_cdo_cdc() {
    let (out, _) = significant("<!-- p {} -->");
    assert_eq!(out.first(), Some(&Token::Cdo));
    assert_eq!(out.last(), Some(&Token::Cdc));
}

#[test]
fn test_ident_with_escape() {
    let (out, interner) = significant(r"cl\61 ss");
    assert_eq!(out, vec![Token::Ident(interner.intern("class"))]);
}

#[test]
fn test_negative_dimension_vs_cdc() {
    let (out, interner) = significant("a --> b -5px");
    assert_eq!(
        out,
        vec![
            Token::Ident(interner.intern("a")),
            Token::Cdc,
            Token::Ident(interner.intern("b")),
            Token::Dimension(interner.intern("-5px")),
        ]
    );
}

#[test]
fn test_tokens_end_with_eof() {
    let (out, _) = tokens("p{}");
    assert!(matches!(out.last(), Some(Token::Eof)));
}
