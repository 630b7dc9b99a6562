//! Character set detection and transcoding.
//!
//! [CSS 2.1 § 4.4 CSS style sheet representation](https://www.w3.org/TR/CSS21/syndata.html#charset)
//!
//! "When a style sheet is embedded in another document... the charset
//! must be the one of the containing document. When a style sheet resides
//! in a separate file, user agents must observe the following priorities
//! when determining a style sheet's character encoding:
//!  1. An HTTP 'charset' parameter...
//!  2. BOM and/or @charset
//!  3. ... the charset of the referring document."
//!
//! The engine maps that onto: caller-dictated charset first, then BOM,
//! then a leading `@charset "…";` rule, then UTF-8. All input is
//! transcoded to UTF-8 before tokenization; undecodable bytes become
//! replacement characters rather than failing the whole sheet.

use bilby_common::{Error, Result};
use encoding_rs::{Encoding, UTF_8};

/// Decode raw stylesheet bytes to UTF-8 text.
///
/// `hint` is the caller-dictated charset label (priority 1 above).
/// Returns the decoded text and the canonical name of the encoding that
/// was actually used.
///
/// # Errors
///
/// [`Error::BadCharset`] when the hint or the `@charset` label names an
/// encoding the engine does not know.
pub fn decode(data: &[u8], hint: Option<&str>) -> Result<(String, &'static str)> {
    // Priority 1: the caller knows best (e.g. an HTTP charset parameter).
    if let Some(label) = hint {
        let encoding =
            Encoding::for_label(label.as_bytes()).ok_or(Error::BadCharset)?;
        let (text, _) = encoding.decode_with_bom_removal(data);
        return Ok((text.into_owned(), encoding.name()));
    }

    // Priority 2/3: BOM, then @charset, then the UTF-8 default.
    // `Encoding::decode` re-sniffs the BOM itself, so a BOM always wins
    // over a (possibly lying) @charset rule.
    let base = charset_rule_label(data)
        .map_or(Ok(UTF_8), |label| {
            Encoding::for_label(label.as_bytes()).ok_or(Error::BadCharset)
        })?;
    let (text, used, _) = base.decode(data);
    Ok((text.into_owned(), used.name()))
}

/// Extract the label of a leading `@charset "label";` rule, if any.
///
/// [§ 4.4](https://www.w3.org/TR/CSS21/syndata.html#charset)
/// "Authors using an @charset rule must place the rule at the very
/// beginning of the style sheet, preceded by no characters." The
/// detection therefore reads the raw bytes as ASCII, which covers every
/// ASCII-compatible encoding the rule may legally name.
fn charset_rule_label(data: &[u8]) -> Option<String> {
    const PREFIX: &[u8] = b"@charset \"";
    let rest = data.strip_prefix(PREFIX)?;
    let end = rest.iter().position(|&b| b == b'"')?;
    // The rule must close immediately: `";` after the label.
    if rest.get(end + 1) != Some(&b';') {
        return None;
    }
    let label = &rest[..end];
    if label.is_empty() || !label.is_ascii() {
        return None;
    }
    Some(String::from_utf8_lossy(label).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utf8() {
        let (text, name) = decode(b"p { color: red }", None).unwrap();
        assert_eq!(text, "p { color: red }");
        assert_eq!(name, "UTF-8");
    }

    #[test]
    fn test_bom_wins_without_hint() {
        // UTF-16LE BOM followed by "p{}" in UTF-16LE.
        let data: &[u8] = &[0xff, 0xfe, b'p', 0, b'{', 0, b'}', 0];
        let (text, name) = decode(data, None).unwrap();
        assert_eq!(text, "p{}");
        assert_eq!(name, "UTF-16LE");
    }

    #[test]
    fn test_charset_rule_is_honored() {
        let data = b"@charset \"windows-1252\";h1 { }";
        let (_, name) = decode(data, None).unwrap();
        assert_eq!(name, "windows-1252");
    }

    #[test]
    fn test_charset_rule_must_be_first() {
        // Leading whitespace disqualifies the rule; UTF-8 is used.
        let data = b" @charset \"windows-1252\";";
        let (_, name) = decode(data, None).unwrap();
        assert_eq!(name, "UTF-8");
    }

    #[test]
    fn test_hint_beats_charset_rule() {
        let data = b"@charset \"windows-1252\";p{}";
        let (_, name) = decode(data, Some("utf-8")).unwrap();
        assert_eq!(name, "UTF-8");
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        assert_eq!(decode(b"p{}", Some("klingon")), Err(Error::BadCharset));
        assert_eq!(
            decode(b"@charset \"klingon\";", None),
            Err(Error::BadCharset)
        );
    }
}
