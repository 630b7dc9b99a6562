//! The language parser: grammar events to stylesheet rules.
//!
//! [CSS 2.1 § 4.1 Syntax](https://www.w3.org/TR/CSS21/syndata.html)
//!
//! The core parser produces structure without meaning; this layer owns
//! the CSS-level semantics. It keeps a stack of context entries tagged
//! by the event that opened them, gates `@charset` and `@import` by
//! document position, parses selectors and property values, and appends
//! finished rules to the stylesheet.

pub(crate) mod properties;
pub(crate) mod selector;
pub(crate) mod value;

use bilby_common::warning::warn_once;
use bilby_common::{Atom, Error, Result};

use crate::media::Media;
use crate::parser::{Event, Mode, Parser};
use crate::selector::Selector;
use crate::stylesheet::{RuleBody, RuleId, Stylesheet};
use crate::style::Style;
use crate::tokenizer::Token;

use value::{Cursor, Env};

/// Document-position state gating `@charset` and `@import`.
///
/// [§ 4.4] `@charset` must be the very first thing in the sheet;
/// [§ 6.3] "any @import rules must precede all other rules (except the
/// @charset rule, if present)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing seen yet: `@charset` is still allowed.
    BeforeCharset,
    /// Past the `@charset` window, before any real rule: `@import` is
    /// still allowed.
    BeforeRules,
    /// A rule has been seen; late `@charset`/`@import` are dropped.
    HadRule,
}

/// A ruleset being accumulated.
struct RulesetCtx {
    selectors: Vec<Selector>,
    style: Style,
}

/// One open construct, tagged by the event that opened it.
enum Context {
    /// A ruleset; `None` when its selectors failed to parse and the
    /// whole rule is being discarded.
    Ruleset(Option<RulesetCtx>),
    /// An `@media` block; `None` when its media list was malformed.
    Media(Option<RuleId>),
    /// An `@page` block accumulating declarations.
    Page {
        /// The page pseudo-name, if any.
        pseudo: Option<Atom>,
        /// Accumulated declarations.
        style: Style,
    },
    /// An `@font-face` block accumulating descriptors.
    FontFace {
        /// Accumulated descriptors.
        style: Style,
    },
    /// Anything whose content is discarded (unknown at-rules, dropped
    /// `@charset`/`@import`, at-rules in illegal positions).
    Ignored,
}

/// Consume the token stream and populate the sheet.
pub(crate) fn parse_into(
    sheet: &mut Stylesheet,
    tokens: Vec<Token>,
    mode: Mode,
) -> Result<()> {
    let mut parser = Parser::new(tokens, mode);
    let mut stack: Vec<Context> = Vec::new();
    let mut phase = Phase::BeforeCharset;
    let mut used_quirks = false;

    while let Some(event) = parser.next_event() {
        match event {
            Event::StartStylesheet | Event::EndStylesheet => {}
            Event::StartBlock | Event::EndBlock | Event::BlockContent(_) => {}

            Event::StartRuleset(prelude) => {
                let in_discarded = stack.iter().any(|c| {
                    matches!(
                        c,
                        Context::Ignored
                            | Context::Media(None)
                            | Context::Page { .. }
                            | Context::FontFace { .. }
                    )
                });
                let ctx = if in_discarded {
                    Context::Ruleset(None)
                } else if sheet.is_inline() {
                    // Inline style: one implicit selector-less rule.
                    Context::Ruleset(Some(RulesetCtx {
                        selectors: Vec::new(),
                        style: Style::new(),
                    }))
                } else {
                    phase = Phase::HadRule;
                    match selector::parse_selector_list(&prelude) {
                        Ok(selectors) => Context::Ruleset(Some(RulesetCtx {
                            selectors,
                            style: Style::new(),
                        })),
                        Err(Error::Invalid) => {
                            warn_once("lang", "discarding ruleset with unparseable selector");
                            Context::Ruleset(None)
                        }
                        Err(e) => return Err(e),
                    }
                };
                stack.push(ctx);
            }

            Event::EndRuleset => {
                if let Some(Context::Ruleset(Some(ctx))) = stack.pop() {
                    let parent = innermost_media(&stack);
                    let _ = sheet.append_rule(
                        RuleBody::Selectors {
                            selectors: ctx.selectors,
                            style: ctx.style,
                        },
                        parent,
                    )?;
                }
            }

            Event::Declaration {
                property,
                value,
                important,
            } => {
                // Only contexts that own a declaration block accept one.
                if !matches!(
                    stack.last(),
                    Some(
                        Context::Ruleset(Some(_))
                            | Context::Page { .. }
                            | Context::FontFace { .. }
                    )
                ) {
                    continue;
                }

                let mut env = Env::new(sheet);
                let parsed = properties::parse_declaration(&mut env, &property, &value);
                used_quirks |= env.used_quirks;

                let decls = match parsed {
                    Ok(decls) => decls,
                    Err(Error::Invalid) => {
                        warn_once(
                            "lang",
                            &format!("discarding declaration '{property}'"),
                        );
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let target = match stack.last_mut() {
                    Some(Context::Ruleset(Some(ctx))) => &mut ctx.style,
                    Some(Context::Page { style, .. } | Context::FontFace { style }) => style,
                    _ => continue,
                };
                for mut declaration in decls {
                    declaration.important = important;
                    target.push(declaration);
                }
            }

            Event::StartAtRule { name, prelude } => {
                let at_top = stack.is_empty();
                let lower = name.as_str().to_ascii_lowercase();
                let ctx = match lower.as_str() {
                    "charset" => {
                        if at_top && phase == Phase::BeforeCharset {
                            phase = Phase::BeforeRules;
                            match charset_prelude(&prelude) {
                                Some(encoding) => {
                                    let _ = sheet
                                        .append_rule(RuleBody::Charset { encoding }, None)?;
                                }
                                None => warn_once("lang", "discarding malformed @charset"),
                            }
                        } else {
                            // [§ 4.4] only valid at the very beginning.
                            warn_once("lang", "discarding misplaced @charset");
                        }
                        Context::Ignored
                    }
                    "import" => {
                        if at_top && phase != Phase::HadRule {
                            phase = Phase::BeforeRules;
                            match import_prelude(sheet, &prelude) {
                                Ok((url, media)) => {
                                    let _ = sheet.append_rule(
                                        RuleBody::Import {
                                            url,
                                            media,
                                            sheet: None,
                                        },
                                        None,
                                    )?;
                                }
                                Err(Error::Invalid) => {
                                    warn_once("lang", "discarding malformed @import");
                                }
                                Err(e) => return Err(e),
                            }
                        } else {
                            // [§ 6.3] imports must precede all rules.
                            warn_once("lang", "discarding misplaced @import");
                        }
                        Context::Ignored
                    }
                    "media" if at_top => {
                        phase = Phase::HadRule;
                        match media_list(&prelude) {
                            Ok(media) => {
                                let id = sheet.append_rule(
                                    RuleBody::Media {
                                        media,
                                        children: Vec::new(),
                                    },
                                    None,
                                )?;
                                Context::Media(Some(id))
                            }
                            Err(_) => {
                                warn_once("lang", "discarding @media with bad media list");
                                Context::Media(None)
                            }
                        }
                    }
                    "font-face" if at_top => {
                        phase = Phase::HadRule;
                        Context::FontFace {
                            style: Style::new(),
                        }
                    }
                    "page" if at_top => {
                        phase = Phase::HadRule;
                        match page_prelude(&prelude) {
                            Ok(pseudo) => Context::Page {
                                pseudo,
                                style: Style::new(),
                            },
                            Err(_) => {
                                warn_once("lang", "discarding @page with bad prelude");
                                Context::Ignored
                            }
                        }
                    }
                    // Known at-rules in illegal (nested) positions are
                    // dropped without a marker.
                    "media" | "font-face" | "page" => Context::Ignored,
                    _ => {
                        // Unknown at-rule: retain a marker at the top
                        // level so indices reflect the source, and drop
                        // the contents either way.
                        if at_top {
                            let _ = sheet.append_rule(RuleBody::Unknown { name }, None)?;
                        }
                        Context::Ignored
                    }
                };
                stack.push(ctx);
            }

            Event::EndAtRule => match stack.pop() {
                Some(Context::Page { pseudo, style }) => {
                    let _ = sheet.append_rule(RuleBody::Page { pseudo, style }, None)?;
                }
                Some(Context::FontFace { style }) => {
                    let _ = sheet.append_rule(RuleBody::FontFace { style }, None)?;
                }
                _ => {}
            },
        }
    }

    if used_quirks {
        sheet.set_used_quirks();
    }
    Ok(())
}

/// The innermost enclosing `@media` rule on the context stack.
fn innermost_media(stack: &[Context]) -> Option<RuleId> {
    stack.iter().rev().find_map(|c| match c {
        Context::Media(id) => *id,
        _ => None,
    })
}

/// `@charset "label"` - the prelude must be exactly one string.
fn charset_prelude(prelude: &[Token]) -> Option<Atom> {
    match prelude {
        [Token::String(label)] => Some(label.clone()),
        _ => None,
    }
}

/// `@import <uri-or-string> <media-list>?`
fn import_prelude(sheet: &Stylesheet, prelude: &[Token]) -> Result<(Atom, Media)> {
    let mut cursor = Cursor::new(prelude);
    cursor.skip_ws();
    let target = match cursor.next() {
        Token::Uri(url) | Token::String(url) => url,
        _ => return Err(Error::Invalid),
    };
    cursor.skip_ws();
    let media = if cursor.finished() {
        Media::ALL
    } else {
        media_list_from(&mut cursor)?
    };
    let absolute = sheet.resolve_url(target.as_str())?;
    Ok((sheet.interner().intern(&absolute), media))
}

/// `@media <media-list>` prelude.
fn media_list(prelude: &[Token]) -> Result<Media> {
    let mut cursor = Cursor::new(prelude);
    media_list_from(&mut cursor)
}

/// A comma-separated media-type list.
///
/// [§ 7.2.1] unknown media types are kept in the list but match
/// nothing; a syntactically malformed list invalidates the construct.
fn media_list_from(cursor: &mut Cursor<'_>) -> Result<Media> {
    let mut media = Media::NONE;
    loop {
        cursor.skip_ws();
        let name = cursor.expect_ident()?;
        if let Some(known) = Media::from_name(name.as_str()) {
            media |= known;
        }
        cursor.skip_ws();
        if cursor.finished() {
            return Ok(media);
        }
        cursor.expect_char(',')?;
    }
}

/// `@page` prelude: empty or `:ident`.
fn page_prelude(prelude: &[Token]) -> Result<Option<Atom>> {
    let mut cursor = Cursor::new(prelude);
    cursor.skip_ws();
    if cursor.finished() {
        return Ok(None);
    }
    cursor.expect_char(':')?;
    let pseudo = cursor.expect_ident()?;
    cursor.skip_ws();
    if cursor.finished() {
        Ok(Some(pseudo))
    } else {
        Err(Error::Invalid)
    }
}
