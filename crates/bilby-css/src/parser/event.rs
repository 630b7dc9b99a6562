//! Grammar events produced by the core parser.
//!
//! [CSS 2.1 § 4.1 Syntax](https://www.w3.org/TR/CSS21/syndata.html#syntax)
//!
//! The core grammar is
//! `stylesheet : [ CDO | CDC | S | statement ]*;` with statements being
//! rulesets and at-rules. The core parser walks that grammar and emits
//! one event per construct boundary; the language parser owns all
//! CSS-level semantics (which at-rules exist, what selectors mean, which
//! properties are real).

use bilby_common::Atom;

use crate::tokenizer::Token;

/// One grammar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Parsing started.
    StartStylesheet,
    /// Parsing finished; always the final event.
    EndStylesheet,
    /// A ruleset opened. Carries the prelude (selector) tokens with
    /// surrounding whitespace trimmed.
    StartRuleset(Vec<Token>),
    /// The current ruleset closed.
    EndRuleset,
    /// An at-rule started. Carries the keyword (without `@`) and the
    /// prelude tokens between the keyword and the `;` or block.
    StartAtRule {
        /// The at-keyword, e.g. `media` for `@media`.
        name: Atom,
        /// Prelude tokens, whitespace-trimmed.
        prelude: Vec<Token>,
    },
    /// The current at-rule closed (after its `;` or its block).
    EndAtRule,
    /// A brace block opened somewhere no ruleset or declaration fits.
    /// Kept so the language layer can skip unknown constructs in full.
    StartBlock,
    /// The matching close of [`Event::StartBlock`].
    EndBlock,
    /// Raw tokens inside an unclassifiable block.
    BlockContent(Vec<Token>),
    /// A property declaration.
    Declaration {
        /// The property name.
        property: Atom,
        /// Value tokens with the `!important` suffix and surrounding
        /// whitespace removed.
        value: Vec<Token>,
        /// Whether the declaration carried `!important`.
        important: bool,
    },
}
