//! Rules and the rule arena.
//!
//! [CSS 2.1 § 4.1.4 Statements](https://www.w3.org/TR/CSS21/syndata.html#statements)
//!
//! "A CSS style sheet, for any level of CSS, consists of a list of
//! statements. There are two kinds of statements: at-rules and rule
//! sets."
//!
//! Rules live in an arena owned by their stylesheet and refer to each
//! other by [`RuleId`]; containers (the sheet top level and `@media`
//! blocks) keep ordered child-id lists. The per-sheet `index` is
//! assigned at insertion time and increases strictly with document
//! order - it is the source-order component of the cascade key.

use bilby_common::Atom;

use crate::media::Media;
use crate::selector::Selector;
use crate::style::Style;

use super::Stylesheet;

/// Index of a rule in its stylesheet's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(pub(crate) usize);

/// A rule: its cascade bookkeeping plus a kind-specific body.
#[derive(Debug)]
pub struct Rule {
    /// Monotonic insertion index within the owning sheet. Strictly
    /// increasing with document order; gaps may appear after removals.
    pub index: u32,
    /// The containing `@media` rule, or `None` at the sheet top level.
    pub parent: Option<RuleId>,
    /// The kind-specific payload.
    pub body: RuleBody,
}

/// Kind-specific rule payload.
#[derive(Debug)]
pub enum RuleBody {
    /// An at-rule the engine does not know. Retained as a marker so rule
    /// indices reflect the source, but never matched.
    Unknown {
        /// The unrecognized at-keyword.
        name: Atom,
    },

    /// `@charset "encoding";`
    ///
    /// [§ 4.4](https://www.w3.org/TR/CSS21/syndata.html#charset) - only
    /// valid as the first rule; recorded for introspection since the
    /// input was already transcoded by the time parsing runs.
    Charset {
        /// The declared encoding label.
        encoding: Atom,
    },

    /// `@import url(...) media-list;`
    ///
    /// [§ 6.3 The @import rule](https://www.w3.org/TR/CSS21/cascade.html#at-import)
    Import {
        /// The resolved absolute URL of the imported sheet.
        url: Atom,
        /// The media the import applies to.
        media: Media,
        /// The imported sheet, filled in by the client through
        /// [`Stylesheet::register_import`].
        sheet: Option<Box<Stylesheet>>,
    },

    /// `@media media-list { ... }`
    ///
    /// [§ 7.2.1 The @media rule](https://www.w3.org/TR/CSS21/media.html#at-media-rule)
    Media {
        /// The media the nested rules apply to.
        media: Media,
        /// Nested rules, in source order.
        children: Vec<RuleId>,
    },

    /// `@font-face { ... }` font descriptors.
    FontFace {
        /// The descriptor block. Descriptors share the declaration
        /// syntax, so the block reuses the style representation.
        style: Style,
    },

    /// `@page :pseudo? { ... }`
    ///
    /// [CSS 2.1 § 13.2 Page boxes](https://www.w3.org/TR/CSS21/page.html#page-box)
    Page {
        /// The page pseudo-name (`first`, `left`, `right`), if any.
        pseudo: Option<Atom>,
        /// The page margin declarations.
        style: Style,
    },

    /// An ordinary ruleset: selectors plus a declaration block.
    Selectors {
        /// The comma-separated selector list, in source order.
        selectors: Vec<Selector>,
        /// The parsed declaration block, shared by every selector.
        style: Style,
    },
}

impl RuleBody {
    /// Short kind name for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unknown { .. } => "unknown",
            Self::Charset { .. } => "charset",
            Self::Import { .. } => "import",
            Self::Media { .. } => "media",
            Self::FontFace { .. } => "font-face",
            Self::Page { .. } => "page",
            Self::Selectors { .. } => "selectors",
        }
    }
}
