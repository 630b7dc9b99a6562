//! CSS 2.1 parsing, selector matching, and computed-style engine.
//!
//! # Scope
//!
//! This crate implements the core of a CSS 2.1 engine:
//! - **Tokenizer** ([CSS 2.1 § 4.1.1](https://www.w3.org/TR/CSS21/syndata.html#tokenization))
//!   with charset detection and transcoding to UTF-8
//! - **Core parser** - token stream to grammar events with
//!   forward-compatible error recovery
//! - **Language parser** - events to a structured stylesheet: rules,
//!   selector chains, and typed declaration blocks, with `@charset`,
//!   `@import`, `@media`, `@font-face`, and `@page` handling
//! - **Selector matching** ([§ 5](https://www.w3.org/TR/CSS21/selector.html))
//!   against a host document through the [`DocumentHandler`] callback
//!   interface, accelerated by a per-sheet selector hash
//! - **Cascade and computed styles**
//!   ([§ 6](https://www.w3.org/TR/CSS21/cascade.html)) - origin and
//!   importance ranking, specificity, inheritance, and absolute-value
//!   resolution (font sizes through a host callback; no `ex` length
//!   survives composition)
//!
//! # Flow
//!
//! Build a [`Stylesheet`] from source bytes, register it in a
//! [`SelectCtx`] with its [`Origin`] and media, then for each element
//! call [`SelectCtx::select_style`] and compose the result with the
//! parent's computed style:
//!
//! ```
//! use bilby_css::{Media, Origin, Params, SelectCtx, Stylesheet};
//! let mut sheet = Stylesheet::new(Params::default());
//! sheet.append_data(b"p { color: red }").unwrap();
//! sheet.data_done().unwrap();
//!
//! let mut ctx = SelectCtx::new();
//! ctx.append_sheet(sheet, Origin::Author, Media::ALL);
//! ```
//!
//! # Out of scope
//!
//! Layout and rendering; CSS3+ features (media queries beyond
//! media-type lists, transforms, variables); the aural and paged-media
//! property groups; fetching bytes and resolving URLs (callbacks).

/// Computed styles and composition.
pub mod computed;
/// The language parser: events to stylesheet rules.
pub(crate) mod lang;
/// Media-type masks.
pub mod media;
/// The core parser: tokens to grammar events.
pub mod parser;
/// The selector model.
pub mod selector;
/// Style selection against a host document.
pub mod select;
/// Declaration blocks and typed property values.
pub mod style;
/// Stylesheets: rule storage and the construction API.
pub mod stylesheet;
/// The CSS 2.1 tokenizer.
pub mod tokenizer;

// Re-exports for convenience
pub use computed::{compose, default_compute_font_size, ComputedStyle, PartialStyle};
pub use media::Media;
pub use select::{DocumentHandler, Origin, SelectCtx};
pub use selector::{PseudoElement, Specificity};
pub use style::{Declaration, PropertyDeclaration, PropertyId, Style};
pub use stylesheet::{LanguageLevel, Params, Rule, RuleBody, RuleId, Stylesheet};
pub use tokenizer::Token;
