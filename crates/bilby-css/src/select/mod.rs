//! Style selection: document node to cascade output.
//!
//! [CSS 2.1 § 6.4 The cascade](https://www.w3.org/TR/CSS21/cascade.html#cascade)
//!
//! "To find the value for an element/property combination, user agents
//! must apply the following sorting order: 1. by origin and importance,
//! 2. by specificity, 3. by order specified."
//!
//! A [`SelectCtx`] holds the stylesheets of every origin.
//! [`SelectCtx::select_style`] gathers the declarations of every rule
//! whose selector matches the node under the requested media, sorts
//! them into cascade order, and folds them into a [`PartialStyle`] that
//! [`crate::computed::compose`] turns into the final computed style.

pub mod handler;
pub mod matcher;

pub use handler::DocumentHandler;

use bilby_common::{Error, Result};

use crate::computed::PartialStyle;
use crate::media::Media;
use crate::selector::{PseudoElement, Specificity};
use crate::style::{Declaration, ALL_PROPERTIES};
use crate::stylesheet::{RuleBody, Stylesheet};

use matcher::selector_matches;

/// Stylesheet origins.
///
/// [§ 6.4.1 Cascading order](https://www.w3.org/TR/CSS21/cascade.html#cascading-order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    /// "user agent style sheets"
    UserAgent,
    /// "user style sheets"
    User,
    /// "author style sheets"
    Author,
}

/// Cascade rank by origin and importance, ascending.
///
/// [§ 6.4.1] "1. user agent declarations, 2. user normal declarations,
/// 3. author normal declarations, 4. author important declarations,
/// 5. user important declarations."
const fn cascade_rank(origin: Origin, important: bool) -> u8 {
    match (origin, important) {
        (Origin::UserAgent, _) => 0,
        (Origin::User, false) => 1,
        (Origin::Author, false) => 2,
        (Origin::Author, true) => 3,
        (Origin::User, true) => 4,
    }
}

/// One sheet registered in a context.
struct CtxSheet {
    sheet: Stylesheet,
    origin: Origin,
    media: Media,
}

/// One cascade-ordered candidate declaration.
struct Candidate<'a> {
    rank: u8,
    specificity: Specificity,
    /// Sheet sequence in document order (imports inline before their
    /// importing sheet's own rules); 0 is reserved for presentational
    /// hints, `u32::MAX` for the inline style.
    sheet_seq: u32,
    rule_index: u32,
    selector: u32,
    declaration_index: u32,
    declaration: &'a Declaration,
}

impl Candidate<'_> {
    /// The total cascade order.
    const fn sort_key(&self) -> (u8, Specificity, u32, u32, u32, u32) {
        (
            self.rank,
            self.specificity,
            self.sheet_seq,
            self.rule_index,
            self.selector,
            self.declaration_index,
        )
    }
}

/// A selection context: stylesheets plus their origins and media.
#[derive(Default)]
pub struct SelectCtx {
    entries: Vec<CtxSheet>,
}

impl SelectCtx {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet. Order within an origin is cascade-significant:
    /// later sheets win ties.
    pub fn append_sheet(&mut self, sheet: Stylesheet, origin: Origin, media: Media) {
        self.entries.push(CtxSheet {
            sheet,
            origin,
            media,
        });
    }

    /// Insert a sheet at a position.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] when `index` is past the end.
    pub fn insert_sheet(
        &mut self,
        sheet: Stylesheet,
        index: usize,
        origin: Origin,
        media: Media,
    ) -> Result<()> {
        if index > self.entries.len() {
            return Err(Error::BadParameter);
        }
        self.entries.insert(
            index,
            CtxSheet {
                sheet,
                origin,
                media,
            },
        );
        Ok(())
    }

    /// Remove and return the sheet at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] for an out-of-range index.
    pub fn remove_sheet(&mut self, index: usize) -> Result<Stylesheet> {
        if index >= self.entries.len() {
            return Err(Error::BadParameter);
        }
        Ok(self.entries.remove(index).sheet)
    }

    /// Number of registered sheets.
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.entries.len()
    }

    /// The sheet at `index` with its origin and media.
    #[must_use]
    pub fn sheet_at(&self, index: usize) -> Option<(&Stylesheet, Origin, Media)> {
        self.entries
            .get(index)
            .map(|e| (&e.sheet, e.origin, e.media))
    }

    /// Compute the cascade output for one element.
    ///
    /// Returns the winning declaration per property; compose it with
    /// the parent's computed style to obtain the element's computed
    /// style.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] when `inline_style` is not an
    /// inline-style sheet.
    pub fn select_style<H: DocumentHandler>(
        &self,
        node: H::Node,
        pseudo: Option<PseudoElement>,
        media: Media,
        inline_style: Option<&Stylesheet>,
        handler: &H,
    ) -> Result<PartialStyle> {
        // Presentational hints precede all author CSS with zero
        // specificity, but only apply to the element itself.
        let hints = handler.presentational_hints(node);

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        if pseudo.is_none() {
            for (index, declaration) in hints.iter().enumerate() {
                candidates.push(Candidate {
                    rank: cascade_rank(Origin::Author, declaration.important),
                    specificity: Specificity::default(),
                    sheet_seq: 0,
                    rule_index: 0,
                    selector: 0,
                    declaration_index: index as u32,
                    declaration,
                });
            }
        }

        let mut seq = 1u32;
        for entry in &self.entries {
            if entry.sheet.disabled() || !entry.media.intersects(media) {
                continue;
            }
            collect_sheet(
                &entry.sheet,
                entry.origin,
                media,
                &mut seq,
                node,
                pseudo,
                handler,
                &mut candidates,
            );
        }

        // Inline style: author origin with the specificity "a" flag.
        let inline_declarations = match inline_style {
            None => None,
            Some(sheet) => {
                let Some(declarations) = sheet.inline_declarations() else {
                    return Err(Error::BadParameter);
                };
                Some(declarations)
            }
        };
        if pseudo.is_none() {
            if let Some(declarations) = inline_declarations {
                for (index, declaration) in declarations.iter().enumerate() {
                    candidates.push(Candidate {
                        rank: cascade_rank(Origin::Author, declaration.important),
                        specificity: Specificity::INLINE,
                        sheet_seq: u32::MAX,
                        rule_index: 0,
                        selector: 0,
                        declaration_index: index as u32,
                        declaration,
                    });
                }
            }
        }

        candidates.sort_by_key(Candidate::sort_key);

        let mut partial = PartialStyle::new();
        for candidate in &candidates {
            partial.apply(candidate.declaration);
        }

        // At the document root, unset inherited properties may take a
        // UA-provided default before falling back to the initial value.
        if handler.parent_node(node).is_none() {
            for property in ALL_PROPERTIES {
                if !property.is_inherited() || partial.get(property).is_some() {
                    continue;
                }
                if let Some(declaration) = handler.ua_default(property) {
                    if declaration.id() == property {
                        partial.apply(&declaration);
                    }
                }
            }
        }

        Ok(partial)
    }
}

/// Collect matching declarations from one sheet, recursing into its
/// registered imports first (imported rules precede the importing
/// sheet's own rules in the cascade, as if textually substituted).
#[expect(clippy::too_many_arguments, reason = "internal walk state")]
fn collect_sheet<'a, H: DocumentHandler>(
    sheet: &'a Stylesheet,
    origin: Origin,
    media: Media,
    seq: &mut u32,
    node: H::Node,
    pseudo: Option<PseudoElement>,
    handler: &H,
    candidates: &mut Vec<Candidate<'a>>,
) {
    if sheet.disabled() {
        return;
    }
    for &rule_id in sheet.top_rules() {
        if let Some(rule) = sheet.rule(rule_id) {
            if let RuleBody::Import {
                media: import_media,
                sheet: Some(child),
                ..
            } = &rule.body
            {
                if import_media.intersects(media) {
                    collect_sheet(child, origin, media, seq, node, pseudo, handler, candidates);
                }
            }
        }
    }

    let sheet_seq = *seq;
    *seq += 1;

    let hash = sheet.selector_hash();
    let interner = sheet.interner();

    let mut buckets: Vec<&[_]> = Vec::with_capacity(4);
    if let Some(id) = handler.node_id(node) {
        if let Some(atom) = interner.lookup(id) {
            buckets.push(hash.ids(&atom));
        }
    }
    for class in handler.node_classes(node) {
        if let Some(atom) = interner.lookup(class) {
            buckets.push(hash.classes(&atom));
        }
    }
    if let Some(name) = handler.node_name(node) {
        if let Some(atom) = interner.lookup(&name.to_ascii_lowercase()) {
            buckets.push(hash.elements(&atom));
        }
    }
    buckets.push(hash.universal());

    for bucket in buckets {
        for entry in bucket {
            if !entry.media.intersects(media) {
                continue;
            }
            let Some(rule) = sheet.rule(entry.rule) else {
                continue;
            };
            let RuleBody::Selectors { selectors, style } = &rule.body else {
                continue;
            };
            let Some(selector) = selectors.get(entry.selector as usize) else {
                continue;
            };
            if !selector_matches(handler, node, selector, pseudo) {
                continue;
            }
            for (index, declaration) in style.declarations().iter().enumerate() {
                candidates.push(Candidate {
                    rank: cascade_rank(origin, declaration.important),
                    specificity: entry.specificity,
                    sheet_seq,
                    rule_index: entry.rule_index,
                    selector: entry.selector,
                    declaration_index: index as u32,
                    declaration,
                });
            }
        }
    }
}
