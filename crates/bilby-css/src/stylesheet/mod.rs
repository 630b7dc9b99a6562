//! Stylesheets: rule storage and the construction API.
//!
//! A stylesheet is built incrementally: create it with [`Params`], feed
//! source bytes through [`Stylesheet::append_data`], then call
//! [`Stylesheet::data_done`]. If the sheet contains `@import` rules the
//! call reports [`Error::ImportsPending`]; the client fetches each
//! pending URL ([`Stylesheet::next_pending_import`]), builds the child
//! sheet the same way, and attaches it with
//! [`Stylesheet::register_import`]. After that the sheet is frozen and
//! usable for selection.

pub mod hash;
pub mod rule;

pub use rule::{Rule, RuleBody, RuleId};

use std::fmt;
use std::mem;

use bilby_common::{Atom, Error, Interner, Result};

use crate::lang;
use crate::media::Media;
use crate::parser::Mode;
use crate::selector::Selector;
use crate::style::Declaration;
use crate::tokenizer::{self, Tokenizer};

use hash::{BucketKey, Entry, SelectorHash};

/// The CSS language level a sheet is parsed as.
///
/// Only 2.1 semantics are implemented; the level is carried so clients
/// can label sheets and future levels can hook in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageLevel {
    /// CSS level 1.
    Css1,
    /// CSS level 2.
    Css2,
    /// CSS level 2 revision 1.
    #[default]
    Css21,
}

/// URL resolution callback: `(base, relative) -> absolute`.
///
/// Supplied by the client; URL syntax is outside the engine's scope.
pub type UrlResolver = Box<dyn Fn(&str, &str) -> Result<String>>;

/// Parameters for creating a [`Stylesheet`].
pub struct Params {
    /// The interner shared by every sheet that should be matchable in
    /// one selection context.
    pub interner: Interner,
    /// The language level to parse as.
    pub level: LanguageLevel,
    /// The sheet's base URL, used to resolve `url(...)` values and
    /// `@import` targets.
    pub url: String,
    /// The advisory title, if any.
    pub title: Option<String>,
    /// Caller-dictated charset, overriding BOM and `@charset` detection.
    pub charset: Option<String>,
    /// Whether quirks (bare hex colors) may be accepted.
    pub quirks_allowed: bool,
    /// Whether this sheet holds the content of a `style` attribute.
    pub inline_style: bool,
    /// URL resolver; `None` selects a naive join suitable for tests.
    pub resolver: Option<UrlResolver>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            interner: Interner::new(),
            level: LanguageLevel::default(),
            url: String::new(),
            title: None,
            charset: None,
            quirks_allowed: false,
            inline_style: false,
            resolver: None,
        }
    }
}

/// Loading state of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetState {
    /// Accepting `append_data` chunks.
    Loading,
    /// `data_done` has run; the rule list is frozen.
    Done,
}

/// A parsed stylesheet.
pub struct Stylesheet {
    interner: Interner,
    level: LanguageLevel,
    url: String,
    title: Option<String>,
    charset_hint: Option<String>,
    charset_used: Option<&'static str>,
    quirks_allowed: bool,
    used_quirks: bool,
    disabled: bool,
    inline_style: bool,
    resolver: UrlResolver,

    /// Rule arena; removed rules leave `None` tombstones so ids stay
    /// stable.
    rules: Vec<Option<Rule>>,
    /// Top-level rules in source order.
    top: Vec<RuleId>,
    /// Next per-sheet rule index.
    next_index: u32,
    /// The selector index over every selector-rule in the sheet.
    hash: SelectorHash,

    /// Buffered input while loading.
    data: Vec<u8>,
    state: SheetState,
    /// Approximate memory footprint in bytes.
    size: usize,
}

impl Stylesheet {
    /// Create an empty sheet in the loading state.
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self {
            interner: params.interner,
            level: params.level,
            url: params.url,
            title: params.title,
            charset_hint: params.charset,
            charset_used: None,
            quirks_allowed: params.quirks_allowed,
            used_quirks: false,
            disabled: false,
            inline_style: params.inline_style,
            resolver: params.resolver.unwrap_or_else(|| Box::new(naive_join)),
            rules: Vec::new(),
            top: Vec::new(),
            next_index: 0,
            hash: SelectorHash::new(),
            data: Vec::new(),
            state: SheetState::Loading,
            size: size_of::<Self>(),
        }
    }

    /// Append a chunk of source bytes. May be called repeatedly; partial
    /// tokens across chunk boundaries are handled because tokenization
    /// runs over the complete buffer at [`Stylesheet::data_done`] time.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] once the sheet is frozen.
    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        if self.state != SheetState::Loading {
            return Err(Error::BadParameter);
        }
        self.data.extend_from_slice(data);
        Ok(())
    }

    /// Finish loading: transcode, tokenize, parse, and freeze the sheet.
    ///
    /// # Errors
    ///
    /// - [`Error::BadCharset`] when the charset cannot be resolved.
    /// - [`Error::ImportsPending`] when the sheet has `@import` rules
    ///   whose children are not yet registered. This is a protocol
    ///   signal, not a failure: the sheet is parsed and frozen, and the
    ///   client must drive import resolution before selection.
    /// - [`Error::BadParameter`] when called twice.
    pub fn data_done(&mut self) -> Result<()> {
        if self.state != SheetState::Loading {
            return Err(Error::BadParameter);
        }
        let bytes = mem::take(&mut self.data);
        let (text, charset) = tokenizer::decode(&bytes, self.charset_hint.as_deref())?;
        self.charset_used = Some(charset);

        let tokens = Tokenizer::new(&text, self.interner.clone()).run();
        let mode = if self.inline_style {
            Mode::InlineStyle
        } else {
            Mode::Stylesheet
        };
        lang::parse_into(self, tokens, mode)?;
        self.state = SheetState::Done;

        if self.next_pending_import().is_some() {
            return Err(Error::ImportsPending);
        }
        Ok(())
    }

    /// The first `@import` whose sheet has not been registered yet, as
    /// `(absolute url, media)`.
    #[must_use]
    pub fn next_pending_import(&self) -> Option<(Atom, Media)> {
        self.top.iter().find_map(|&id| match &self.rule(id)?.body {
            RuleBody::Import {
                url,
                media,
                sheet: None,
            } => Some((url.clone(), *media)),
            _ => None,
        })
    }

    /// Attach a fetched sheet to the next pending `@import` slot.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] when no import is pending.
    pub fn register_import(&mut self, child: Self) -> Result<()> {
        let mut pending = Some(child);
        for position in 0..self.top.len() {
            let id = self.top[position];
            let Some(rule) = self.rules.get_mut(id.0).and_then(Option::as_mut) else {
                continue;
            };
            if let RuleBody::Import { sheet: slot @ None, .. } = &mut rule.body {
                if let Some(sheet) = pending.take() {
                    *slot = Some(Box::new(sheet));
                    return Ok(());
                }
            }
        }
        Err(Error::BadParameter)
    }

    /// The language level the sheet was created with.
    #[must_use]
    pub const fn language_level(&self) -> LanguageLevel {
        self.level
    }

    /// The sheet's base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The advisory title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The canonical name of the charset the input was decoded with;
    /// `None` before [`Stylesheet::data_done`].
    #[must_use]
    pub const fn charset(&self) -> Option<&'static str> {
        self.charset_used
    }

    /// Whether quirks were permitted at creation.
    #[must_use]
    pub const fn quirks_allowed(&self) -> bool {
        self.quirks_allowed
    }

    /// Whether parsing actually relied on a quirk.
    #[must_use]
    pub const fn used_quirks(&self) -> bool {
        self.used_quirks
    }

    /// Whether the sheet is excluded from selection.
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.disabled
    }

    /// Exclude or include the sheet in selection.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether this sheet holds an inline `style` attribute.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        self.inline_style
    }

    /// Approximate memory footprint of the sheet in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Look up a rule. `None` for removed rules.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0).and_then(Option::as_ref)
    }

    /// Top-level rules in source order.
    #[must_use]
    pub fn top_rules(&self) -> &[RuleId] {
        &self.top
    }

    /// Every live rule id, in arena order.
    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| RuleId(i))
    }

    /// The declarations of the sheet's single inline-style rule.
    /// `None` for ordinary sheets.
    #[must_use]
    pub fn inline_declarations(&self) -> Option<&[Declaration]> {
        if !self.inline_style {
            return None;
        }
        self.top.iter().find_map(|&id| match &self.rule(id)?.body {
            RuleBody::Selectors { style, .. } => Some(style.declarations()),
            _ => None,
        })
    }

    /// Append a rule to the sheet (or to `parent`, which must be a
    /// `@media` rule). Assigns the per-sheet index, indexes selectors,
    /// and maintains the size counter.
    pub(crate) fn append_rule(
        &mut self,
        body: RuleBody,
        parent: Option<RuleId>,
    ) -> Result<RuleId> {
        // The parent, when given, must be a live @media rule.
        if let Some(parent_id) = parent {
            match self.rule(parent_id) {
                Some(Rule {
                    body: RuleBody::Media { .. },
                    ..
                }) => {}
                _ => return Err(Error::BadParameter),
            }
        }

        let id = RuleId(self.rules.len());
        let index = self.next_index;
        self.next_index += 1;

        if let RuleBody::Selectors { selectors, .. } = &body {
            let media = self.effective_media(parent);
            for (position, selector) in selectors.iter().enumerate() {
                let key = BucketKey::for_selector(selector, &self.interner);
                self.hash.insert(
                    key,
                    Entry {
                        rule: id,
                        selector: position as u32,
                        specificity: selector.specificity(),
                        rule_index: index,
                        media,
                    },
                );
            }
        }

        self.size += rule_footprint(&body);
        self.rules.push(Some(Rule {
            index,
            parent,
            body,
        }));

        match parent {
            None => self.top.push(id),
            Some(parent_id) => {
                if let Some(Rule {
                    body: RuleBody::Media { children, .. },
                    ..
                }) = self.rules.get_mut(parent_id.0).and_then(Option::as_mut)
                {
                    children.push(id);
                }
            }
        }
        Ok(id)
    }

    /// Remove a rule (and, for `@media`, its children) from the sheet.
    ///
    /// Selector-hash removal is atomic: if any indexed selector of the
    /// rule cannot be found the sheet is left unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] for an unknown or already-removed rule;
    /// [`Error::Invalid`] when the hash and the rule disagree.
    pub fn remove_rule(&mut self, id: RuleId) -> Result<()> {
        enum Detach {
            Hash(Vec<BucketKey>),
            Children(Vec<RuleId>),
            Nothing,
        }

        let Some(rule) = self.rule(id) else {
            return Err(Error::BadParameter);
        };
        let parent = rule.parent;
        let detach = match &rule.body {
            RuleBody::Selectors { selectors, .. } => Detach::Hash(
                selectors
                    .iter()
                    .map(|s| BucketKey::for_selector(s, &self.interner))
                    .collect(),
            ),
            RuleBody::Media { children, .. } => Detach::Children(children.clone()),
            _ => Detach::Nothing,
        };

        match detach {
            Detach::Hash(keys) => self.hash.remove_rule(id, &keys)?,
            Detach::Children(children) => {
                for child in children {
                    self.remove_rule(child)?;
                }
            }
            Detach::Nothing => {}
        }

        match parent {
            None => self.top.retain(|&r| r != id),
            Some(parent_id) => {
                if let Some(Rule {
                    body: RuleBody::Media { children, .. },
                    ..
                }) = self.rules.get_mut(parent_id.0).and_then(Option::as_mut)
                {
                    children.retain(|&r| r != id);
                }
            }
        }

        if let Some(removed) = self.rules.get_mut(id.0).and_then(Option::take) {
            self.size = self.size.saturating_sub(rule_footprint(&removed.body));
        }
        Ok(())
    }

    /// The media mask a rule nested under `parent` is subject to:
    /// the intersection of every enclosing `@media` mask.
    pub(crate) fn effective_media(&self, parent: Option<RuleId>) -> Media {
        let mut media = Media::ALL;
        let mut cursor = parent;
        while let Some(id) = cursor {
            let Some(rule) = self.rule(id) else { break };
            if let RuleBody::Media { media: m, .. } = &rule.body {
                media = media & *m;
            }
            cursor = rule.parent;
        }
        media
    }

    /// Resolve a URL found in the sheet against the sheet's base URL.
    pub(crate) fn resolve_url(&self, relative: &str) -> Result<String> {
        (self.resolver)(&self.url, relative)
    }

    /// The interner the sheet was created with.
    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Latch the used-quirks flag.
    pub(crate) const fn set_used_quirks(&mut self) {
        self.used_quirks = true;
    }

    /// The selector index.
    pub(crate) const fn selector_hash(&self) -> &SelectorHash {
        &self.hash
    }
}

impl fmt::Debug for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stylesheet")
            .field("url", &self.url)
            .field("level", &self.level)
            .field("rules", &self.rules.iter().filter(|r| r.is_some()).count())
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Approximate heap footprint of one rule body.
fn rule_footprint(body: &RuleBody) -> usize {
    let base = size_of::<Rule>();
    match body {
        RuleBody::Selectors { selectors, style } => {
            base + selectors.len() * size_of::<Selector>()
                + style.len() * size_of::<Declaration>()
        }
        RuleBody::FontFace { style } | RuleBody::Page { style, .. } => {
            base + style.len() * size_of::<Declaration>()
        }
        _ => base,
    }
}

/// The fallback URL resolver: a naive textual join good enough for
/// tests and same-directory imports. Real clients pass a proper
/// resolver via [`Params::resolver`].
fn naive_join(base: &str, relative: &str) -> Result<String> {
    if relative.contains("://") || base.is_empty() {
        return Ok(relative.to_owned());
    }
    if let Some(rest) = relative.strip_prefix('/') {
        // Join against the authority, when one can be found.
        if let Some(scheme_end) = base.find("://") {
            let authority_end = base[scheme_end + 3..]
                .find('/')
                .map_or(base.len(), |p| scheme_end + 3 + p);
            return Ok(format!("{}/{rest}", &base[..authority_end]));
        }
        return Ok(relative.to_owned());
    }
    match base.rfind('/') {
        Some(pos) => Ok(format!("{}/{relative}", &base[..pos])),
        None => Ok(relative.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_join() {
        assert_eq!(
            naive_join("http://a.example/css/site.css", "print.css").unwrap(),
            "http://a.example/css/print.css"
        );
        assert_eq!(
            naive_join("http://a.example/css/site.css", "/top.css").unwrap(),
            "http://a.example/top.css"
        );
        assert_eq!(
            naive_join("http://a.example/site.css", "http://b.example/x.css").unwrap(),
            "http://b.example/x.css"
        );
    }

    #[test]
    fn test_append_after_done_is_rejected() {
        let mut sheet = Stylesheet::new(Params::default());
        sheet.append_data(b"p { color: red }").unwrap();
        sheet.data_done().unwrap();
        assert_eq!(sheet.append_data(b"x"), Err(Error::BadParameter));
        assert_eq!(sheet.data_done(), Err(Error::BadParameter));
    }

    fn parse(css: &str) -> Stylesheet {
        let mut sheet = Stylesheet::new(Params::default());
        sheet.append_data(css.as_bytes()).unwrap();
        sheet.data_done().unwrap();
        sheet
    }

    /// Every hash entry must reference a live selector rule and an
    /// existing selector position within it.
    fn assert_hash_consistent(sheet: &Stylesheet) {
        for entry in sheet.selector_hash().all_entries() {
            let rule = sheet
                .rule(entry.rule)
                .expect("hash entry references a removed rule");
            let RuleBody::Selectors { selectors, .. } = &rule.body else {
                panic!("hash entry references a non-selector rule");
            };
            assert!((entry.selector as usize) < selectors.len());
            assert_eq!(rule.index, entry.rule_index);
        }
    }

    #[test]
    fn test_hash_entries_reference_live_rules() {
        let mut sheet = parse(
            "p, .x, #y { color: red }\n\
             @media print { i { color: blue } }\n\
             * { color: green }",
        );
        assert_hash_consistent(&sheet);

        let first = sheet.top_rules()[0];
        sheet.remove_rule(first).unwrap();
        assert_hash_consistent(&sheet);

        let media = sheet.top_rules()[0];
        sheet.remove_rule(media).unwrap();
        assert_hash_consistent(&sheet);
    }

    #[test]
    fn test_media_nesting_masks_hash_entries() {
        use crate::media::Media;
        let sheet = parse("@media tv { p { color: red } }");
        for entry in sheet.selector_hash().all_entries() {
            assert!(entry.media.intersects(Media::TV));
            assert!(!entry.media.intersects(Media::SCREEN));
        }
    }
}
