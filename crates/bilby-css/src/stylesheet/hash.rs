//! The selector hash.
//!
//! Matching an element against every selector of every rule is
//! quadratic in practice, so each stylesheet indexes its selectors by a
//! *primary key* taken from the rightmost simple selector: the ID name
//! if one is present, else the first class name, else the element name,
//! else a shared universal bucket. Selection then only examines the
//! buckets an element can possibly hit.
//!
//! Buckets are kept in ascending
//! `(specificity, rule index, selector position)` order so bucket
//! iteration already follows cascade order within one sheet and equal
//! keys preserve insertion order.

use std::collections::HashMap;

use bilby_common::{Atom, Error, Interner, Result};

use crate::media::Media;
use crate::selector::{Detail, Selector, Specificity};

use super::rule::RuleId;

/// One indexed selector.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// The owning selector-rule.
    pub rule: RuleId,
    /// Position of the selector within the rule's selector list.
    pub selector: u32,
    /// The selector's precomputed specificity.
    pub specificity: Specificity,
    /// The rule's per-sheet insertion index.
    pub rule_index: u32,
    /// The effective media of the rule (intersection of the enclosing
    /// `@media` masks; `ALL` at the top level).
    pub media: Media,
}

impl Entry {
    /// The bucket sort key.
    const fn sort_key(&self) -> (Specificity, u32, u32) {
        (self.specificity, self.rule_index, self.selector)
    }
}

/// Which bucket a selector belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BucketKey {
    /// Keyed by ID name.
    Id(Atom),
    /// Keyed by class name.
    Class(Atom),
    /// Keyed by lowercased element name.
    Element(Atom),
    /// The universal fallback bucket.
    Universal,
}

impl BucketKey {
    /// Compute the primary key of a selector from its subject.
    ///
    /// The ID wins over a class, a class over the element name; a
    /// subject with none of the three lands in the universal bucket.
    /// Element names are folded to lowercase so lookup by a document's
    /// element name is case-insensitive, as HTML requires.
    pub(crate) fn for_selector(selector: &Selector, interner: &Interner) -> Self {
        let mut class = None;
        let mut element = None;
        for detail in selector.subject() {
            match detail {
                Detail::Id(name) => return Self::Id(name.clone()),
                Detail::Class(name) if class.is_none() => class = Some(name.clone()),
                Detail::Element(name) if element.is_none() => element = Some(name.clone()),
                _ => {}
            }
        }
        if let Some(name) = class {
            return Self::Class(name);
        }
        if let Some(name) = element {
            return Self::Element(interner.intern(&name.as_str().to_ascii_lowercase()));
        }
        Self::Universal
    }
}

/// Per-stylesheet selector index.
#[derive(Debug, Default)]
pub(crate) struct SelectorHash {
    ids: HashMap<Atom, Vec<Entry>>,
    classes: HashMap<Atom, Vec<Entry>>,
    elements: HashMap<Atom, Vec<Entry>>,
    universal: Vec<Entry>,
}

impl SelectorHash {
    /// Create an empty hash.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its key, preserving bucket order.
    pub(crate) fn insert(&mut self, key: BucketKey, entry: Entry) {
        let bucket = self.bucket_mut(key);
        let at = bucket.partition_point(|e| e.sort_key() <= entry.sort_key());
        bucket.insert(at, entry);
    }

    /// Remove every entry belonging to `rule`.
    ///
    /// The removal is atomic: all of the rule's entries are located
    /// first and nothing is touched unless every expected entry is
    /// present, so a failed removal leaves the hash unchanged.
    pub(crate) fn remove_rule(
        &mut self,
        rule: RuleId,
        keys: &[BucketKey],
    ) -> Result<()> {
        for (position, key) in keys.iter().enumerate() {
            let bucket = self.bucket(key);
            let found = bucket
                .iter()
                .any(|e| e.rule == rule && e.selector as usize == position);
            if !found {
                return Err(Error::Invalid);
            }
        }
        for (position, key) in keys.iter().enumerate() {
            let bucket = self.bucket_mut(key.clone());
            bucket.retain(|e| !(e.rule == rule && e.selector as usize == position));
        }
        Ok(())
    }

    /// Entries keyed by the given ID name.
    pub(crate) fn ids(&self, name: &Atom) -> &[Entry] {
        self.ids.get(name).map_or(&[], Vec::as_slice)
    }

    /// Entries keyed by the given class name.
    pub(crate) fn classes(&self, name: &Atom) -> &[Entry] {
        self.classes.get(name).map_or(&[], Vec::as_slice)
    }

    /// Entries keyed by the given (lowercased) element name.
    pub(crate) fn elements(&self, name: &Atom) -> &[Entry] {
        self.elements.get(name).map_or(&[], Vec::as_slice)
    }

    /// Entries in the universal bucket.
    pub(crate) fn universal(&self) -> &[Entry] {
        &self.universal
    }

    /// Every entry, for invariant checks.
    pub(crate) fn all_entries(&self) -> impl Iterator<Item = &Entry> {
        self.ids
            .values()
            .chain(self.classes.values())
            .chain(self.elements.values())
            .flat_map(|v| v.iter())
            .chain(self.universal.iter())
    }

    fn bucket(&self, key: &BucketKey) -> &[Entry] {
        match key {
            BucketKey::Id(name) => self.ids(name),
            BucketKey::Class(name) => self.classes(name),
            BucketKey::Element(name) => self.elements(name),
            BucketKey::Universal => &self.universal,
        }
    }

    fn bucket_mut(&mut self, key: BucketKey) -> &mut Vec<Entry> {
        match key {
            BucketKey::Id(name) => self.ids.entry(name).or_default(),
            BucketKey::Class(name) => self.classes.entry(name).or_default(),
            BucketKey::Element(name) => self.elements.entry(name).or_default(),
            BucketKey::Universal => &mut self.universal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rule: usize, selector: u32, specificity: Specificity) -> Entry {
        Entry {
            rule: RuleId(rule),
            selector,
            specificity,
            rule_index: rule as u32,
            media: Media::ALL,
        }
    }

    #[test]
    fn test_bucket_order_is_ascending() {
        let interner = Interner::new();
        let key = BucketKey::Element(interner.intern("p"));
        let mut hash = SelectorHash::new();
        hash.insert(key.clone(), entry(2, 0, Specificity(0, 0, 1, 1)));
        hash.insert(key.clone(), entry(0, 0, Specificity(0, 0, 0, 1)));
        hash.insert(key.clone(), entry(1, 0, Specificity(0, 0, 0, 1)));

        let bucket = hash.elements(&interner.intern("p"));
        let order: Vec<_> = bucket.iter().map(|e| e.rule.0).collect();
        // Equal specificity preserves insertion (rule-index) order.
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_rule_is_atomic() {
        let interner = Interner::new();
        let key = BucketKey::Class(interner.intern("x"));
        let mut hash = SelectorHash::new();
        hash.insert(key.clone(), entry(0, 0, Specificity(0, 0, 1, 0)));

        // Expecting two selectors when only one is indexed must fail
        // without touching the bucket.
        let keys = vec![key.clone(), key.clone()];
        assert_eq!(hash.remove_rule(RuleId(0), &keys), Err(Error::Invalid));
        assert_eq!(hash.classes(&interner.intern("x")).len(), 1);

        assert!(hash.remove_rule(RuleId(0), &keys[..1]).is_ok());
        assert!(hash.classes(&interner.intern("x")).is_empty());
    }

    #[test]
    fn test_key_prefers_id_over_class_over_element() {
        let interner = Interner::new();
        let selector = Selector::new(
            vec![
                Detail::Element(interner.intern("DIV")),
                Detail::Class(interner.intern("note")),
                Detail::Id(interner.intern("main")),
            ],
            Vec::new(),
        );
        assert_eq!(
            BucketKey::for_selector(&selector, &interner),
            BucketKey::Id(interner.intern("main"))
        );

        let selector = Selector::new(
            vec![Detail::Element(interner.intern("DIV"))],
            Vec::new(),
        );
        // Element keys are lowercased.
        assert_eq!(
            BucketKey::for_selector(&selector, &interner),
            BucketKey::Element(interner.intern("div"))
        );

        let selector = Selector::new(vec![Detail::Universal], Vec::new());
        assert_eq!(
            BucketKey::for_selector(&selector, &interner),
            BucketKey::Universal
        );
    }
}
