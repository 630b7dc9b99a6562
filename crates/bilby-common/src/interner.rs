//! Reference-counted string interning.
//!
//! CSS repeats the same identifiers endlessly: element names, class names,
//! property keywords, font families. The engine stores each unique string
//! once and passes around [`Atom`] handles, so equality is a pointer
//! comparison and selector matching never walks byte-by-byte for the
//! common case.
//!
//! Case matters: interning is case-*preserving*, and
//! [CSS 2.1 § 4.1.3](https://www.w3.org/TR/CSS21/syndata.html#characters)
//! "All CSS syntax is case-insensitive within the ASCII range" - so a
//! separate [`Atom::eq_ignore_ascii_case`] folds ASCII letters only.
//! Values outside CSS syntax (class names, `id` attributes, font family
//! names) stay case-sensitive and use plain equality.
//!
//! The interner is single-threaded by design, matching the engine's
//! cooperative scheduling model; handles are `Rc`-backed and not `Send`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Payload shared by every clone of an [`Atom`].
struct AtomInner {
    /// The interned text, immutable for the atom's lifetime.
    text: Box<str>,
    /// Hash of the text bytes, computed once at interning time.
    hash: u64,
}

/// A handle to an interned string.
///
/// Cloning bumps the reference count; dropping the last clone outside the
/// interner makes the entry eligible for [`Interner::purge`]. Two atoms
/// from the same interner compare equal exactly when they are the same
/// allocation.
#[derive(Clone)]
pub struct Atom {
    inner: Rc<AtomInner>,
}

impl Atom {
    /// The interned text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Length of the interned text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.text.len()
    }

    /// `true` for the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// Case-insensitive comparison folding ASCII letters only.
    ///
    /// [§ 4.1.3](https://www.w3.org/TR/CSS21/syndata.html#characters)
    /// case-insensitivity applies "within the ASCII range"; non-ASCII
    /// code points are compared verbatim.
    #[must_use]
    pub fn eq_ignore_ascii_case(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
            || self.inner.text.eq_ignore_ascii_case(&other.inner.text)
    }

    /// Case-insensitive comparison against a plain string slice.
    #[must_use]
    pub fn eq_str_ignore_ascii_case(&self, other: &str) -> bool {
        self.inner.text.eq_ignore_ascii_case(other)
    }

    /// Current reference count, counting the interner's own handle.
    /// Exposed for lifecycle assertions in tests.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl PartialEq for Atom {
    /// Pointer equality: atoms interned from equal text through the same
    /// interner share one allocation.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:?})", self.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Atom {
    /// Serialized as the underlying text.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Case-aware, reference-counted unique string storage.
///
/// The interner is a cheaply-cloneable handle; every clone refers to the
/// same table. All stylesheets that should share atoms (so that selector
/// matching can use pointer equality across sheets) must be built with
/// clones of one interner.
#[derive(Clone, Default)]
pub struct Interner {
    table: Rc<RefCell<HashMap<Box<str>, Atom>>>,
}

impl Interner {
    /// Create an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the canonical atom for it.
    ///
    /// Repeated calls with equal text return pointer-identical atoms.
    #[must_use]
    pub fn intern(&self, text: &str) -> Atom {
        let mut table = self.table.borrow_mut();
        if let Some(existing) = table.get(text) {
            return existing.clone();
        }

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        hasher.write(text.as_bytes());
        let atom = Atom {
            inner: Rc::new(AtomInner {
                text: Box::from(text),
                hash: hasher.finish(),
            }),
        };
        let _ = table.insert(Box::from(text), atom.clone());
        atom
    }

    /// Look up the atom for `text` without interning it.
    ///
    /// Selector matching uses this to probe hash buckets with names
    /// taken from the document: a name that was never interned cannot
    /// have a bucket, and probing must not grow the table.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<Atom> {
        self.table.borrow().get(text).cloned()
    }

    /// Number of live entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    /// `true` when no strings are interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    /// Evict every atom whose only remaining handle is the interner's own.
    ///
    /// This is the Rust rendition of "destruction of the last reference
    /// removes it from the interner": dropping owning structures releases
    /// their atom references, and a purge afterwards reclaims the storage.
    /// Returns the number of entries evicted.
    pub fn purge(&self) -> usize {
        let mut table = self.table.borrow_mut();
        let before = table.len();
        table.retain(|_, atom| Rc::strong_count(&atom.inner) > 1);
        before - table.len()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interner({} entries)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let interner = Interner::new();
        let a = interner.intern("div");
        let b = interner.intern("div");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_pointer_equality_is_case_sensitive() {
        let interner = Interner::new();
        let lower = interner.intern("main");
        let upper = interner.intern("MAIN");
        assert_ne!(lower, upper);
        assert!(lower.eq_ignore_ascii_case(&upper));
    }

    #[test]
    fn test_case_insensitive_folds_ascii_only() {
        let interner = Interner::new();
        let a = interner.intern("straße");
        let b = interner.intern("STRASSE");
        // Non-ASCII code points must not be folded.
        assert!(!a.eq_ignore_ascii_case(&b));
    }

    #[test]
    fn test_ref_count_tracks_clones() {
        let interner = Interner::new();
        let a = interner.intern("p");
        // One handle here, one inside the interner's table.
        assert_eq!(a.ref_count(), 2);
        let b = a.clone();
        assert_eq!(a.ref_count(), 3);
        drop(b);
        assert_eq!(a.ref_count(), 2);
    }

    #[test]
    fn test_purge_reclaims_unreferenced() {
        let interner = Interner::new();
        let keep = interner.intern("keep");
        {
            let _tmp = interner.intern("tmp");
        }
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.purge(), 1);
        assert_eq!(interner.len(), 1);
        assert_eq!(interner.intern("keep"), keep);
    }
}
