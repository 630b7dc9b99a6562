//! Declaration blocks and typed property values.
//!
//! A [`Style`] is the parsed body of a ruleset (or of an inline `style`
//! attribute): an ordered sequence of longhand [`Declaration`]s. The
//! original byte-oriented encoding becomes a tagged stream here; the
//! properties that made it worthwhile are retained - applying a block is
//! a linear scan where later declarations overwrite earlier ones, and
//! marking a block `!important` is a linear flag pass.

pub mod declaration;
pub mod values;

pub use declaration::{
    ALL_PROPERTIES, Declaration, Inheritable, PropertyDeclaration, PropertyId,
};

use serde::Serialize;

/// An ordered block of longhand declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    declarations: Vec<Declaration>,
}

impl Style {
    /// Create an empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Append a declaration. Source order is preserved; duplicates are
    /// kept so that the cascade's "last declaration wins" rule falls out
    /// of the application order.
    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// The declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Number of declarations in the block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// `true` when the block holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Mark every declaration in the block `!important`.
    ///
    /// [§ 6.4.2](https://www.w3.org/TR/CSS21/cascade.html#important-rules)
    /// "Declaring a shorthand property to be '!important' is equivalent
    /// to declaring all of its sub-properties to be '!important'."
    ///
    /// The rewrite is a linear scan and is idempotent.
    pub fn make_important(&mut self) {
        for declaration in &mut self.declarations {
            declaration.important = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::values::{Color, Display};

    fn sample_style() -> Style {
        let mut style = Style::new();
        style.push(Declaration::new(PropertyDeclaration::Color(
            Inheritable::Value(Color::BLACK),
        )));
        style.push(Declaration::new(PropertyDeclaration::Display(
            Inheritable::Value(Display::Block),
        )));
        style
    }

    #[test]
    fn test_make_important_sets_every_flag() {
        let mut style = sample_style();
        style.make_important();
        assert!(style.declarations().iter().all(|d| d.important));
    }

    #[test]
    fn test_make_important_idempotent() {
        let mut style = sample_style();
        style.make_important();
        let once = style.clone();
        style.make_important();
        assert_eq!(style, once);
    }
}
