//! Media types.
//!
//! [CSS 2.1 § 7.3 Recognized media types](https://www.w3.org/TR/CSS21/media.html#media-types)
//!
//! "The names chosen for CSS media types reflect target devices for which
//! the relevant properties make sense."
//!
//! A stylesheet, an `@import`, and an `@media` block each carry a set of
//! applicable media types; style selection intersects those sets with the
//! requested media. CSS 2.1 has media-type *lists* only - media queries
//! are out of scope.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of media types, stored as a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Media(u64);

impl Media {
    /// The empty set: applies to no media.
    pub const NONE: Self = Self(0);
    /// [§ 7.3] "aural - intended for speech synthesizers"
    pub const AURAL: Self = Self(1 << 0);
    /// [§ 7.3] "braille - intended for braille tactile feedback devices"
    pub const BRAILLE: Self = Self(1 << 1);
    /// [§ 7.3] "embossed - intended for paged braille printers"
    pub const EMBOSSED: Self = Self(1 << 2);
    /// [§ 7.3] "handheld - intended for handheld devices"
    pub const HANDHELD: Self = Self(1 << 3);
    /// [§ 7.3] "print - intended for paged material"
    pub const PRINT: Self = Self(1 << 4);
    /// [§ 7.3] "projection - intended for projected presentations"
    pub const PROJECTION: Self = Self(1 << 5);
    /// [§ 7.3] "screen - intended primarily for color computer screens"
    pub const SCREEN: Self = Self(1 << 6);
    /// [§ 7.3] "speech - intended for speech synthesizers" (CSS 2.1 reserves it)
    pub const SPEECH: Self = Self(1 << 7);
    /// [§ 7.3] "tty - intended for media using a fixed-pitch character grid"
    pub const TTY: Self = Self(1 << 8);
    /// [§ 7.3] "tv - intended for television-type devices"
    pub const TV: Self = Self(1 << 9);
    /// [§ 7.2.1] "all - Suitable for all devices."
    pub const ALL: Self = Self(u64::MAX);

    /// Look up a media type by its CSS name (ASCII case-insensitive).
    ///
    /// Returns `None` for unrecognized names; per
    /// [§ 7.2.1](https://www.w3.org/TR/CSS21/media.html#at-media-rule)
    /// unknown media types are simply never matched, they do not
    /// invalidate the list they appear in.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Some(match name.as_str() {
            "aural" => Self::AURAL,
            "braille" => Self::BRAILLE,
            "embossed" => Self::EMBOSSED,
            "handheld" => Self::HANDHELD,
            "print" => Self::PRINT,
            "projection" => Self::PROJECTION,
            "screen" => Self::SCREEN,
            "speech" => Self::SPEECH,
            "tty" => Self::TTY,
            "tv" => Self::TV,
            "all" => Self::ALL,
            _ => return None,
        })
    }

    /// `true` if the two sets share at least one media type.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `true` for the empty set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Media {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Media {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Media {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Media::from_name("SCREEN"), Some(Media::SCREEN));
        assert_eq!(Media::from_name("Print"), Some(Media::PRINT));
        assert_eq!(Media::from_name("3d-glasses"), None);
    }

    #[test]
    fn test_all_intersects_everything() {
        assert!(Media::ALL.intersects(Media::TTY));
        assert!(!Media::NONE.intersects(Media::ALL));
    }

    #[test]
    fn test_union() {
        let mask = Media::SCREEN | Media::PRINT;
        assert!(mask.intersects(Media::SCREEN));
        assert!(mask.intersects(Media::PRINT));
        assert!(!mask.intersects(Media::TV));
    }
}
