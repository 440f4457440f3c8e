//! Character classes printed on the card.
//!
//! Glyphs that are easy to confuse on paper are left out: `I L O U` and
//! `i l o u` from the letters, quotes, brackets and punctuation that blur at
//! small sizes from the marks. Registry order is part of the reproducibility
//! contract (samples index into these strings), so never reorder them.

use serde::Serialize;

/// Decimal digits.
pub const DIGITS: &str = "0123456789";

/// Upper-case letters without `I L O U`.
pub const UPPER: &str = "ABCDEFGHJKMNPQRSTVWXZY";

/// Lower-case letters without `i l o u`.
pub const LOWER: &str = "abcdefghjkmnpqrstvwxyz";

/// Symbol marks.
pub const MARKS: &str = "!#$%&+/;<=>?@^";

/// A character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Alphabet {
    Digits,
    Upper,
    Lower,
    Marks,
}

impl Alphabet {
    /// Every alphabet, in registry order.
    pub const ALL: [Alphabet; 4] = [Self::Digits, Self::Upper, Self::Lower, Self::Marks];

    /// The glyphs of this class as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Digits => DIGITS,
            Self::Upper => UPPER,
            Self::Lower => LOWER,
            Self::Marks => MARKS,
        }
    }

    /// The glyphs of this class, in registry order.
    #[must_use]
    pub fn glyphs(self) -> Vec<char> {
        self.as_str().chars().collect()
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(self) -> usize {
        self.as_str().chars().count()
    }

    /// Does this class contain `c`?
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        self.as_str().contains(c)
    }

    /// Find the class a glyph belongs to.
    #[must_use]
    pub fn of(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(Alphabet::Digits.len(), 10);
        assert_eq!(Alphabet::Upper.len(), 22);
        assert_eq!(Alphabet::Lower.len(), 22);
        assert_eq!(Alphabet::Marks.len(), 14);
    }

    #[test]
    fn test_no_ambiguous_letters() {
        for c in ['I', 'L', 'O', 'U', 'i', 'l', 'o', 'u'] {
            assert_eq!(Alphabet::of(c), None, "{c} should be excluded");
        }
    }

    #[test]
    fn test_classes_are_disjoint_and_unique() {
        let mut all: Vec<char> = Alphabet::ALL.iter().flat_map(|a| a.glyphs()).collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_lower_matches_upper_set() {
        let mut upper: Vec<char> = UPPER.to_lowercase().chars().collect();
        let mut lower = Alphabet::Lower.glyphs();
        upper.sort_unstable();
        lower.sort_unstable();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_of() {
        assert_eq!(Alphabet::of('7'), Some(Alphabet::Digits));
        assert_eq!(Alphabet::of('Z'), Some(Alphabet::Upper));
        assert_eq!(Alphabet::of('z'), Some(Alphabet::Lower));
        assert_eq!(Alphabet::of('@'), Some(Alphabet::Marks));
        assert_eq!(Alphabet::of('*'), None);
    }
}
