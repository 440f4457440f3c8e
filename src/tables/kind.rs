//! The three table shapes and their neighbor-label schemes.
//!
//! Labels are printed around each cell so a user can navigate the grid on
//! the physical card. They are fixed per table and aligned by index.

use serde::Serialize;

use crate::core::{CardError, Result};

/// Which substitution table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TableKind {
    /// 15 digits, repeats allowed.
    Digits15,
    /// 5 digits and 20 letters.
    Alnum25,
    /// Digits, letters and marks.
    Mixed50,
}

impl TableKind {
    /// Generation order. Changing it changes every card.
    pub const ALL: [TableKind; 3] = [Self::Digits15, Self::Alnum25, Self::Mixed50];

    /// Number of cells.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Digits15 => 15,
            Self::Alnum25 => 25,
            Self::Mixed50 => 50,
        }
    }

    /// Number of decorated cells.
    #[must_use]
    pub const fn decorated_count(self) -> usize {
        match self {
            Self::Digits15 => 3,
            Self::Alnum25 => 4,
            Self::Mixed50 => 5,
        }
    }

    /// File name of the cell template for this table.
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Digits15 => "nu15.svg",
            Self::Alnum25 => "na25.svg",
            Self::Mixed50 => "mx50.svg",
        }
    }

    /// Neighbor-label scheme.
    #[must_use]
    pub const fn labels(self) -> LabelScheme {
        match self {
            Self::Digits15 => LabelScheme {
                top_left: LabelPool::Glyphs("ABCDEFGHIJKLMNO"),
                bottom_left: LabelPool::Blank,
                bottom_right: LabelPool::List(&[
                    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", ",.", "!?", ":;", "/&",
                ]),
                top_right: LabelPool::Glyphs("ガザダバパハマヤラワアカサタナ"),
            },
            Self::Alnum25 => LabelScheme {
                top_left: LabelPool::List(&[
                    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P",
                    "Q", "R", "S", "T", "U", "V", "W", "XZ", "Y",
                ]),
                bottom_left: LabelPool::Glyphs("ワ↓ーンヲラリルレロヤヰユヱヨマミムメモハヒフヘホ"),
                bottom_right: LabelPool::Blank,
                top_right: LabelPool::Glyphs("ナニヌネノタチツテトサシスセソカキクケコアイウエオ"),
            },
            Self::Mixed50 => LabelScheme {
                top_left: LabelPool::Blank,
                bottom_left: LabelPool::Glyphs("ABCDEFGHIJKLMNOPQRSTUVWXYZ@,./1234567890:;?!&=$*%#"),
                bottom_right: LabelPool::Blank,
                top_right: LabelPool::Glyphs(
                    "ワ↓ーンヲラリルレロヤヰユヱヨマミムメモハヒフヘホナニヌネノタチツテトサシスセソカキクケコアイウエオ",
                ),
            },
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Digits15 => "15-digit",
            Self::Alnum25 => "25-alphanumeric",
            Self::Mixed50 => "50-mixed",
        };
        f.write_str(name)
    }
}

/// A fixed sequence of neighbor labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPool {
    /// No label at any position.
    Blank,
    /// One label per character.
    Glyphs(&'static str),
    /// Explicit labels, possibly several characters each.
    List(&'static [&'static str]),
}

impl LabelPool {
    /// Expand into one label per cell, blank pools filling `len` empties.
    #[must_use]
    pub fn expand(self, len: usize) -> Vec<&'static str> {
        match self {
            Self::Blank => vec![""; len],
            Self::Glyphs(s) => s
                .char_indices()
                .map(|(i, c)| &s[i..i + c.len_utf8()])
                .collect(),
            Self::List(labels) => labels.to_vec(),
        }
    }
}

/// The four label pools of one table, expanded and validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelScheme {
    pub top_left: LabelPool,
    pub bottom_left: LabelPool,
    pub bottom_right: LabelPool,
    pub top_right: LabelPool,
}

/// Index-aligned labels ready for wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pub top_left: Vec<&'static str>,
    pub bottom_left: Vec<&'static str>,
    pub bottom_right: Vec<&'static str>,
    pub top_right: Vec<&'static str>,
}

impl LabelScheme {
    /// Expand every pool and check it has exactly `kind.len()` entries.
    pub fn resolve(self, kind: TableKind) -> Result<Labels> {
        let expected = kind.len();
        let expand = |pool: LabelPool, name: &'static str| {
            let labels = pool.expand(expected);
            if labels.len() == expected {
                Ok(labels)
            } else {
                Err(CardError::LabelLength {
                    table: kind,
                    pool: name,
                    expected,
                    actual: labels.len(),
                })
            }
        };

        Ok(Labels {
            top_left: expand(self.top_left, "top-left")?,
            bottom_left: expand(self.bottom_left, "bottom-left")?,
            bottom_right: expand(self.bottom_right, "bottom-right")?,
            top_right: expand(self.top_right, "top-right")?,
        })
    }
}

/// Check every table's label scheme. Called once at startup.
pub fn validate_label_schemes() -> Result<()> {
    for kind in TableKind::ALL {
        kind.labels().resolve(kind)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemes_are_valid() {
        validate_label_schemes().unwrap();
    }

    #[test]
    fn test_glyph_pool_splits_multibyte() {
        let labels = LabelPool::Glyphs("ワ↓ー").expand(3);
        assert_eq!(labels, vec!["ワ", "↓", "ー"]);
    }

    #[test]
    fn test_blank_pool() {
        assert_eq!(LabelPool::Blank.expand(2), vec!["", ""]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let scheme = LabelScheme {
            top_left: LabelPool::Glyphs("ABC"),
            ..TableKind::Digits15.labels()
        };
        let err = scheme.resolve(TableKind::Digits15).unwrap_err();
        assert!(matches!(
            err,
            CardError::LabelLength {
                pool: "top-left",
                expected: 15,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_multi_char_labels() {
        let labels = TableKind::Alnum25.labels().resolve(TableKind::Alnum25).unwrap();
        assert_eq!(labels.top_left[23], "XZ");
        assert_eq!(labels.top_left[24], "Y");
        assert_eq!(labels.bottom_right, vec![""; 25]);

        let labels = TableKind::Digits15.labels().resolve(TableKind::Digits15).unwrap();
        assert_eq!(labels.bottom_right[14], "/&");
        assert_eq!(labels.top_right[0], "ガ");
    }

    #[test]
    fn test_sizes() {
        let sizes: Vec<_> = TableKind::ALL.iter().map(|k| (k.len(), k.decorated_count())).collect();
        assert_eq!(sizes, vec![(15, 3), (25, 4), (50, 5)]);
    }
}
