//! Character cells and substitution tables.
//!
//! Wrapping attaches the fixed neighbor labels of a table to each generated
//! glyph by index. Nothing here is random.

use serde::Serialize;

use crate::core::{CardError, Result};

use super::generator::GeneratedChar;
use super::kind::TableKind;

/// Rows per grid column on the card.
pub const GRID_ROWS: usize = 5;

/// One printable cell: a center glyph and four corner labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CharCell {
    pub center: char,
    pub top_left: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub top_right: &'static str,
    /// Rendered with a dashed border.
    pub decorated: bool,
}

/// An ordered table of cells. Position determines grid placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubstitutionTable {
    kind: TableKind,
    cells: Vec<CharCell>,
}

impl SubstitutionTable {
    /// Attach `kind`'s neighbor labels to a generated glyph sequence.
    ///
    /// Fails if `chars` does not fill the table exactly or a label pool
    /// does not match the table length.
    pub fn wrap(kind: TableKind, chars: &[GeneratedChar]) -> Result<Self> {
        if chars.len() != kind.len() {
            return Err(CardError::TableLength {
                table: kind,
                expected: kind.len(),
                actual: chars.len(),
            });
        }
        let labels = kind.labels().resolve(kind)?;

        let cells = chars
            .iter()
            .enumerate()
            .map(|(i, c)| CharCell {
                center: c.glyph,
                top_left: labels.top_left[i],
                bottom_left: labels.bottom_left[i],
                bottom_right: labels.bottom_right[i],
                top_right: labels.top_right[i],
                decorated: c.decorated,
            })
            .collect();

        Ok(Self { kind, cells })
    }

    /// Which table this is.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Cells in placement order.
    #[must_use]
    pub fn cells(&self) -> &[CharCell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Center glyphs in placement order.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().map(|c| c.center)
    }
}

/// Grid view as printed: five rows, columns left to right. Decorated cells
/// are bracketed.
impl std::fmt::Display for SubstitutionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} table", self.kind)?;
        for row in 0..GRID_ROWS {
            let line: Vec<String> = self
                .cells
                .iter()
                .skip(row)
                .step_by(GRID_ROWS)
                .map(|c| {
                    if c.decorated {
                        format!("[{}]", c.center)
                    } else {
                        format!(" {} ", c.center)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}
