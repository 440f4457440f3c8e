//! Substitution tables: generation and neighbor-label wrapping.
//!
//! [`CardTables::generate`] is the only place that decides the draw order
//! across tables.

pub mod cell;
pub mod generator;
pub mod kind;

use serde::Serialize;

use crate::core::{CardRng, DrawScheme, Result, SerialId};

pub use cell::{CharCell, SubstitutionTable, GRID_ROWS};
pub use generator::{generate, GeneratedChar};
pub use kind::{validate_label_schemes, LabelPool, LabelScheme, Labels, TableKind};

/// The three tables of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardTables {
    pub serial: SerialId,
    pub scheme: DrawScheme,
    pub digits15: SubstitutionTable,
    pub alnum25: SubstitutionTable,
    pub mixed50: SubstitutionTable,
}

impl CardTables {
    /// Build all tables for `serial` with the default draw scheme.
    pub fn generate(serial: SerialId) -> Result<Self> {
        Self::generate_with(serial, DrawScheme::default())
    }

    /// Seed a sequencer from `serial` and build all tables in fixed order.
    pub fn generate_with(serial: SerialId, scheme: DrawScheme) -> Result<Self> {
        let mut rng = CardRng::with_scheme(serial.seed(), scheme);

        // Draw order: 15, 25, 50. All generation precedes wrapping.
        let digits15 = generator::generate(TableKind::Digits15, &mut rng);
        let alnum25 = generator::generate(TableKind::Alnum25, &mut rng);
        let mixed50 = generator::generate(TableKind::Mixed50, &mut rng);
        tracing::debug!(%serial, %scheme, "generated substitution tables");

        Ok(Self {
            serial,
            scheme,
            digits15: SubstitutionTable::wrap(TableKind::Digits15, &digits15)?,
            alnum25: SubstitutionTable::wrap(TableKind::Alnum25, &alnum25)?,
            mixed50: SubstitutionTable::wrap(TableKind::Mixed50, &mixed50)?,
        })
    }

    /// Look up a table by kind.
    #[must_use]
    pub fn get(&self, kind: TableKind) -> &SubstitutionTable {
        match kind {
            TableKind::Digits15 => &self.digits15,
            TableKind::Alnum25 => &self.alnum25,
            TableKind::Mixed50 => &self.mixed50,
        }
    }
}

impl std::fmt::Display for CardTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n{}", self.digits15, self.alnum25, self.mixed50)
    }
}
