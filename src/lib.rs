//! # password-card
//!
//! Deterministic generator for two-sided password cards.
//!
//! A card is keyed by a UUID serial. The serial seeds every random draw, so
//! the same serial always reproduces the same card: lose the paper, keep the
//! serial, print it again.
//!
//! ## Pipeline
//!
//! 1. Seed a [`CardRng`] from the serial's 128-bit value.
//! 2. Generate the 15-digit, 25-alphanumeric and 50-mixed tables, in that
//!    order.
//! 3. Attach fixed neighbor labels to each glyph.
//! 4. Render each cell into a copy of its cell template and embed it as an
//!    image on the front or back card template.
//!
//! ## Modules
//!
//! - `core`: Serial identifiers, the seeded sequencer and its draw schemes, errors
//! - `alphabet`: Character classes
//! - `tables`: Table generation and neighbor-label wrapping
//! - `svg`: Document tree, cell embedding, grid placement
//! - `card`: Configuration, template sources, assembly and output

pub mod alphabet;
pub mod card;
pub mod core;
pub mod svg;
pub mod tables;

// Re-export commonly used types
pub use crate::core::{
    CardError, CardRng, DrawScheme, ErrorKind, SerialId, TemplateError, SEQUENCER_VERSION,
};

pub use crate::alphabet::Alphabet;

pub use crate::tables::{CardTables, CharCell, SubstitutionTable, TableKind};

pub use crate::svg::{Document, EmbeddedCell, Origin};

pub use crate::card::{
    generate_card, CardAssembler, CardConfig, CardDocuments, FontFamily, MemoryTemplates,
    OutputPaths, TemplateDir, TemplateSource,
};
