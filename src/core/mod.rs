//! Core types: serial identifiers, the seeded sequencer, errors.
//!
//! Everything downstream draws randomness from [`CardRng`] and nothing else.

pub mod error;
pub mod mt;
pub mod rng;
pub mod serial;

pub use error::{CardError, ErrorKind, Result, TemplateError};
pub use mt::Mt19937;
pub use rng::{CardRng, DrawScheme, SEQUENCER_VERSION};
pub use serial::SerialId;
