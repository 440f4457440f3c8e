//! Card serial identifiers.
//!
//! A serial is a UUID. Its 128-bit integer value is the only seed the
//! generator ever sees, so the same serial always yields the same card.

use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use super::error::CardError;

/// Serial identifier printed on the front of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SerialId(Uuid);

impl SerialId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random (v4) serial.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Integer value of the serial, used as the sequencer seed.
    #[must_use]
    pub fn seed(self) -> u128 {
        self.0.as_u128()
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl FromStr for SerialId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|source| CardError::MalformedSerial {
                input: s.to_string(),
                source,
            })
    }
}

/// Canonical lowercase hyphenated form: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
impl std::fmt::Display for SerialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
