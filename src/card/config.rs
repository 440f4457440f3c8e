//! Card configuration.
//!
//! Everything here is validated before any randomness is drawn or any file
//! is read.

use std::path::{Path, PathBuf};

use crate::core::{CardError, DrawScheme, Result};
use crate::svg::Origin;
use crate::tables::TableKind;

/// Front card template file name.
pub const CARD_FRONT_TEMPLATE: &str = "cardFront.svg";

/// Back card template file name.
pub const CARD_BACK_TEMPLATE: &str = "cardBack.svg";

/// Template file names an output must never overwrite.
pub const RESERVED_NAMES: [&str; 5] = [
    TableKind::Digits15.template_name(),
    TableKind::Alnum25.template_name(),
    TableKind::Mixed50.template_name(),
    CARD_FRONT_TEMPLATE,
    CARD_BACK_TEMPLATE,
];

/// Serial placeholder id on the front template.
pub const SERIAL_ID: &str = "textS";

pub const CARD_TOP_Y: f64 = 37.041664;
/// Left table origin X (15-digit front, 50-mixed back).
pub const CARD_LEFT_X: f64 = 14.816665;
/// Right table origin X (25-alphanumeric front).
pub const CARD_RIGHT_X: f64 = 226.48334;

/// Origin of the left-hand table.
pub const LEFT_ORIGIN: Origin = Origin::new(CARD_LEFT_X, CARD_TOP_Y);

/// Origin of the right-hand table.
pub const RIGHT_ORIGIN: Origin = Origin::new(CARD_RIGHT_X, CARD_TOP_Y);

/// A font family override for cell text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFamily(String);

impl FontFamily {
    /// Validate a family name for splicing into a CSS style declaration.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let bad = |c: char| matches!(c, ';' | ':' | '"' | '<' | '>') || c.is_control();
        if name.trim().is_empty() || name.chars().any(bad) {
            return Err(CardError::InvalidFont(name));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Front and back output paths, checked against the reserved names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    front: PathBuf,
    back: PathBuf,
}

impl OutputPaths {
    /// Fails if either file name equals a reserved template name.
    pub fn new(front: impl Into<PathBuf>, back: impl Into<PathBuf>) -> Result<Self> {
        let front = front.into();
        let back = back.into();
        check_reserved("front", &front)?;
        check_reserved("back", &back)?;
        Ok(Self { front, back })
    }

    /// Timestamped default names in the current directory.
    pub fn timestamped(now: chrono::NaiveDateTime) -> Result<Self> {
        let stamp = now.format("%Y-%m-%dT%H%M%S");
        Self::new(
            format!("{stamp}_card-front.svg"),
            format!("{stamp}_card-back.svg"),
        )
    }

    #[must_use]
    pub fn front(&self) -> &Path {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &Path {
        &self.back
    }
}

fn check_reserved(side: &'static str, path: &Path) -> Result<()> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    match RESERVED_NAMES.iter().find(|&&r| r == file_name) {
        Some(&reserved) => Err(CardError::ReservedName {
            side,
            name: path.display().to_string(),
            reserved,
        }),
        None => Ok(()),
    }
}

/// Complete configuration for one card run.
#[derive(Clone, Debug)]
pub struct CardConfig {
    pub outputs: OutputPaths,
    pub font: Option<FontFamily>,
    pub template_dir: PathBuf,
    pub scheme: DrawScheme,
}

impl CardConfig {
    /// Create a configuration reading templates from the current directory.
    pub fn new(outputs: OutputPaths) -> Self {
        Self {
            outputs,
            font: None,
            template_dir: PathBuf::from("."),
            scheme: DrawScheme::default(),
        }
    }

    /// Set the font override.
    #[must_use]
    pub fn with_font(mut self, font: FontFamily) -> Self {
        self.font = Some(font);
        self
    }

    /// Select the draw scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: DrawScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the template directory.
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }
}
