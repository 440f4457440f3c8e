//! Error types for card generation.
//!
//! Every error is fatal: the run aborts and no output is written.
//! [`CardError::kind`] groups variants the way callers report them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tables::TableKind;

/// Broad error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Usage or static configuration mistake, detected before any work.
    Configuration,
    /// A template document lacks a structure the pipeline relies on.
    Template,
    /// Reading a template or writing an output failed.
    Io,
}

/// Top-level error for the card pipeline.
#[derive(Error, Debug)]
pub enum CardError {
    /// An output name equals a reserved template file name.
    #[error("bad name for the card {side}: {name:?} collides with template {reserved:?}")]
    ReservedName {
        side: &'static str,
        name: String,
        reserved: &'static str,
    },

    /// The serial identifier is not a UUID.
    #[error("malformed serial identifier {input:?}: {source}")]
    MalformedSerial {
        input: String,
        #[source]
        source: uuid::Error,
    },

    /// The font family override cannot be spliced into a style declaration.
    #[error("invalid font family {0:?}")]
    InvalidFont(String),

    /// A neighbor-label pool does not match its table length.
    #[error("{pool} labels for table {table} have length {actual}, expected {expected}")]
    LabelLength {
        table: TableKind,
        pool: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A glyph sequence does not fill its table exactly.
    #[error("table {table} needs {expected} glyphs, got {actual}")]
    TableLength {
        table: TableKind,
        expected: usize,
        actual: usize,
    },

    /// No draw scheme goes by this name.
    #[error("unknown draw scheme {0:?}")]
    UnknownScheme(String),

    /// A template document is unusable.
    #[error("template {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: TemplateError,
    },

    /// Filesystem failure on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CardError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReservedName { .. }
            | Self::MalformedSerial { .. }
            | Self::InvalidFont(_)
            | Self::LabelLength { .. }
            | Self::TableLength { .. }
            | Self::UnknownScheme(_) => ErrorKind::Configuration,
            Self::Template { .. } => ErrorKind::Template,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn template(template: impl Into<String>, source: TemplateError) -> Self {
        Self::Template {
            template: template.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Structural problems with a template document.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not UTF-8.
    #[error("document is not valid UTF-8")]
    Encoding,

    /// No root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The root element declares no default namespace.
    #[error("root element declares no default namespace")]
    MissingDefaultNamespace,

    /// A placeholder text node is absent.
    #[error("missing placeholder text node {0:?}")]
    MissingPlaceholder(&'static str),
}

/// Result type for card operations.
pub type Result<T, E = CardError> = std::result::Result<T, E>;
