//! Card assembly: tables in, front and back documents out.
//!
//! Fixed sequence:
//! 1. Validate configuration (done when the assembler and paths are built)
//! 2. Seed the sequencer from the serial
//! 3. Generate and wrap the 15, 25 and 50 tables, in that order
//! 4. Front: 15 table left, 25 table right, serial into its placeholder
//! 5. Back: 50 table left
//!
//! Both documents are rendered in memory before anything is written.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::{CardError, DrawScheme, Result, SerialId};
use crate::svg::{embed_cell, place_cells, Document, EmbeddedCell, Origin};
use crate::tables::{validate_label_schemes, CardTables, SubstitutionTable};

use super::config::{
    CardConfig, FontFamily, OutputPaths, CARD_BACK_TEMPLATE, CARD_FRONT_TEMPLATE, LEFT_ORIGIN,
    RIGHT_ORIGIN, SERIAL_ID,
};
use super::templates::{TemplateDir, TemplateSource};

/// Serialized front and back documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDocuments {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
}

impl CardDocuments {
    /// Write both documents. Each file is replaced atomically; the back is
    /// only written once the front is in place.
    pub fn write(&self, outputs: &OutputPaths) -> Result<()> {
        write_atomic(outputs.front(), &self.front)?;
        tracing::info!("Generated {}.", outputs.front().display());
        write_atomic(outputs.back(), &self.back)?;
        tracing::info!("Generated {}.", outputs.back().display());
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| CardError::io(path, e))?;
    file.write_all(bytes).map_err(|e| CardError::io(path, e))?;
    file.as_file().sync_all().map_err(|e| CardError::io(path, e))?;
    file.persist(path).map_err(|e| CardError::io(path, e.error))?;
    Ok(())
}

/// Builds card documents from tables and templates.
#[derive(Clone, Debug)]
pub struct CardAssembler {
    font: Option<FontFamily>,
    scheme: DrawScheme,
}

impl CardAssembler {
    /// Create an assembler, checking the static label configuration.
    pub fn new(font: Option<FontFamily>) -> Result<Self> {
        validate_label_schemes()?;
        Ok(Self {
            font,
            scheme: DrawScheme::default(),
        })
    }

    /// Draw tables with `scheme` instead of the default.
    #[must_use]
    pub fn with_scheme(mut self, scheme: DrawScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Generate the tables for `serial` and render both sides.
    pub fn assemble(
        &self,
        serial: SerialId,
        source: &impl TemplateSource,
    ) -> Result<(CardTables, CardDocuments)> {
        let tables = CardTables::generate_with(serial, self.scheme)?;
        let documents = CardDocuments {
            front: self.render_front(&tables, source)?,
            back: self.render_back(&tables, source)?,
        };
        Ok((tables, documents))
    }

    /// Front: 15-digit table left, 25-alphanumeric right, serial filled in.
    pub fn render_front(&self, tables: &CardTables, source: &impl TemplateSource) -> Result<Vec<u8>> {
        let mut card = source.load(CARD_FRONT_TEMPLATE)?;
        self.place_table(&mut card, &tables.digits15, LEFT_ORIGIN, source)?;
        self.place_table(&mut card, &tables.alnum25, RIGHT_ORIGIN, source)?;
        card.set_placeholder_text(SERIAL_ID, &tables.serial.to_string())
            .map_err(|e| CardError::template(CARD_FRONT_TEMPLATE, e))?;
        card.to_bytes()
            .map_err(|e| CardError::template(CARD_FRONT_TEMPLATE, e))
    }

    /// Back: 50-mixed table left.
    pub fn render_back(&self, tables: &CardTables, source: &impl TemplateSource) -> Result<Vec<u8>> {
        let mut card = source.load(CARD_BACK_TEMPLATE)?;
        self.place_table(&mut card, &tables.mixed50, LEFT_ORIGIN, source)?;
        card.to_bytes()
            .map_err(|e| CardError::template(CARD_BACK_TEMPLATE, e))
    }

    fn place_table(
        &self,
        card: &mut Document,
        table: &SubstitutionTable,
        origin: Origin,
        source: &impl TemplateSource,
    ) -> Result<()> {
        let name = table.kind().template_name();
        let template = source.load(name)?;
        let font = self.font.as_ref().map(FontFamily::as_str);

        let cells = table
            .cells()
            .iter()
            .map(|cell| embed_cell(&template, cell, font))
            .collect::<std::result::Result<Vec<EmbeddedCell>, _>>()
            .map_err(|e| CardError::template(name, e))?;

        place_cells(card, &cells, origin);
        tracing::debug!(table = %table.kind(), cells = cells.len(), "placed table");
        Ok(())
    }
}

/// Run the whole pipeline for `config`: generate, render, write.
///
/// Returns the generated tables for display.
pub fn generate_card(config: &CardConfig, serial: SerialId) -> Result<CardTables> {
    let assembler = CardAssembler::new(config.font.clone())?.with_scheme(config.scheme);
    let source = TemplateDir::new(&config.template_dir);

    tracing::info!(%serial, scheme = %config.scheme, "generating card");
    let (tables, documents) = assembler.assemble(serial, &source)?;
    documents.write(&config.outputs)?;
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");

        // No temporary files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.svg");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, CardError::Io { path: ref p, .. } if p == &path));
    }

    #[test]
    fn test_documents_write_both() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::new(dir.path().join("f.svg"), dir.path().join("b.svg")).unwrap();
        let docs = CardDocuments {
            front: b"front".to_vec(),
            back: b"back".to_vec(),
        };
        docs.write(&outputs).unwrap();
        assert_eq!(std::fs::read(outputs.front()).unwrap(), b"front");
        assert_eq!(std::fs::read(outputs.back()).unwrap(), b"back");
    }
}
