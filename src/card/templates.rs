//! Where template documents come from.
//!
//! The assembler only asks for raw bytes by file name; parsing and
//! structural checks happen on its side.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::{CardError, Result};
use crate::svg::Document;

/// Supplies raw template bytes by file name.
pub trait TemplateSource {
    /// Read the template called `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Read and parse the template called `name`.
    fn load(&self, name: &str) -> Result<Document> {
        let bytes = self.read(name)?;
        tracing::debug!(template = name, bytes = bytes.len(), "loaded template");
        Document::parse(&bytes).map_err(|e| CardError::template(name, e))
    }
}

/// Templates stored as files in one directory.
#[derive(Clone, Debug)]
pub struct TemplateDir {
    dir: PathBuf,
}

impl TemplateDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl TemplateSource for TemplateDir {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        std::fs::read(&path).map_err(|e| CardError::io(path, e))
    }
}

/// Templates held in memory, keyed by file name.
#[derive(Clone, Debug, Default)]
pub struct MemoryTemplates {
    templates: FxHashMap<String, Vec<u8>>,
}

impl MemoryTemplates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.templates.insert(name.into(), bytes.into());
        self
    }
}

impl TemplateSource for MemoryTemplates {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.templates.get(name).cloned().ok_or_else(|| {
            CardError::io(name, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }
}
