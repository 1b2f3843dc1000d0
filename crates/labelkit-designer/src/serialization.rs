//! Serialization and deserialization for label documents.
//!
//! Documents are pretty-printed JSON: a format version, metadata, and the
//! ordered element list, each element tagged with its kind.

use anyhow::{Context, Result};
use labelkit_core::{DocumentError, ElementKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{DocumentMetadata, LabelElement};

/// Label document format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete label document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDocumentFile {
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub elements: Vec<LabelElement>,
}

impl LabelDocumentFile {
    pub fn new(metadata: DocumentMetadata, elements: Vec<LabelElement>) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata,
            elements,
        }
    }

    /// Check document-level invariants and repair element values.
    ///
    /// Only the major version has to match. At most one layout is allowed.
    pub fn validate(&mut self) -> std::result::Result<(), DocumentError> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.version) != major(FILE_FORMAT_VERSION) {
            return Err(DocumentError::UnsupportedVersion {
                version: self.version.clone(),
            });
        }

        let layouts = self
            .elements
            .iter()
            .filter(|e| e.kind() == ElementKind::Layout)
            .count();
        if layouts > 1 {
            return Err(DocumentError::MultipleLayouts { count: layouts });
        }

        for element in &mut self.elements {
            element.normalize();
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize label document")
    }

    /// Parse and validate a document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Self = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        document.validate()?;
        Ok(document)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(DocumentError::Io)
            .with_context(|| format!("Failed to write label document {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(DocumentError::Io)
            .with_context(|| format!("Failed to read label document {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to load label document {}", path.display()))
    }
}

/// Persists and restores element lists.
///
/// The coordinator delegates all byte-level work here; choosing the
/// destination or source path is left to the caller.
pub trait LayoutManager: Send + Sync {
    fn save(&self, document: &LabelDocumentFile, destination: &Path) -> Result<()>;

    fn load(&self, source: &Path) -> Result<LabelDocumentFile>;
}

/// JSON file persistence
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayoutManager;

impl LayoutManager for JsonLayoutManager {
    fn save(&self, document: &LabelDocumentFile, destination: &Path) -> Result<()> {
        document.save_to_file(destination)
    }

    fn load(&self, source: &Path) -> Result<LabelDocumentFile> {
        LabelDocumentFile::load_from_file(source)
    }
}
