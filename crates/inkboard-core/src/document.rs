//! Persisted whiteboard documents.
//!
//! A document is the `{elements, background, viewport}` triple plus a format
//! version. Loading replaces all three wholesale.

use crate::background::Background;
use crate::elements::{Element, ElementId, InvalidElement};
use crate::scene::SceneError;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

/// Version written into new documents.
pub const FORMAT_VERSION: &str = "1.8.0";

/// Oldest major version this build can read.
const MIN_MAJOR: u64 = 1;
/// Newest major version this build can read.
const MAX_MAJOR: u64 = 1;

/// Errors from reading or writing documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("document has no version")]
    MissingVersion,
    #[error("unsupported document version {0}")]
    UnsupportedVersion(String),
    #[error("element {index} is invalid: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: InvalidElement,
    },
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A serialized scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: String,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for SceneFile {
    fn default() -> Self {
        Self::new(Vec::new(), Background::default(), Viewport::default())
    }
}

impl SceneFile {
    /// Build a document at the current format version.
    pub fn new(elements: Vec<Element>, background: Background, viewport: Viewport) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            elements,
            background,
            viewport,
        }
    }

    /// Check the version and every element.
    pub fn validate(&self) -> Result<(), DocumentError> {
        check_version(&self.version)?;
        let mut seen = std::collections::HashSet::new();
        for (index, element) in self.elements.iter().enumerate() {
            element
                .validate()
                .map_err(|source| DocumentError::InvalidElement { index, source })?;
            if !seen.insert(element.id()) {
                return Err(DocumentError::DuplicateId(element.id()));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let file: SceneFile = serde_json::from_str(json)?;
        file.validate()?;
        log::debug!("parsed document v{} with {} elements", file.version, file.elements.len());
        Ok(file)
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, DocumentError> {
        let file: SceneFile = serde_json::from_reader(reader)?;
        file.validate()?;
        Ok(file)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), DocumentError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn check_version(version: &str) -> Result<(), DocumentError> {
    let version = version.trim();
    if version.is_empty() {
        return Err(DocumentError::MissingVersion);
    }
    let major = version
        .split('.')
        .next()
        .and_then(|m| m.parse::<u64>().ok())
        .ok_or_else(|| DocumentError::UnsupportedVersion(version.to_string()))?;
    if !(MIN_MAJOR..=MAX_MAJOR).contains(&major) {
        return Err(DocumentError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}
