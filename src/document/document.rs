use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::DocumentVersion;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A document ready to be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: DocumentVersion,
    pub source: String,
    pub content: String,
}

impl Document {
    /// Ingest raw bytes into a Document.
    ///
    /// Bytes that are not valid UTF-8 are rejected; there is no lossy
    /// fallback and no empty-document substitute.
    pub fn ingest(source: impl Into<String>, raw_content: Vec<u8>) -> Result<Self, DocumentError> {
        let content = String::from_utf8(raw_content)?;

        let version = DocumentVersion::from_content(content.as_bytes());

        Ok(Document {
            version,
            source: source.into(),
            content,
        })
    }

    /// Read and ingest a file.
    pub fn from_path(path: &std::path::Path) -> Result<Self, DocumentReadError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Document::ingest(path.display().to_string(), bytes)?)
    }
}

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
}
