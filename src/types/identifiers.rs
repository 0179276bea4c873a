use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Key under which the aggregate score appears in the flat named view.
pub const OVERALL_SCORE: &str = "OVERALL_SCORE";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryNameError {
    #[error("Category name is empty")]
    Empty,
    #[error("Category name has leading or trailing whitespace: {0:?}")]
    Whitespace(String),
    #[error("Category name contains a comma: {0:?}")]
    Comma(String),
    #[error("Category name is not a plain file name: {0:?}")]
    PathLike(String),
}

impl CategoryName {
    /// Validate a raw category name.
    ///
    /// The reserved overall-score key passes this check; rejecting it is
    /// the orchestrator's job, since only the named view can collide.
    pub fn new(raw: impl Into<String>) -> Result<Self, CategoryNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CategoryNameError::Empty);
        }
        if raw.trim() != raw {
            return Err(CategoryNameError::Whitespace(raw));
        }
        if raw.contains(',') {
            return Err(CategoryNameError::Comma(raw));
        }
        // Names become model file stems under the base path.
        if raw.contains(['/', '\\', '\0']) || raw == "." || raw == ".." {
            return Err(CategoryNameError::PathLike(raw));
        }
        Ok(CategoryName(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_reserved(&self) -> bool {
        self.0 == OVERALL_SCORE
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CategoryNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maximum length of the contiguous token sequences a tokenizer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TupleOrder(NonZeroUsize);

impl TupleOrder {
    pub const UNIGRAM: TupleOrder = TupleOrder(NonZeroUsize::MIN);

    /// Returns `None` for zero.
    pub fn new(order: usize) -> Option<Self> {
        NonZeroUsize::new(order).map(TupleOrder)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for TupleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentVersion(String);

impl DocumentVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DocumentVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
