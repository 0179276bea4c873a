use thiserror::Error;

use crate::document::{DocumentError, ParseError};
use crate::scoring::AggregationError;
use crate::types::identifiers::CategoryNameError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid category name: {0}")]
    InvalidCategory(#[from] CategoryNameError),

    #[error("Failed to construct classifier for category '{category}': {source}")]
    ClassifierConstruction {
        category: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Category name '{name}' collides with the reserved overall-score key")]
    ReservedNameCollision { name: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    /// True for every error raised while building a classifier.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::InvalidCategory(_)
                | Self::ClassifierConstruction { .. }
                | Self::ReservedNameCollision { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) | Self::Document(_) => 3,
            Self::Aggregation(_) => 5,
            _ => 4,
        }
    }
}
