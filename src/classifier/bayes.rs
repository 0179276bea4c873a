//! Naive Bayes category classifier backed by a pre-trained model file.
//!
//! Each category has one model at `<base_path>/<category>.bayes.json`:
//!
//! ```json
//! {
//!   "category": "sports",
//!   "max_tuple": 2,
//!   "unknown_terms_probability": 0.5,
//!   "probabilities": { "goal": 0.93, "final score": 0.88 }
//! }
//! ```
//!
//! Models are only read here. Training and writing them happen elsewhere.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::capability::{CategoryClassifier, ClassifierFactory};
use crate::classifier::config::ClassifierConfig;
use crate::document::TokenCounts;
use crate::types::identifiers::{CategoryName, TupleOrder};

/// Probabilities are clamped to [MIN_PROBABILITY, 1 - MIN_PROBABILITY]
/// so a single certain token cannot pin the score to 0 or 1.
const MIN_PROBABILITY: f64 = 1e-6;

const DEFAULT_UNKNOWN_TERMS_PROBABILITY: f64 = 0.5;

const MODEL_EXTENSION: &str = "bayes.json";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed model {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Model max_tuple must be at least 1")]
    InvalidTupleOrder,
    #[error("Probability for {token:?} must be in [0, 1], got {value}")]
    InvalidProbability { token: String, value: f64 },
    #[error("Model is for category '{found}', expected '{expected}'")]
    CategoryMismatch { expected: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayesModel {
    pub category: String,
    pub max_tuple: usize,
    #[serde(default = "default_unknown_terms_probability")]
    pub unknown_terms_probability: f64,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
}

fn default_unknown_terms_probability() -> f64 {
    DEFAULT_UNKNOWN_TERMS_PROBABILITY
}

fn check_probability(token: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidProbability {
            token: token.to_string(),
            value,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BayesClassifier {
    category: String,
    max_tuple: TupleOrder,
    unknown_terms_probability: f64,
    probabilities: BTreeMap<String, f64>,
}

impl BayesClassifier {
    /// Validate a model and apply an optional unknown-terms override.
    pub fn from_model(model: BayesModel, smoothing: Option<f64>) -> Result<Self, ModelError> {
        let max_tuple = TupleOrder::new(model.max_tuple).ok_or(ModelError::InvalidTupleOrder)?;

        for (token, &value) in &model.probabilities {
            check_probability(token, value)?;
        }

        let unknown_terms_probability = smoothing.unwrap_or(model.unknown_terms_probability);
        check_probability("<unknown>", unknown_terms_probability)?;

        Ok(Self {
            category: model.category,
            max_tuple,
            unknown_terms_probability,
            probabilities: model.probabilities,
        })
    }

    /// Load `<base_path>/<category>.bayes.json`.
    pub fn load(
        base_path: &Path,
        category: &CategoryName,
        smoothing: Option<f64>,
    ) -> Result<Self, ModelError> {
        let path = model_path(base_path, category);
        let raw = std::fs::read(&path).map_err(|source| ModelError::Io {
            path: path.clone(),
            source,
        })?;
        let model: BayesModel =
            serde_json::from_slice(&raw).map_err(|source| ModelError::Json { path, source })?;

        if model.category != category.as_str() {
            return Err(ModelError::CategoryMismatch {
                expected: category.as_str().to_string(),
                found: model.category,
            });
        }

        Self::from_model(model, smoothing)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unknown_terms_probability(&self) -> f64 {
        self.unknown_terms_probability
    }

    fn probability(&self, token: &str) -> f64 {
        self.probabilities
            .get(token)
            .copied()
            .unwrap_or(self.unknown_terms_probability)
            .clamp(MIN_PROBABILITY, 1.0 - MIN_PROBABILITY)
    }
}

impl CategoryClassifier for BayesClassifier {
    fn tuple_order(&self) -> TupleOrder {
        self.max_tuple
    }

    /// Combined probability that the document belongs to the category.
    ///
    /// Every occurrence contributes its token probability `p`;
    /// the result is `Πp / (Πp + Π(1-p))`, computed in log space.
    /// A document with no tokens scores 0.5.
    fn classify(&self, tokens: &TokenCounts) -> f64 {
        let mut log_in = 0.0;
        let mut log_out = 0.0;

        for (token, count) in tokens.iter() {
            let p = self.probability(token);
            let count = f64::from(count);
            log_in += count * p.ln();
            log_out += count * (1.0 - p).ln();
        }

        1.0 / (1.0 + (log_out - log_in).exp())
    }
}

pub fn model_path(base_path: &Path, category: &CategoryName) -> PathBuf {
    base_path.join(format!("{}.{}", category.as_str(), MODEL_EXTENSION))
}

/// Loads one [`BayesClassifier`] per category from `config.base_path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BayesFactory;

impl ClassifierFactory for BayesFactory {
    type Error = ModelError;

    fn create(
        &self,
        category: &CategoryName,
        config: &ClassifierConfig,
    ) -> Result<Box<dyn CategoryClassifier>, ModelError> {
        let classifier = BayesClassifier::load(&config.base_path, category, config.smoothing)?;
        Ok(Box::new(classifier))
    }
}
