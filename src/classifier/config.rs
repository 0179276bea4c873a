use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::error::ClassifierError;

// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Directory holding per-category model files.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Unknown-terms probability applied to every category, overriding
    /// each model's own value. `None` keeps the per-category defaults.
    #[serde(default)]
    pub smoothing: Option<f64>,
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

impl ClassifierConfig {
    pub fn v0() -> Self {
        Self {
            base_path: default_base_path(),
            smoothing: None,
        }
    }

    pub fn with_smoothing(mut self, smoothing: Option<f64>) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Smoothing is a probability mass: finite and strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if let Some(p) = self.smoothing {
            if !p.is_finite() || p <= 0.0 || p >= 1.0 {
                return Err(ClassifierError::Configuration(format!(
                    "smoothing must be in (0, 1), got {p}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::v0()
    }
}
