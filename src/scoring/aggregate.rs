use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregationError {
    #[error("Cannot aggregate an empty score vector")]
    EmptyInput,

    #[error("Weighted sum expects {expected} weights, got {actual} scores")]
    WeightMismatch { expected: usize, actual: usize },

    #[error("Got {scores} scores for {categories} categories")]
    LengthMismatch { categories: usize, scores: usize },
}

/// Reduces a per-category score vector to one overall score.
///
/// Scores produced by different categories are not guaranteed to share a
/// scale. Any policy that compares or combines them across categories
/// assumes the underlying classifiers are comparable; nothing here can
/// check that.
pub trait ScoreAggregator: Send + Sync {
    fn aggregate(&self, scores: &[f64]) -> Result<f64, AggregationError>;

    /// Short label for the policy family.
    fn name(&self) -> &str;

    /// Full policy description recorded next to the overall score.
    fn describe(&self) -> String {
        self.name().to_string()
    }

    /// Fail early when this policy cannot reduce `categories` scores.
    fn check_arity(&self, categories: usize) -> Result<(), AggregationError> {
        let _ = categories;
        Ok(())
    }
}

impl<A: ScoreAggregator + ?Sized> ScoreAggregator for &A {
    fn aggregate(&self, scores: &[f64]) -> Result<f64, AggregationError> {
        (**self).aggregate(scores)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn check_arity(&self, categories: usize) -> Result<(), AggregationError> {
        (**self).check_arity(categories)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "weights")]
pub enum AggregationPolicy {
    /// Highest category score.
    #[default]
    Max,
    /// Arithmetic mean of the category scores.
    Average,
    /// Sum of `weight[i] * score[i]`, one weight per category.
    WeightedSum(Vec<f64>),
}

impl ScoreAggregator for AggregationPolicy {
    fn aggregate(&self, scores: &[f64]) -> Result<f64, AggregationError> {
        if scores.is_empty() {
            return Err(AggregationError::EmptyInput);
        }

        let overall = match self {
            // f64::max skips NaN unless every entry is NaN
            AggregationPolicy::Max => scores.iter().copied().fold(f64::NAN, f64::max),
            AggregationPolicy::Average => scores.iter().sum::<f64>() / scores.len() as f64,
            AggregationPolicy::WeightedSum(weights) => {
                if weights.len() != scores.len() {
                    return Err(AggregationError::WeightMismatch {
                        expected: weights.len(),
                        actual: scores.len(),
                    });
                }
                weights.iter().zip(scores).map(|(w, s)| w * s).sum()
            }
        };

        Ok(overall)
    }

    fn name(&self) -> &str {
        match self {
            AggregationPolicy::Max => "max",
            AggregationPolicy::Average => "average",
            AggregationPolicy::WeightedSum(_) => "weighted_sum",
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn check_arity(&self, categories: usize) -> Result<(), AggregationError> {
        match self {
            AggregationPolicy::WeightedSum(weights) if weights.len() != categories => {
                Err(AggregationError::WeightMismatch {
                    expected: weights.len(),
                    actual: categories,
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown aggregation policy {0:?} (expected max, average or weighted:<w1>,<w2>,...)")]
pub struct ParsePolicyError(String);

impl FromStr for AggregationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "max" => return Ok(AggregationPolicy::Max),
            "average" | "avg" | "mean" => return Ok(AggregationPolicy::Average),
            _ => {}
        }

        let weights = s
            .strip_prefix("weighted:")
            .ok_or_else(|| ParsePolicyError(s.to_string()))?;

        weights
            .split(',')
            .map(|w| w.trim().parse::<f64>().ok().filter(|w| w.is_finite()))
            .collect::<Option<Vec<_>>>()
            .map(AggregationPolicy::WeightedSum)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationPolicy::WeightedSum(weights) => {
                let joined: Vec<String> = weights.iter().map(|w| w.to_string()).collect();
                write!(f, "weighted:{}", joined.join(","))
            }
            other => f.write_str(other.name()),
        }
    }
}
