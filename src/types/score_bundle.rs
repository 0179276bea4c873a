use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CategoryName, DocumentVersion, OVERALL_SCORE};

/// Per-category scores, index-aligned with the classifier's category list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        ScoreVector(scores)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl std::ops::Index<usize> for ScoreVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// One category's score in the named view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: CategoryName,
    pub score: f64,
}

/// Category scores plus the aggregate, kept apart so a category can never
/// shadow the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScores {
    /// In category-list order.
    pub categories: Vec<CategoryScore>,
    pub overall: f64,
    pub policy: String,
}

impl NamedScores {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.category.as_str() == category)
            .map(|c| c.score)
    }

    /// Flat name -> score view with the overall score under [`OVERALL_SCORE`].
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = self
            .categories
            .iter()
            .map(|c| (c.category.as_str().to_string(), c.score))
            .collect();
        map.insert(OVERALL_SCORE.to_string(), self.overall);
        map
    }
}

/// `name: score` lines in category order, overall last.
impl fmt::Display for NamedScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.categories {
            writeln!(f, "{}: {}", entry.category, entry.score)?;
        }
        write!(f, "{}: {}", OVERALL_SCORE, self.overall)
    }
}

/// Scores for one ingested document, as emitted by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub source: String,
    pub version: DocumentVersion,
    pub scored_at: DateTime<Utc>, // informational only
    pub scores: NamedScores,
}
