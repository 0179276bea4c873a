use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count of every token sequence found in one parsed document.
///
/// Multi-word sequences are stored with their words joined by a single space.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCounts {
    inner: BTreeMap<String, u32>,
}

impl TokenCounts {
    pub fn new() -> Self {
        TokenCounts {
            inner: BTreeMap::new(),
        }
    }

    /// Count one more occurrence of `token`.
    pub fn record(&mut self, token: impl Into<String>) {
        *self.inner.entry(token.into()).or_insert(0) += 1;
    }

    pub fn get(&self, token: &str) -> u32 {
        self.inner.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.inner.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.inner.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<S> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = TokenCounts::new();
        for token in iter {
            counts.record(token);
        }
        counts
    }
}
