use crate::classifier::config::ClassifierConfig;
use crate::document::TokenCounts;
use crate::types::identifiers::{CategoryName, TupleOrder};

/// A trained single-category classifier.
///
/// Scores are only meaningful within one category. Two classifiers may use
/// different scales.
pub trait CategoryClassifier: Send + Sync {
    /// Token-sequence length this classifier was trained on.
    fn tuple_order(&self) -> TupleOrder;

    fn classify(&self, tokens: &TokenCounts) -> f64;
}

/// Builds the classifier for one category. Injected into
/// [`MultiClassifier`](crate::classifier::MultiClassifier) at construction.
pub trait ClassifierFactory {
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(
        &self,
        category: &CategoryName,
        config: &ClassifierConfig,
    ) -> Result<Box<dyn CategoryClassifier>, Self::Error>;
}

impl<F, E> ClassifierFactory for F
where
    F: Fn(&CategoryName, &ClassifierConfig) -> Result<Box<dyn CategoryClassifier>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn create(
        &self,
        category: &CategoryName,
        config: &ClassifierConfig,
    ) -> Result<Box<dyn CategoryClassifier>, E> {
        self(category, config)
    }
}
