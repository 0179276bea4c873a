use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::Utc;

use crate::cache::TokenCache;
use crate::classifier::bayes::BayesFactory;
use crate::classifier::capability::{CategoryClassifier, ClassifierFactory};
use crate::classifier::config::ClassifierConfig;
use crate::document::{Document, DocumentParser, NgramParser};
use crate::scoring::{present, AggregationPolicy, ScoreAggregator};
use crate::types::error::{ClassifierError, Result};
use crate::types::identifiers::{CategoryName, TupleOrder};
use crate::types::score_bundle::{ClassificationReport, NamedScores, ScoreVector};

/// Scores documents against a fixed, ordered list of categories.
///
/// The category list and classifiers never change after construction, so a
/// `MultiClassifier` can be shared across threads. Every scoring call works
/// on its own [`TokenCache`].
pub struct MultiClassifier<P = NgramParser, A = AggregationPolicy> {
    names: Vec<CategoryName>,
    classifiers: Vec<Box<dyn CategoryClassifier>>,
    parser: P,
    aggregator: A,
}

impl MultiClassifier {
    /// Load Bayes models for `categories` from the current directory.
    ///
    /// `smoothing`, when given, replaces every model's unknown-terms
    /// probability.
    pub fn new<S: AsRef<str>>(categories: &[S], smoothing: Option<f64>) -> Result<Self> {
        Self::with_config(categories, &ClassifierConfig::v0().with_smoothing(smoothing))
    }

    pub fn with_config<S: AsRef<str>>(categories: &[S], config: &ClassifierConfig) -> Result<Self> {
        Self::build(categories, config, &BayesFactory)
    }

    /// Validate `categories` and create one classifier per category through
    /// `factory`, in list order.
    pub fn build<S, F>(categories: &[S], config: &ClassifierConfig, factory: &F) -> Result<Self>
    where
        S: AsRef<str>,
        F: ClassifierFactory + ?Sized,
    {
        if categories.is_empty() {
            return Err(ClassifierError::Configuration(
                "at least one category is required".into(),
            ));
        }
        config.validate()?;

        let names = categories
            .iter()
            .map(|raw| CategoryName::new(raw.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        {
            let mut seen = HashSet::with_capacity(names.len());
            for name in &names {
                if name.is_reserved() {
                    return Err(ClassifierError::ReservedNameCollision {
                        name: name.to_string(),
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(ClassifierError::Configuration(format!(
                        "duplicate category '{name}'"
                    )));
                }
            }
        }

        let classifiers = names
            .iter()
            .map(|name| {
                factory
                    .create(name, config)
                    .map_err(|e| ClassifierError::ClassifierConstruction {
                        category: name.to_string(),
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            categories = names.len(),
            smoothing = ?config.smoothing,
            "built multi-category classifier"
        );

        Ok(Self {
            names,
            classifiers,
            parser: NgramParser,
            aggregator: AggregationPolicy::default(),
        })
    }
}

impl<P, A> MultiClassifier<P, A>
where
    P: DocumentParser,
    A: ScoreAggregator,
{
    pub fn with_parser<Q: DocumentParser>(self, parser: Q) -> MultiClassifier<Q, A> {
        MultiClassifier {
            names: self.names,
            classifiers: self.classifiers,
            parser,
            aggregator: self.aggregator,
        }
    }

    /// Replace the overall-score policy.
    ///
    /// Fails with a configuration error when the policy cannot reduce this
    /// many categories, e.g. a weighted sum with the wrong number of weights.
    pub fn with_aggregator<B: ScoreAggregator>(
        self,
        aggregator: B,
    ) -> Result<MultiClassifier<P, B>> {
        aggregator.check_arity(self.names.len()).map_err(|e| {
            ClassifierError::Configuration(format!(
                "aggregation policy {} does not fit {} categories: {e}",
                aggregator.describe(),
                self.names.len()
            ))
        })?;

        Ok(MultiClassifier {
            names: self.names,
            classifiers: self.classifiers,
            parser: self.parser,
            aggregator,
        })
    }

    pub fn categories(&self) -> &[CategoryName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: construction rejects an empty category list.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Tuple order of each category, in category order.
    pub fn tuple_orders(&self) -> Vec<TupleOrder> {
        self.classifiers.iter().map(|c| c.tuple_order()).collect()
    }

    /// The orders a scoring call parses the document at.
    pub fn distinct_tuple_orders(&self) -> BTreeSet<TupleOrder> {
        self.classifiers.iter().map(|c| c.tuple_order()).collect()
    }

    /// Score `text` against every category.
    ///
    /// The document is parsed once per distinct tuple order and every
    /// classifier is called exactly once. Scores come back in category order.
    pub fn get_scores(&self, text: &str) -> Result<ScoreVector> {
        let mut cache = TokenCache::new();
        let mut scores = Vec::with_capacity(self.classifiers.len());

        for (name, classifier) in self.names.iter().zip(&self.classifiers) {
            let order = classifier.tuple_order();
            let tokens = cache.get_or_parse(order, |order| self.parser.parse(text, order))?;
            let score = classifier.classify(tokens);
            tracing::debug!(category = %name, %order, score, "scored category");
            scores.push(score);
        }

        tracing::debug!(
            categories = scores.len(),
            parses = cache.parses(),
            "scored document"
        );

        Ok(ScoreVector::new(scores))
    }

    /// Category scores by name plus the aggregate overall score.
    pub fn get_named_scores(&self, text: &str) -> Result<NamedScores> {
        let scores = self.get_scores(text)?;
        Ok(present(&self.names, &scores, &self.aggregator)?)
    }

    pub fn classify_document(&self, document: &Document) -> Result<ClassificationReport> {
        let scores = self.get_named_scores(&document.content)?;
        Ok(ClassificationReport {
            source: document.source.clone(),
            version: document.version.clone(),
            scored_at: Utc::now(),
            scores,
        })
    }
}

impl<P: fmt::Debug, A: fmt::Debug> fmt::Debug for MultiClassifier<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orders: Vec<TupleOrder> = self.classifiers.iter().map(|c| c.tuple_order()).collect();
        f.debug_struct("MultiClassifier")
            .field("categories", &self.names)
            .field("tuple_orders", &orders)
            .field("parser", &self.parser)
            .field("aggregator", &self.aggregator)
            .finish()
    }
}
