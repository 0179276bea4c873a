//! Deterministic multi-category document scoring.
//!
//! `multi-classifier` scores one document against a fixed, ordered list of
//! categories. Each category has its own classifier, possibly trained on a
//! different token-sequence length; the document is tokenized once per
//! distinct length and every classifier sees the counts for its own length.
//! The per-category scores are then reduced to a single overall score by a
//! swappable [`ScoreAggregator`](scoring::ScoreAggregator).
//!
//! ```no_run
//! use multi_classifier::MultiClassifier;
//!
//! let classifier = MultiClassifier::new(&["sports", "politics"], Some(0.01))?;
//! let scores = classifier.get_named_scores("The match ended with a late goal.")?;
//! println!("{scores}");
//! # Ok::<(), multi_classifier::ClassifierError>(())
//! ```

pub mod cache;
pub mod classifier;
pub mod document;
pub mod scoring;
pub mod types;

pub use classifier::{
    BayesClassifier, BayesFactory, CategoryClassifier, ClassifierConfig, ClassifierFactory,
    MultiClassifier,
};
pub use document::{Document, DocumentParser, NgramParser, TokenCounts};
pub use scoring::{AggregationPolicy, ScoreAggregator};
pub use types::{ClassifierError, NamedScores, ScoreVector, TupleOrder, OVERALL_SCORE};
