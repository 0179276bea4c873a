pub mod error;
pub mod identifiers;
pub mod score_bundle;

pub use error::{ClassifierError, Result};
pub use identifiers::{CategoryName, CategoryNameError, DocumentVersion, TupleOrder, OVERALL_SCORE};
pub use score_bundle::{CategoryScore, ClassificationReport, NamedScores, ScoreVector};
