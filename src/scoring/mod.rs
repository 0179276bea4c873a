pub mod aggregate;
pub mod presenter;

pub use aggregate::{AggregationError, AggregationPolicy, ParsePolicyError, ScoreAggregator};
pub use presenter::present;
