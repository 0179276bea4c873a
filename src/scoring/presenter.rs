use crate::scoring::aggregate::{AggregationError, ScoreAggregator};
use crate::types::identifiers::CategoryName;
use crate::types::score_bundle::{CategoryScore, NamedScores, ScoreVector};

/// Zip category names with their scores and attach the aggregate.
///
/// `categories` and `scores` must be index-aligned; a length mismatch is
/// reported as [`AggregationError::LengthMismatch`].
pub fn present<A>(
    categories: &[CategoryName],
    scores: &ScoreVector,
    aggregator: &A,
) -> Result<NamedScores, AggregationError>
where
    A: ScoreAggregator + ?Sized,
{
    if categories.len() != scores.len() {
        return Err(AggregationError::LengthMismatch {
            categories: categories.len(),
            scores: scores.len(),
        });
    }

    let overall = aggregator.aggregate(scores.as_slice())?;

    let categories = categories
        .iter()
        .zip(scores.iter())
        .map(|(category, score)| CategoryScore {
            category: category.clone(),
            score,
        })
        .collect();

    Ok(NamedScores {
        categories,
        overall,
        policy: aggregator.describe(),
    })
}
