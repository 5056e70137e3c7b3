//! Order comparison results by damage per round and assign ranks.

use serde::{Deserialize, Serialize};

use crate::compare::ComparisonResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBuildResult {
    pub rank: usize,
    #[serde(flatten)]
    pub result: ComparisonResult,
}

/// Sort by `dpr` descending (ties broken by label for stable output) and
/// assign 1-based ranks. Illegal builds end up last with zero damage.
pub fn rank_results(mut results: Vec<ComparisonResult>) -> Vec<RankedBuildResult> {
    results.sort_by(|a, b| {
        b.summary
            .dpr
            .partial_cmp(&a.summary.dpr)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| RankedBuildResult {
            rank: index + 1,
            result,
        })
        .collect()
}
