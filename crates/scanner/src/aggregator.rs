use crate::classifier::YieldBuckets;
use defi_radar_core::YieldOpportunity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selects the `n` highest ranking scores across all buckets.
///
/// Buckets are flattened in category order without deduplication, so an entry
/// present in two buckets can appear twice. Ties keep flattened order.
#[must_use]
pub fn top_picks(buckets: &YieldBuckets, n: usize) -> Vec<YieldOpportunity> {
    let mut all: Vec<&YieldOpportunity> = buckets.iter().flat_map(|(_, entries)| entries).collect();

    all.sort_by(|a, b| b.ranking_score.cmp(&a.ranking_score));
    all.into_iter().take(n).cloned().collect()
}

/// Headline figures for a set of top picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicksSummary {
    pub count: usize,
    pub average_apy: Decimal,
    pub total_tvl: Decimal,
    pub average_ranking_score: Decimal,
}

impl PicksSummary {
    /// Returns `None` for an empty slice, or if a total exceeds the decimal
    /// range.
    #[must_use]
    pub fn from_picks(picks: &[YieldOpportunity]) -> Option<Self> {
        if picks.is_empty() {
            return None;
        }

        let count = Decimal::from(picks.len());
        let total_apy = checked_total(picks.iter().map(|p| p.apy))?;
        let total_tvl = checked_total(picks.iter().map(|p| p.tvl))?;
        let total_score = checked_total(picks.iter().map(|p| p.ranking_score))?;

        Some(Self {
            count: picks.len(),
            average_apy: total_apy / count,
            total_tvl,
            average_ranking_score: total_score / count,
        })
    }
}

fn checked_total(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, Decimal::checked_add)
}
