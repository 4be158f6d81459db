use crate::models::{TierBreakdown, TierShare};
use crate::services::tiers::TierBuckets;

/// Per-tier counts and percentages over the full classified set.
///
/// Percentages are only computed when at least one title was classified;
/// a zero total yields counts with no percentages rather than a division by
/// zero.
pub fn aggregate(buckets: &TierBuckets) -> TierBreakdown {
    let total = buckets.total();

    let tiers = buckets
        .iter()
        .map(|(tier, titles)| {
            let count = titles.len();
            let percentage =
                (total > 0).then(|| round2(count as f64 / total as f64 * 100.0));
            TierShare {
                tier,
                label: tier.label(),
                count,
                percentage,
            }
        })
        .collect();

    TierBreakdown { total, tiers }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
