use crate::models::{Tier, WatchedTitle};
use crate::services::scoring::{obscurity_score, ObscurityWeights};

/// Ascending upper bounds of the first 7 tiers; Abyss catches everything
/// beyond the last one.
pub const TIER_BOUNDARIES: [f64; 7] = [800.0, 1200.0, 1500.0, 2000.0, 2200.0, 2600.0, 3000.0];

/// Disjoint, exhaustive tier assignment of the classified input
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TierBuckets {
    buckets: [Vec<WatchedTitle>; 8],
}

impl TierBuckets {
    pub fn push(&mut self, tier: Tier, title: WatchedTitle) {
        self.buckets[tier.index()].push(title);
    }

    pub fn get(&self, tier: Tier) -> &[WatchedTitle] {
        &self.buckets[tier.index()]
    }

    /// Tiers with their titles, shallowest first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[WatchedTitle])> {
        Tier::ALL.into_iter().map(|tier| (tier, self.get(tier)))
    }

    /// Titles classified across all tiers
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Assigns a score to the first tier whose upper bound admits it.
///
/// A score exactly on a boundary belongs to the earlier (shallower) tier.
pub fn classify(score: f64) -> Tier {
    for (index, bound) in TIER_BOUNDARIES.iter().enumerate() {
        if score <= *bound {
            return Tier::ALL[index];
        }
    }
    Tier::Abyss
}

/// Scores every title and buckets it into its tier.
///
/// Total and exclusive: each input title lands in exactly one bucket.
pub fn build_tiers(
    titles: Vec<WatchedTitle>,
    current_year: i32,
    weights: &ObscurityWeights,
) -> TierBuckets {
    let mut buckets = TierBuckets::default();
    for title in titles {
        let score = obscurity_score(&title, current_year, weights);
        buckets.push(classify(score), title);
    }
    buckets
}
