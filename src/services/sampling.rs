use rand::Rng;

use crate::models::{Tier, WatchedTitle};
use crate::services::tiers::TierBuckets;

/// Per-tier display samples, indexed like `Tier::ALL`
pub type TierSamples = [Vec<WatchedTitle>; 8];

/// Uniform random display sample for one tier.
///
/// Titles whose primary display text exceeds `length_cap` characters are
/// dropped first so every sampled line fits its tier band. The remainder is
/// sampled without replacement with a partial Fisher-Yates pass over the
/// last `size` positions; the contract is uniformity over all k-subsets, not
/// this particular shuffle. Returns fewer than `size` titles when fewer
/// qualify.
pub fn sample_for_display<R: Rng>(
    titles: &[WatchedTitle],
    size: usize,
    length_cap: usize,
    rng: &mut R,
) -> Vec<WatchedTitle> {
    let mut pool: Vec<WatchedTitle> = titles
        .iter()
        .filter(|title| title.display_title().chars().count() <= length_cap)
        .cloned()
        .collect();

    let len = pool.len();
    let take = size.min(len);
    for i in ((len - take)..len).rev() {
        let j = rng.gen_range(0..=i);
        pool.swap(i, j);
    }

    pool.split_off(len - take)
}

/// Samples every bucket for display
pub fn sample_tiers<R: Rng>(
    buckets: &TierBuckets,
    size: usize,
    length_cap: usize,
    rng: &mut R,
) -> TierSamples {
    let mut samples = TierSamples::default();
    for tier in Tier::ALL {
        samples[tier.index()] = sample_for_display(buckets.get(tier), size, length_cap, rng);
    }
    samples
}
