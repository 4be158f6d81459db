use crate::models::WatchedTitle;

/// Tunable weighting for the obscurity heuristic
///
/// The two weights are expected to sum to 1; the defaults are the weighting
/// the service ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct ObscurityWeights {
    /// Popularity ceiling used to normalize raw counts
    pub max_popularity: i64,
    pub popularity_weight: f64,
    pub score_weight: f64,
    /// Bonus per year since first airing
    pub age_coefficient: f64,
}

impl Default for ObscurityWeights {
    fn default() -> Self {
        Self {
            max_popularity: 800_000,
            popularity_weight: 0.70,
            score_weight: 0.30,
            age_coefficient: 0.007,
        }
    }
}

/// Obscurity score for one title: higher is deeper.
///
/// Combines inverse popularity, inverse rating and release age. A popularity
/// count above `max_popularity` drives the popularity term negative; that is
/// accepted rather than clamped. Deterministic for a fixed `current_year`.
pub fn obscurity_score(
    title: &WatchedTitle,
    current_year: i32,
    weights: &ObscurityWeights,
) -> f64 {
    let normalized_popularity =
        (weights.max_popularity - title.popularity) as f64 / weights.max_popularity as f64;

    let normalized_score = 10.0 - title.average_score / 10.0;

    let age_bonus =
        (f64::from(current_year - title.release_year) * weights.age_coefficient).max(0.0);

    (normalized_popularity * weights.popularity_weight
        + normalized_score * weights.score_weight
        + age_bonus)
        * 1000.0
}
