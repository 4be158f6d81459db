use std::sync::Arc;
use std::time::Instant;

use chrono::{Datelike, Utc};
use rand::thread_rng;

use crate::{
    error::{AppError, AppResult},
    models::{Language, PlacementInstruction, TierBreakdown},
    services::{
        layout::{plan_layout, TextMeasurer},
        providers::CatalogProvider,
        sampling::{sample_tiers, TierSamples},
        scoring::ObscurityWeights,
        stats::aggregate,
        tiers::{build_tiers, TierBuckets},
    },
};

/// Tunables threaded through one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub weights: ObscurityWeights,
    /// Titles sampled per tier for display
    pub sample_size: usize,
    /// Longest display title eligible for sampling, in characters
    pub title_length_cap: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            weights: ObscurityWeights::default(),
            sample_size: 5,
            title_length_cap: 40,
        }
    }
}

/// Everything one pipeline run produces.
///
/// All values are explicit results of this run; nothing is accumulated in
/// process-wide state between runs.
pub struct PipelineReport {
    /// Full classified set, disjoint and exhaustive
    pub buckets: TierBuckets,
    /// Display samples drawn from each bucket
    pub samples: TierSamples,
    pub placements: Vec<PlacementInstruction>,
    pub stats: TierBreakdown,
}

/// Runs the full fetch-score-tier-sample-layout-stats pass for one user.
///
/// The fetch is the only suspension point; everything after it is a single
/// synchronous pass. Fetch failures are terminal for the invocation. An
/// empty normalized list is not an error: the report comes back with empty
/// buckets, no placements and a zero-total breakdown.
pub async fn run_pipeline(
    provider: Arc<dyn CatalogProvider>,
    measurer: &dyn TextMeasurer,
    options: &PipelineOptions,
    username: &str,
    language: Language,
) -> AppResult<PipelineReport> {
    let start = Instant::now();

    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput(
            "Username cannot be empty".to_string(),
        ));
    }

    let titles = provider.fetch_watch_history(username).await?;

    if titles.is_empty() {
        tracing::warn!(
            username = %username,
            provider = provider.name(),
            "No qualifying titles after filtering"
        );
    }

    let current_year = Utc::now().year();
    let buckets = build_tiers(titles, current_year, &options.weights);

    let mut rng = thread_rng();
    let samples = sample_tiers(&buckets, options.sample_size, options.title_length_cap, &mut rng);
    let placements = plan_layout(&samples, language, measurer);
    let stats = aggregate(&buckets);

    tracing::info!(
        username = %username,
        total = stats.total,
        placements = placements.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Pipeline completed"
    );

    Ok(PipelineReport {
        buckets,
        samples,
        placements,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WatchStatus, WatchedTitle};
    use crate::services::layout::GlyphEstimateMeasurer;
    use crate::services::providers::MockCatalogProvider;

    fn title(id: i64, popularity: i64) -> WatchedTitle {
        WatchedTitle {
            title_romaji: format!("Title {}", id),
            title_english: format!("Title {}", id),
            id,
            rank: None,
            popularity,
            release_year: 2012,
            average_score: 68.0,
            is_adult: false,
            status: WatchStatus::Completed,
            media_format: "TV".to_string(),
        }
    }

    fn provider_returning(titles: Vec<WatchedTitle>) -> Arc<dyn CatalogProvider> {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_fetch_watch_history()
            .returning(move |_| Ok(titles.clone()));
        provider.expect_name().return_const("mock");
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_pipeline_conserves_titles() {
        let titles: Vec<WatchedTitle> =
            (0..20).map(|i| title(i, 1_000 + i * 36_789)).collect();
        let provider = provider_returning(titles);
        let measurer = GlyphEstimateMeasurer::default();

        let report = run_pipeline(
            provider,
            &measurer,
            &PipelineOptions::default(),
            "someone",
            Language::English,
        )
        .await
        .unwrap();

        assert_eq!(report.buckets.total(), 20);
        assert_eq!(report.stats.total, 20);
        // At most 5 samples per tier, so at most 40 placements
        assert!(report.placements.len() <= 40);
    }

    #[tokio::test]
    async fn test_pipeline_empty_result_set() {
        let provider = provider_returning(Vec::new());
        let measurer = GlyphEstimateMeasurer::default();

        let report = run_pipeline(
            provider,
            &measurer,
            &PipelineOptions::default(),
            "someone",
            Language::English,
        )
        .await
        .unwrap();

        assert_eq!(report.buckets.total(), 0);
        assert_eq!(report.stats.total, 0);
        assert!(report.placements.is_empty());
        for sample in &report.samples {
            assert!(sample.is_empty());
        }
    }

    #[tokio::test]
    async fn test_pipeline_rejects_blank_username() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_fetch_watch_history().never();
        let measurer = GlyphEstimateMeasurer::default();

        let result = run_pipeline(
            Arc::new(provider),
            &measurer,
            &PipelineOptions::default(),
            "   ",
            Language::English,
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_pipeline_propagates_user_not_found() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_fetch_watch_history()
            .returning(|_| Err(AppError::UserNotFound("User 'ghost' not found".to_string())));
        let measurer = GlyphEstimateMeasurer::default();

        let result = run_pipeline(
            Arc::new(provider),
            &measurer,
            &PipelineOptions::default(),
            "ghost",
            Language::English,
        )
        .await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_pipeline_sample_size_is_honored() {
        let titles: Vec<WatchedTitle> = (0..30).map(|i| title(i, 2_000)).collect();
        let provider = provider_returning(titles);
        let measurer = GlyphEstimateMeasurer::default();

        let options = PipelineOptions {
            sample_size: 2,
            ..PipelineOptions::default()
        };

        let report = run_pipeline(provider, &measurer, &options, "someone", Language::English)
            .await
            .unwrap();

        for sample in &report.samples {
            assert!(sample.len() <= 2);
        }
    }
}
