use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use aniberg_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        layout::GlyphEstimateMeasurer,
        pipeline::PipelineOptions,
        providers::{anilist::InclusionPolicy, AniListProvider},
        scoring::ObscurityWeights,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = AniListProvider::new(
        config.anilist_api_url.clone(),
        InclusionPolicy::default(),
    );

    let state = Arc::new(AppState {
        provider: Arc::new(provider),
        measurer: Arc::new(GlyphEstimateMeasurer::default()),
        options: PipelineOptions {
            weights: ObscurityWeights {
                max_popularity: config.max_popularity,
                popularity_weight: config.popularity_weight,
                score_weight: config.score_weight,
                age_coefficient: config.age_coefficient,
            },
            sample_size: config.sample_size,
            title_length_cap: config.title_length_cap,
        },
        background_url: config.background_url.clone(),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
