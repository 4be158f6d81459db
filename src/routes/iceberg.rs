use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{IcebergRequest, IcebergResponse, Tier, TierSummary},
    routes::AppState,
    services::pipeline,
};

/// Caption drawn across the top of the poster
const CAPTION: &str = "Aniberg";

/// Filename offered when the rendered poster is exported
const EXPORT_FILENAME: &str = "iceberg.png";

/// Handler for the iceberg endpoint
pub async fn build(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<IcebergRequest>,
) -> AppResult<Json<IcebergResponse>> {
    tracing::info!(
        request_id = %request_id,
        username = %request.username,
        language = ?request.language,
        "Processing iceberg request"
    );

    let report = pipeline::run_pipeline(
        state.provider.clone(),
        state.measurer.as_ref(),
        &state.options,
        &request.username,
        request.language,
    )
    .await?;

    let tiers = Tier::ALL
        .iter()
        .map(|&tier| TierSummary {
            tier,
            label: tier.label(),
            classified: report.buckets.get(tier).len(),
            samples: report.samples[tier.index()]
                .iter()
                .map(|title| title.rendered_title(request.language).to_string())
                .collect(),
        })
        .collect();

    tracing::info!(
        request_id = %request_id,
        total = report.stats.total,
        "Iceberg built"
    );

    Ok(Json(IcebergResponse {
        caption: CAPTION.to_string(),
        background: state.background_url.clone(),
        filename: EXPORT_FILENAME.to_string(),
        tiers,
        placements: report.placements,
        stats: report.stats,
    }))
}
