//! Axum route handler for result analysis.

use axum::{extract::State, Json};
use tracing::info;

use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::matching::handlers::{score_and_rank, RankingRequest};
use crate::state::AppState;

/// POST /api/v1/matches/analysis
///
/// Scores and ranks like `/ranking`, then asks the analyzer to summarise the top N.
/// 503 when no analyzer is configured.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<RankingRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let analyzer = state.analyzer.clone().ok_or(AppError::AnalysisDisabled)?;

    let (answers, _, ranked) = score_and_rank(&state, &request)?;
    let report = analyzer.analyze(&answers, &ranked).await?;

    info!(
        "Analysis generated: {} sections for {} ranked professions",
        report.sections.len(),
        ranked.len()
    );

    Ok(Json(report))
}
