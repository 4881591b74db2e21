//! Axum route handlers for the Matching API.

use std::collections::BTreeSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::aggregator::{
    build_result_table, build_skill_series, rank_top_n, roadmap_key, select_default_profession,
    ResultRow, SkillSeriesRow,
};
use crate::matching::models::{AnswerSheet, MatchResult, ProfessionId, ProfessionProfile, SkillId};
use crate::matching::payload::{parse_answers, parse_professions, AnswerPayload, ProfessionPayload};
use crate::matching::scorer::{score_all_with, ScoreBatch};
use crate::matching::MatchError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub answers: Vec<AnswerPayload>,
    pub professions: Vec<ProfessionPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub results: Vec<MatchResult>,
    pub skipped: Vec<ProfessionId>,
    pub scorer_backend: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    pub answers: Vec<AnswerPayload>,
    pub professions: Vec<ProfessionPayload>,
    /// Falls back to `DEFAULT_TOP_N` when omitted.
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub ranked: Vec<ResultRow>,
    pub skipped: Vec<ProfessionId>,
    pub default_profession_id: Option<ProfessionId>,
    pub roadmap_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    pub answers: Vec<AnswerPayload>,
    pub professions: Vec<ProfessionPayload>,
    #[serde(default)]
    pub skill_universe: Vec<SkillId>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub series: Vec<SkillSeriesRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn parse_input(
    answers: &[AnswerPayload],
    professions: &[ProfessionPayload],
) -> Result<(AnswerSheet, Vec<ProfessionProfile>), MatchError> {
    Ok((parse_answers(answers)?, parse_professions(professions)?))
}

/// Resolves the requested N; zero or negative is an invalid argument.
pub(crate) fn resolve_top_n(requested: Option<i64>, default: usize) -> Result<usize, MatchError> {
    match requested {
        None => Ok(default),
        Some(n) if n > 0 => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        Some(n) => Err(MatchError::InvalidArgument(format!(
            "topN must be greater than zero, got {n}"
        ))),
    }
}

/// Scores and ranks a ranking request. Shared with the analysis handler.
pub(crate) fn score_and_rank(
    state: &AppState,
    request: &RankingRequest,
) -> Result<(AnswerSheet, ScoreBatch, Vec<MatchResult>), MatchError> {
    let top_n = resolve_top_n(request.top_n, state.config.default_top_n)?;
    let (answers, profiles) = parse_input(&request.answers, &request.professions)?;
    let batch = score_all_with(state.scorer.as_ref(), &answers, &profiles)?;
    let ranked = rank_top_n(&batch.results, top_n)?;
    Ok((answers, batch, ranked))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches/score
///
/// One match result per profession with requirements; the rest are listed in `skipped`.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let (answers, profiles) = parse_input(&request.answers, &request.professions)?;
    let batch = score_all_with(state.scorer.as_ref(), &answers, &profiles)?;

    info!(
        "Scored {} professions ({} skipped) against {} answers",
        batch.results.len(),
        batch.skipped.len(),
        answers.len()
    );

    Ok(Json(ScoreResponse {
        results: batch.results,
        skipped: batch.skipped,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}

/// POST /api/v1/matches/ranking
///
/// Top-N professions as table rows, plus the default roadmap selection.
pub async fn handle_ranking(
    State(state): State<AppState>,
    Json(request): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let (_, batch, ranked) = score_and_rank(&state, &request)?;

    let default_profession_id = select_default_profession(&batch.results);
    let default_roadmap = default_profession_id.and_then(|id| {
        batch
            .results
            .iter()
            .find(|r| r.profession_id == id)
            .map(|r| roadmap_key(&r.profession_name))
    });

    debug!(
        "Ranking: {} of {} professions returned, default={:?}",
        ranked.len(),
        batch.results.len(),
        default_profession_id
    );

    Ok(Json(RankingResponse {
        ranked: build_result_table(&ranked),
        skipped: batch.skipped,
        default_profession_id,
        roadmap_key: default_roadmap,
    }))
}

/// POST /api/v1/matches/series
///
/// Per-skill radar chart data. Not used for ranking.
pub async fn handle_series(
    State(_state): State<AppState>,
    Json(request): Json<SeriesRequest>,
) -> Result<Json<SeriesResponse>, AppError> {
    let (answers, profiles) = parse_input(&request.answers, &request.professions)?;
    let universe: BTreeSet<SkillId> = request.skill_universe.iter().copied().collect();

    let series = build_skill_series(&answers, &profiles, &universe);
    debug!("Built skill series: {} skills x {} professions", series.len(), profiles.len());

    Ok(Json(SeriesResponse { series }))
}
