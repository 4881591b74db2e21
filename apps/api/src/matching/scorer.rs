#![allow(dead_code)]

//! Match Scorer: compatibility of a respondent's skill levels with profession profiles.
//!
//! Default: `LevelRatioScorer` (weighted mean of per-skill level ratios).
//!
//! `AppState` holds an `Arc<dyn ProfessionScorer>`; handlers never name the backend.

use serde::Serialize;

use crate::matching::models::{
    validate_weight, AnswerSheet, Level, MatchResult, ProfessionId, ProfessionProfile,
};
use crate::matching::MatchError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one profession for one respondent. Implementations must be pure.
pub trait ProfessionScorer: Send + Sync {
    fn score(&self, answers: &AnswerSheet, profile: &ProfessionProfile) -> Result<f64, MatchError>;

    /// Short label surfaced in responses, e.g. "level_ratio".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LevelRatioScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. For each requirement: ratio = user_level / required_level × 100
///    (unanswered skill → user_level 0)
/// 2. match = Σ(ratio × weight) / Σ(weight), weights scaled by the largest weight
/// 3. No clamping: 5 against a required 4 contributes 125.
///
/// Skills the respondent answered but the profession does not list are ignored.
pub struct LevelRatioScorer;

impl ProfessionScorer for LevelRatioScorer {
    fn score(&self, answers: &AnswerSheet, profile: &ProfessionProfile) -> Result<f64, MatchError> {
        if profile.requirements.is_empty() {
            return Err(MatchError::EmptyRequirements {
                profession_id: profile.profession_id,
            });
        }

        for requirement in &profile.requirements {
            validate_weight(requirement.skill_id, requirement.weight)?;
        }

        // Weights are scaled by the largest one so huge finite weights cannot overflow the sums.
        let max_weight = profile
            .requirements
            .iter()
            .map(|r| r.weight)
            .fold(f64::MIN_POSITIVE, f64::max);

        let mut weighted_sum = 0.0_f64;
        let mut total_weight = 0.0_f64;

        for requirement in &profile.requirements {
            let weight = requirement.weight / max_weight;
            let user_level = answers.level_or_zero(requirement.skill_id);
            weighted_sum += skill_ratio(user_level, requirement.required_level) * weight;
            total_weight += weight;
        }

        let match_percentage = weighted_sum / total_weight;
        if !match_percentage.is_finite() {
            return Err(MatchError::InvalidInput(format!(
                "profession {} weights produce a non-finite score",
                profile.profession_id
            )));
        }

        Ok(match_percentage)
    }

    fn backend(&self) -> &'static str {
        "level_ratio"
    }
}

/// Exact per-skill ratio in percent. `required` is ≥ 1 by construction.
pub fn skill_ratio(user_level: u8, required: Level) -> f64 {
    f64::from(user_level) / f64::from(required.value()) * 100.0
}


// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Scores a single profession with the default scorer.
pub fn score_profession(answers: &AnswerSheet, profile: &ProfessionProfile) -> Result<f64, MatchError> {
    LevelRatioScorer.score(answers, profile)
}

/// Scored professions plus the ids that could not be scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBatch {
    pub results: Vec<MatchResult>,
    /// Professions with no requirements, excluded from `results`.
    pub skipped: Vec<ProfessionId>,
}

/// Scores every profile with the default scorer. See [`score_all_with`].
pub fn score_all_professions(
    answers: &AnswerSheet,
    profiles: &[ProfessionProfile],
) -> Result<ScoreBatch, MatchError> {
    score_all_with(&LevelRatioScorer, answers, profiles)
}

/// Scores each profile independently, in input order.
///
/// Profiles without requirements are skipped and reported in `skipped`.
/// Any other error aborts the batch.
pub fn score_all_with(
    scorer: &dyn ProfessionScorer,
    answers: &AnswerSheet,
    profiles: &[ProfessionProfile],
) -> Result<ScoreBatch, MatchError> {
    let mut batch = ScoreBatch::default();

    for profile in profiles {
        match scorer.score(answers, profile) {
            Ok(match_percentage) => batch.results.push(MatchResult {
                profession_id: profile.profession_id,
                profession_name: profile.name.clone(),
                match_percentage,
            }),
            Err(MatchError::EmptyRequirements { profession_id }) => {
                batch.skipped.push(profession_id)
            }
            Err(e) => return Err(e),
        }
    }

    Ok(batch)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
