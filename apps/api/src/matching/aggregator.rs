//! Result Aggregator: ranking and presentation shapes built from scored matches.
//!
//! Nothing here feeds back into scoring; the series is for charts only.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::matching::models::{AnswerSheet, MatchResult, ProfessionId, ProfessionProfile, SkillId};
use crate::matching::scorer::skill_ratio;
use crate::matching::MatchError;

/// Sorts by match percentage, highest first, ties by ascending profession id,
/// then keeps the first `n`. Fewer than `n` results is not an error.
pub fn rank_top_n(results: &[MatchResult], n: usize) -> Result<Vec<MatchResult>, MatchError> {
    if n == 0 {
        return Err(MatchError::InvalidArgument(
            "n must be greater than zero".to_string(),
        ));
    }

    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| {
        b.match_percentage
            .total_cmp(&a.match_percentage)
            .then_with(|| a.profession_id.cmp(&b.profession_id))
    });
    ranked.truncate(n);
    Ok(ranked)
}

/// The best-matching profession, used to pre-select a roadmap.
pub fn select_default_profession(results: &[MatchResult]) -> Option<ProfessionId> {
    rank_top_n(results, 1)
        .ok()
        .and_then(|top| top.first().map(|r| r.profession_id))
}

// ────────────────────────────────────────────────────────────────────────────
// Radar chart series
// ────────────────────────────────────────────────────────────────────────────

/// One chart cell. `percentage` is the exact user/required ratio;
/// `display_percentage` is the same value rounded to a whole percent.
/// `applicable` is false when the profession does not list the skill; both
/// percentages are then 0 and carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCell {
    pub percentage: f64,
    pub display_percentage: f64,
    pub applicable: bool,
}

impl SeriesCell {
    const NOT_APPLICABLE: SeriesCell = SeriesCell {
        percentage: 0.0,
        display_percentage: 0.0,
        applicable: false,
    };

    fn required(percentage: f64) -> Self {
        SeriesCell {
            percentage,
            display_percentage: percentage.round(),
            applicable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSeriesRow {
    pub skill: SkillId,
    pub user_level: u8,
    pub per_profession: BTreeMap<ProfessionId, SeriesCell>,
}

/// One row per skill in `skill_universe` ∪ every skill any profile requires,
/// ordered by skill id. Each row has a cell for every profile.
pub fn build_skill_series(
    answers: &AnswerSheet,
    profiles: &[ProfessionProfile],
    skill_universe: &BTreeSet<SkillId>,
) -> Vec<SkillSeriesRow> {
    let mut skills = skill_universe.clone();
    skills.extend(
        profiles
            .iter()
            .flat_map(|p| p.requirements.iter().map(|r| r.skill_id)),
    );

    skills
        .into_iter()
        .map(|skill| {
            let user_level = answers.level_or_zero(skill);
            let per_profession = profiles
                .iter()
                .map(|profile| {
                    let cell = match profile.requirement_for(skill) {
                        Some(req) => {
                            SeriesCell::required(skill_ratio(user_level, req.required_level))
                        }
                        None => SeriesCell::NOT_APPLICABLE,
                    };
                    (profile.profession_id, cell)
                })
                .collect();

            SkillSeriesRow {
                skill,
                user_level,
                per_profession,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tables and roadmap lookup
// ────────────────────────────────────────────────────────────────────────────

/// A ranked row for result tables and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub rank: usize,
    pub profession_id: ProfessionId,
    pub profession_name: String,
    pub match_percentage: f64,
    pub label: String,
}

/// Numbers an already-ranked list from 1.
pub fn build_result_table(ranked: &[MatchResult]) -> Vec<ResultRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| ResultRow {
            rank: i + 1,
            profession_id: r.profession_id,
            profession_name: r.profession_name.clone(),
            match_percentage: r.match_percentage,
            label: match_label(r.match_percentage),
        })
        .collect()
}

pub fn match_label(percentage: f64) -> String {
    format!("{:.0}% match", percentage)
}

/// Slug used to look up a profession's roadmap, e.g. "Data Scientist" → "data-scientist".
pub fn roadmap_key(profession_name: &str) -> String {
    let mut key = String::with_capacity(profession_name.len());
    let mut pending_dash = false;

    for c in profession_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !key.is_empty() {
                key.push('-');
            }
            pending_dash = false;
            key.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    key
}
