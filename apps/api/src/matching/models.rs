#![allow(dead_code)]

//! Domain types for skill matching.
//!
//! Levels live on the closed ordinal scale 1..=5. Out-of-range values are
//! rejected when a `Level` is built, so the scorer never sees them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matching::MatchError;

pub type SkillId = i64;
pub type ProfessionId = i64;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An ordinal proficiency rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub fn new(value: i64) -> Result<Self, MatchError> {
        if (MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&value) {
            Ok(Level(value as u8))
        } else {
            Err(MatchError::InvalidInput(format!(
                "level {value} is outside {MIN_LEVEL}..={MAX_LEVEL}"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Level {
    type Error = MatchError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Level::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// One skill a profession expects, at a target level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    pub skill_id: SkillId,
    pub required_level: Level,
    pub weight: f64,
}

impl SkillRequirement {
    /// Requirement with the default weight of 1.0.
    pub fn new(skill_id: SkillId, required_level: Level) -> Self {
        Self {
            skill_id,
            required_level,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn weighted(
        skill_id: SkillId,
        required_level: Level,
        weight: f64,
    ) -> Result<Self, MatchError> {
        validate_weight(skill_id, weight)?;
        Ok(Self {
            skill_id,
            required_level,
            weight,
        })
    }
}

/// Weights must be finite and strictly positive.
pub(crate) fn validate_weight(skill_id: SkillId, weight: f64) -> Result<(), MatchError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(MatchError::InvalidInput(format!(
            "weight {weight} for skill {skill_id} must be a positive finite number"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionProfile {
    pub profession_id: ProfessionId,
    pub name: String,
    pub requirements: Vec<SkillRequirement>,
}

impl ProfessionProfile {
    pub fn new(
        profession_id: ProfessionId,
        name: impl Into<String>,
        requirements: Vec<SkillRequirement>,
    ) -> Self {
        Self {
            profession_id,
            name: name.into(),
            requirements,
        }
    }

    /// Looks up the requirement for a skill, if this profession lists it.
    pub fn requirement_for(&self, skill_id: SkillId) -> Option<&SkillRequirement> {
        self.requirements.iter().find(|r| r.skill_id == skill_id)
    }
}

/// A single submitted answer: the respondent's level for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentAnswer {
    pub skill_id: SkillId,
    pub level: Level,
}

/// A respondent's answers keyed by skill. Skill ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    levels: HashMap<SkillId, Level>,
}

impl AnswerSheet {
    /// Builds a sheet, rejecting a skill answered twice.
    pub fn from_answers(answers: &[RespondentAnswer]) -> Result<Self, MatchError> {
        let mut levels = HashMap::with_capacity(answers.len());
        for answer in answers {
            if levels.insert(answer.skill_id, answer.level).is_some() {
                return Err(MatchError::InvalidInput(format!(
                    "skill {} answered more than once",
                    answer.skill_id
                )));
            }
        }
        Ok(Self { levels })
    }

    pub fn get(&self, skill_id: SkillId) -> Option<Level> {
        self.levels.get(&skill_id).copied()
    }

    /// The respondent's level for a skill; unanswered skills count as 0.
    pub fn level_or_zero(&self, skill_id: SkillId) -> u8 {
        self.get(skill_id).map(Level::value).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Answers sorted by skill id.
    pub fn answers(&self) -> Vec<RespondentAnswer> {
        let mut answers: Vec<RespondentAnswer> = self
            .levels
            .iter()
            .map(|(&skill_id, &level)| RespondentAnswer { skill_id, level })
            .collect();
        answers.sort_by_key(|a| a.skill_id);
        answers
    }
}

/// Compatibility of one respondent with one profession. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub profession_id: ProfessionId,
    pub profession_name: String,
    /// Unclamped: a respondent above the required levels scores over 100.
    pub match_percentage: f64,
}
