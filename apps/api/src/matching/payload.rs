//! Wire shapes accepted from REST callers, and their conversion into domain types.
//!
//! Raw numbers are taken as `i64` so out-of-range levels reach validation
//! and come back as `InvalidInput` instead of a serde rejection.

use std::collections::HashSet;

use serde::Deserialize;

use crate::matching::models::{
    validate_weight, AnswerSheet, Level, ProfessionId, ProfessionProfile, RespondentAnswer,
    SkillId, SkillRequirement, DEFAULT_WEIGHT,
};
use crate::matching::MatchError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub skill_id: SkillId,
    pub level: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementPayload {
    pub skill_id: SkillId,
    pub required_level: i64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// A profession as served by `/api/professions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionPayload {
    pub id: ProfessionId,
    pub name: String,
    #[serde(default)]
    pub required_skills: Vec<RequirementPayload>,
}

pub fn parse_answers(payload: &[AnswerPayload]) -> Result<AnswerSheet, MatchError> {
    let answers = payload
        .iter()
        .map(|a| {
            let level = Level::new(a.level).map_err(|_| {
                MatchError::InvalidInput(format!(
                    "answer for skill {} has level {} outside 1..=5",
                    a.skill_id, a.level
                ))
            })?;
            Ok(RespondentAnswer {
                skill_id: a.skill_id,
                level,
            })
        })
        .collect::<Result<Vec<_>, MatchError>>()?;

    AnswerSheet::from_answers(&answers)
}

pub fn parse_profession(payload: &ProfessionPayload) -> Result<ProfessionProfile, MatchError> {
    let mut seen = HashSet::with_capacity(payload.required_skills.len());
    let mut requirements = Vec::with_capacity(payload.required_skills.len());

    for req in &payload.required_skills {
        if !seen.insert(req.skill_id) {
            return Err(MatchError::InvalidInput(format!(
                "profession {} lists skill {} more than once",
                payload.id, req.skill_id
            )));
        }
        let required_level = Level::new(req.required_level).map_err(|_| {
            MatchError::InvalidInput(format!(
                "profession {} requires skill {} at level {} outside 1..=5",
                payload.id, req.skill_id, req.required_level
            ))
        })?;
        validate_weight(req.skill_id, req.weight)?;
        requirements.push(SkillRequirement {
            skill_id: req.skill_id,
            required_level,
            weight: req.weight,
        });
    }

    Ok(ProfessionProfile::new(
        payload.id,
        payload.name.clone(),
        requirements,
    ))
}

/// Parses every profession, rejecting a profession id given twice.
pub fn parse_professions(
    payload: &[ProfessionPayload],
) -> Result<Vec<ProfessionProfile>, MatchError> {
    let mut seen = HashSet::with_capacity(payload.len());
    payload
        .iter()
        .map(|p| {
            if !seen.insert(p.id) {
                return Err(MatchError::InvalidInput(format!(
                    "profession {} appears more than once",
                    p.id
                )));
            }
            parse_profession(p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn professions(value: serde_json::Value) -> Vec<ProfessionPayload> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parses_rest_shapes() {
        let answers: Vec<AnswerPayload> =
            serde_json::from_value(json!([{ "skillId": 1, "level": 4 }])).unwrap();
        let sheet = parse_answers(&answers).unwrap();
        assert_eq!(sheet.level_or_zero(1), 4);

        let parsed = parse_professions(&professions(json!([{
            "id": 10,
            "name": "Data Scientist",
            "requiredSkills": [
                { "skillId": 1, "requiredLevel": 5 },
                { "skillId": 2, "requiredLevel": 3, "weight": 2.0 }
            ]
        }])))
        .unwrap();
        assert_eq!(parsed[0].profession_id, 10);
        assert_eq!(parsed[0].requirements[0].weight, 1.0);
        assert_eq!(parsed[0].requirements[1].weight, 2.0);
        assert_eq!(parsed[0].requirements[1].required_level.value(), 3);
    }

    #[test]
    fn test_missing_required_skills_means_empty() {
        let parsed =
            parse_professions(&professions(json!([{ "id": 1, "name": "New" }]))).unwrap();
        assert!(parsed[0].requirements.is_empty());
    }

    #[test]
    fn test_rejects_answer_level_out_of_range() {
        let answers = vec![AnswerPayload {
            skill_id: 3,
            level: 0,
        }];
        let err = parse_answers(&answers).unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(msg) if msg.contains("skill 3")));
    }

    #[test]
    fn test_rejects_required_level_out_of_range() {
        let err = parse_professions(&professions(json!([{
            "id": 1, "name": "X", "requiredSkills": [{ "skillId": 1, "requiredLevel": 6 }]
        }])))
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_zero_required_level() {
        let err = parse_professions(&professions(json!([{
            "id": 1, "name": "X", "requiredSkills": [{ "skillId": 1, "requiredLevel": 0 }]
        }])))
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_requirement() {
        let err = parse_professions(&professions(json!([{
            "id": 1, "name": "X", "requiredSkills": [
                { "skillId": 1, "requiredLevel": 2 },
                { "skillId": 1, "requiredLevel": 3 }
            ]
        }])))
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(msg) if msg.contains("more than once")));
    }

    #[test]
    fn test_rejects_duplicate_profession() {
        let err = parse_professions(&professions(json!([
            { "id": 1, "name": "X" },
            { "id": 1, "name": "Y" }
        ])))
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let err = parse_professions(&professions(json!([{
            "id": 1, "name": "X", "requiredSkills": [{ "skillId": 1, "requiredLevel": 2, "weight": 0.0 }]
        }])))
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_answer() {
        let answers = vec![
            AnswerPayload { skill_id: 1, level: 2 },
            AnswerPayload { skill_id: 1, level: 3 },
        ];
        assert!(parse_answers(&answers).is_err());
    }
}
