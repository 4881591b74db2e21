//! Result Analysis: a generated, human-readable summary of a respondent's matches.
//!
//! Default: `LlmAnalyzer`, a passthrough to the LLM client followed by section splitting.
//! `AppState` holds an `Option<Arc<dyn ResultAnalyzer>>`; `None` disables the endpoint.

pub mod handlers;
pub mod prompts;
pub mod sections;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::analysis::sections::{split_sections, AnalysisSection};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::aggregator::match_label;
use crate::matching::models::{AnswerSheet, MatchResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub sections: Vec<AnalysisSection>,
    pub raw_text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ResultAnalyzer: Send + Sync {
    /// `ranked` is already ordered best-first and truncated to what should be discussed.
    async fn analyze(
        &self,
        answers: &AnswerSheet,
        ranked: &[MatchResult],
    ) -> Result<AnalysisReport, AppError>;
}

pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl ResultAnalyzer for LlmAnalyzer {
    async fn analyze(
        &self,
        answers: &AnswerSheet,
        ranked: &[MatchResult],
    ) -> Result<AnalysisReport, AppError> {
        let prompt = build_prompt(answers, ranked);
        let raw_text = self
            .0
            .complete(&prompt, ANALYSIS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Result analysis failed: {e}")))?;

        Ok(AnalysisReport {
            sections: split_sections(&raw_text),
            raw_text,
            model: self.0.model().to_string(),
            generated_at: Utc::now(),
        })
    }
}

pub fn build_prompt(answers: &AnswerSheet, ranked: &[MatchResult]) -> String {
    let skill_levels = if answers.is_empty() {
        "- (no answers)".to_string()
    } else {
        answers
            .answers()
            .iter()
            .map(|a| format!("- skill {}: level {}", a.skill_id, a.level.value()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let top_professions = if ranked.is_empty() {
        "- (no scorable professions)".to_string()
    } else {
        ranked
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{}. {} ({})",
                    i + 1,
                    r.profession_name,
                    match_label(r.match_percentage)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{skill_levels}", &skill_levels)
        .replace("{top_professions}", &top_professions)
}
