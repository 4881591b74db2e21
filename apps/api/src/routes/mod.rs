pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matches/score", post(handlers::handle_score))
        .route("/api/v1/matches/ranking", post(handlers::handle_ranking))
        .route("/api/v1/matches/series", post(handlers::handle_series))
        .route(
            "/api/v1/matches/analysis",
            post(analysis_handlers::handle_analysis),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::sections::split_sections;
    use crate::analysis::{AnalysisReport, ResultAnalyzer};
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::matching::models::{AnswerSheet, MatchResult};
    use crate::matching::scorer::LevelRatioScorer;

    struct CannedAnalyzer;

    #[async_trait]
    impl ResultAnalyzer for CannedAnalyzer {
        async fn analyze(
            &self,
            _answers: &AnswerSheet,
            ranked: &[MatchResult],
        ) -> Result<AnalysisReport, AppError> {
            let raw_text = format!("## Recommended Professions\n{}", ranked[0].profession_name);
            Ok(AnalysisReport {
                sections: split_sections(&raw_text),
                raw_text,
                model: "canned".to_string(),
                generated_at: Utc::now(),
            })
        }
    }

    fn test_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn app(analyzer: Option<Arc<dyn ResultAnalyzer>>) -> Router {
        build_router(AppState {
            config: test_config(),
            scorer: Arc::new(LevelRatioScorer),
            analyzer,
        })
    }

    fn example_body() -> Value {
        json!({
            "answers": [
                { "skillId": 1, "level": 4 },
                { "skillId": 2, "level": 5 },
                { "skillId": 3, "level": 3 }
            ],
            "professions": [
                { "id": 10, "name": "Data Scientist", "requiredSkills": [
                    { "skillId": 1, "requiredLevel": 5 },
                    { "skillId": 2, "requiredLevel": 4 },
                    { "skillId": 3, "requiredLevel": 3 }
                ]},
                { "id": 11, "name": "Digital Forensics Analyst", "requiredSkills": [
                    { "skillId": 1, "requiredLevel": 4 },
                    { "skillId": 2, "requiredLevel": 5 },
                    { "skillId": 3, "requiredLevel": 2 }
                ]},
                { "id": 12, "name": "Database Architect", "requiredSkills": [
                    { "skillId": 1, "requiredLevel": 3 },
                    { "skillId": 2, "requiredLevel": 4 },
                    { "skillId": 3, "requiredLevel": 4 }
                ]},
                { "id": 13, "name": "Unconfigured", "requiredSkills": [] }
            ]
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_score_skips_empty_profession() {
        let (status, body) = post_json(app(None), "/api/v1/matches/score", example_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
        assert_eq!(body["skipped"], json!([13]));
        assert_eq!(body["scorerBackend"], "level_ratio");
    }

    #[tokio::test]
    async fn test_ranking_returns_top_match_and_roadmap() {
        let mut request = example_body();
        request["topN"] = json!(2);
        let (status, body) = post_json(app(None), "/api/v1/matches/ranking", request).await;
        assert_eq!(status, StatusCode::OK);

        let ranked = body["ranked"].as_array().unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0]["professionName"], "Digital Forensics Analyst");
        assert_eq!(ranked[0]["rank"], 1);
        assert_eq!(ranked[0]["label"], "117% match");
        assert_eq!(ranked[1]["professionName"], "Database Architect");
        assert_eq!(body["defaultProfessionId"], 11);
        assert_eq!(body["roadmapKey"], "digital-forensics-analyst");
    }

    #[tokio::test]
    async fn test_ranking_rejects_zero_top_n() {
        let mut request = example_body();
        request["topN"] = json!(0);
        let (status, body) = post_json(app(None), "/api/v1/matches/ranking", request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_out_of_range_level_is_bad_request() {
        let mut request = example_body();
        request["answers"][0]["level"] = json!(7);
        let (status, body) = post_json(app(None), "/api/v1/matches/score", request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("outside 1..=5"));
    }

    #[tokio::test]
    async fn test_series_marks_not_applicable_cells() {
        let request = json!({
            "answers": [{ "skillId": 1, "level": 4 }],
            "professions": [
                { "id": 10, "name": "A", "requiredSkills": [{ "skillId": 1, "requiredLevel": 3 }] },
                { "id": 11, "name": "B", "requiredSkills": [{ "skillId": 2, "requiredLevel": 4 }] }
            ],
            "skillUniverse": [5]
        });
        let (status, body) = post_json(app(None), "/api/v1/matches/series", request).await;
        assert_eq!(status, StatusCode::OK);

        let series = body["series"].as_array().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0]["skill"], 1);
        let cell = &series[0]["perProfession"]["10"];
        let pct = cell["percentage"].as_f64().unwrap();
        assert!((pct - 133.33).abs() < 0.01, "Got {pct}");
        assert_eq!(cell["displayPercentage"], 133.0);
        assert_eq!(series[0]["perProfession"]["11"]["applicable"], false);
        assert_eq!(series[2]["skill"], 5);
    }

    #[tokio::test]
    async fn test_analysis_disabled_without_analyzer() {
        let (status, body) = post_json(app(None), "/api/v1/matches/analysis", example_body()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "ANALYSIS_DISABLED");
    }

    #[tokio::test]
    async fn test_analysis_with_analyzer() {
        let (status, body) = post_json(
            app(Some(Arc::new(CannedAnalyzer))),
            "/api/v1/matches/analysis",
            example_body(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0]["title"], "Recommended Professions");
        assert_eq!(body["sections"][0]["body"], "Digital Forensics Analyst");
        assert_eq!(body["model"], "canned");
    }
}
