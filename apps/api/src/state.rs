use std::sync::Arc;

use crate::analysis::ResultAnalyzer;
use crate::config::Config;
use crate::matching::scorer::ProfessionScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable profession scorer. Default: LevelRatioScorer.
    pub scorer: Arc<dyn ProfessionScorer>,
    /// Result analyzer; `None` when no LLM API key is configured.
    pub analyzer: Option<Arc<dyn ResultAnalyzer>>,
}
