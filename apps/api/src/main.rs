mod analysis;
mod config;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{LlmAnalyzer, ResultAnalyzer};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::scorer::{LevelRatioScorer, ProfessionScorer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    let scorer: Arc<dyn ProfessionScorer> = Arc::new(LevelRatioScorer);
    info!("Profession scorer: {}", scorer.backend());

    let analyzer: Option<Arc<dyn ResultAnalyzer>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_model.clone())
                .context("Failed to build LLM HTTP client")?;
            info!("Result analysis enabled (model: {})", llm.model());
            Some(Arc::new(LlmAnalyzer(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; result analysis disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        scorer,
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the survey frontend origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
