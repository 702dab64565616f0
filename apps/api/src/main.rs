mod config;
mod errors;
mod llm_client;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search::service::CandidateSearch;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing API key is reported per search, not here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Candidate Search v{}", env!("CARGO_PKG_VERSION"));

    if !config.credential.is_configured() {
        warn!("GEMINI_API_KEY is not set; searches will report an unconfigured provider");
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.credential.key().unwrap_or_default().to_string(),
        config.gemini_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    tokio::fs::create_dir_all(&config.export_dir).await?;
    info!("Exports directory: {}", config.export_dir.display());

    let search = CandidateSearch::new(
        Arc::new(llm),
        config.credential.clone(),
        config.export_dir.clone(),
    );

    // Build app state
    let state = AppState {
        search: Arc::new(search),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
