mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod report;
mod routes;
mod sheets;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{DeepSeekClient, FeedbackModel};
use crate::routes::build_router;
use crate::sheets::{GoogleSheetsSource, SheetSource};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Booster API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the spreadsheet source (rejects malformed credentials outright)
    let sheets: Arc<dyn SheetSource> =
        Arc::new(GoogleSheetsSource::new(config.google_sheets_token.clone())?);
    info!("Sheets client initialized ({} sources)", config.sheet_ids.len());

    // Initialize the LLM client
    let model: Arc<dyn FeedbackModel> =
        Arc::new(DeepSeekClient::new(config.deepseek_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Reports directory must exist before the first render
    std::fs::create_dir_all(&config.reports_dir).with_context(|| {
        format!("Failed to create reports directory {}", config.reports_dir.display())
    })?;

    // Build app state
    let state = AppState {
        sheets,
        model,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
