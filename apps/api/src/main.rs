mod analyze;
mod clients;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod search;
mod state;
mod verify;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Candid API v{}", env!("CARGO_PKG_VERSION"));
    info!("LLM model: {}", llm_client::MODEL);
    if config.serpapi_api_key.is_none() {
        info!("SERPAPI_API_KEY not set; deep web search will return empty results");
    }
    if config.rapidapi_key.is_none() {
        info!("RAPIDAPI_KEY not set; LinkedIn enrichment disabled");
    }

    let state = AppState::new(config);
    let port = state.config.port;

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: tighten CORS in production
    );

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
