mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod pipeline;
mod recommendation;
mod routes;
mod scoring;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::build_extractor;
use crate::recommendation::Catalog;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SubmissionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid or missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyser v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and the submissions table
    let db = create_pool(&config.database_url).await?;
    let store = SubmissionStore::open(db).await?;

    // Initialize extraction backend (heuristic by default, swap via EXTRACTOR)
    let extractor = build_extractor(&config)?;
    info!("Extraction backend: {}", extractor.backend());
    if extractor.backend() == "llm" {
        info!("LLM model: {}", llm_client::MODEL);
    }

    // Load course catalog
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading course catalog from {}", path.display());
            Catalog::load(path).await?
        }
        None => {
            info!("Using bundled course catalog");
            Catalog::bundled()?
        }
    };

    match config.max_upload_bytes {
        Some(max) => info!("Upload limit: {max} bytes"),
        None => info!("Upload limit: none"),
    }

    // Build app state
    let state = AppState {
        store,
        extractor,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
