mod candidates;
mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod reader;
mod routes;
mod scoring;
mod skills;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::{create_pool, run_migrations};
use crate::extraction::{FieldExtractor, LlmExtractor};
use crate::llm_client::LlmClient;
use crate::reader::PdfTextReader;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{CandidateStore, MemoryCandidateStore, PgCandidateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)
        .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    let extractor = FieldExtractor::new(Arc::new(LlmExtractor(llm)), config.llm_timeout);

    // Build app state
    let state = AppState {
        store,
        extractor,
        reader: Arc::new(PdfTextReader),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the UI origin once it has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn CandidateStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            let pool = create_pool(database_url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgCandidateStore::new(pool)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory candidate store; records are lost on restart");
            Ok(Arc::new(MemoryCandidateStore::new()))
        }
    }
}
