mod ai;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod models;
mod ranking;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_aws_clients;
use crate::extract::HttpResumeExtractor;
use crate::llm_client::GeminiClient;
use crate::ranking::orchestrator::RankingEngine;
use crate::ranking::semantic::GeminiScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DynamoApplicationStore, DynamoJobStore, DynamoUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirelight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize AWS clients (DynamoDB store + Textract OCR)
    let (dynamodb, textract) = create_aws_clients(&config).await;

    // Entity repositories over the document store
    let jobs = Arc::new(DynamoJobStore::new(
        dynamodb.clone(),
        config.jobs_table.clone(),
    ));
    let users = Arc::new(DynamoUserStore::new(
        dynamodb.clone(),
        config.users_table.clone(),
    ));
    let applications = Arc::new(DynamoApplicationStore::new(
        dynamodb,
        config.applications_table.clone(),
    ));

    // Resume extractor: HTTP fetch + format dispatch
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.extraction_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");
    let extractor = Arc::new(HttpResumeExtractor::new(http, textract));

    // Gemini client; absent credential leaves the semantic path unavailable
    let llm = config
        .gemini_api_key
        .clone()
        .map(|key| GeminiClient::new(key, config.gemini_model.clone()));
    match &llm {
        Some(client) => info!("LLM client initialized (model: {})", client.model()),
        None => info!("GEMINI_API_KEY not set; ranking uses the lexical fallback"),
    }

    // Ranking engine
    let engine = Arc::new(RankingEngine::new(
        jobs.clone(),
        users.clone(),
        applications.clone(),
        extractor,
        Arc::new(GeminiScorer::new(llm.clone())),
        config.ranking_concurrency,
        Duration::from_secs(config.extraction_timeout_secs),
    ));

    // Build app state
    let state = AppState {
        jobs,
        users,
        applications,
        engine,
        llm,
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
