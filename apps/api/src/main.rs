mod config;
mod embedding;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::OpenAiEmbedder;
use crate::extraction::SkillExtractor;
use crate::llm_client::LlmClient;
use crate::matching::{SkillMatcher, SkillVectorizer};
use crate::routes::build_router;
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

    info!("Starting skillmatch v{}", env!("CARGO_PKG_VERSION"));

    // Chat model used for CV / job extraction
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_chat_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Embedding provider, injected into the vectorizer
    let embedder = OpenAiEmbedder::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_embedding_model.clone(),
    )?;
    info!(
        "Embedding client initialized (model: {}, concurrency: {})",
        embedder.model(),
        config.embed_concurrency
    );

    let matcher = SkillMatcher::new(SkillVectorizer::new(
        Arc::new(embedder),
        config.embed_concurrency,
    ))
    .with_default_threshold(config.match_threshold)?;
    info!("Match threshold: {}", matcher.default_threshold());

    let state = AppState {
        extractor: SkillExtractor::new(llm),
        matcher,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload form has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
