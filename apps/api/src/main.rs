mod applications;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod platform;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::engine::ApplicationEngine;
use crate::applications::store::{InMemoryStatusStore, StatusStore};
use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::llm_client::LlmClient;
use crate::matching::scoring::{JobMatcher, KeywordJobMatcher, LlmJobMatcher};
use crate::platform::{ApplicationSubmitter, HttpPlatform, JobBoard, SimulatedPlatform};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Job platform: one adapter serves both search and submission
    let (job_board, submitter): (Arc<dyn JobBoard>, Arc<dyn ApplicationSubmitter>) =
        match &config.platform_base_url {
            Some(url) => {
                let platform = Arc::new(
                    HttpPlatform::new(
                        url,
                        config.platform_api_key.clone(),
                        config.platform_timeout,
                    )
                    .context("Failed to build job platform client")?,
                );
                info!("Job platform: {url}");
                let board: Arc<dyn JobBoard> = platform.clone();
                let submitter: Arc<dyn ApplicationSubmitter> = platform;
                (board, submitter)
            }
            None => {
                let platform = Arc::new(SimulatedPlatform::new(
                    config.simulated_reject_job_ids.iter().copied(),
                ));
                warn!("PLATFORM_BASE_URL not set; using the simulated job platform");
                let board: Arc<dyn JobBoard> = platform.clone();
                let submitter: Arc<dyn ApplicationSubmitter> = platform;
                (board, submitter)
            }
        };

    let matcher = build_matcher(&config)?;

    // Status store lives exactly as long as the server
    let store = Arc::new(InMemoryStatusStore::new());
    let engine = ApplicationEngine::new(
        store.clone(),
        submitter,
        config.apply_concurrency,
        config.apply_timeout,
    );
    info!(
        "Application engine ready (concurrency {}, timeout {:?})",
        config.apply_concurrency, config.apply_timeout
    );

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(DocumentTextExtractor),
        matcher,
        job_board,
        engine: Arc::new(engine),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let summary = store.summary().await?;
    info!(
        total = summary.total,
        completed = summary.completed,
        failed = summary.failed,
        in_progress = summary.in_progress,
        pending = summary.pending,
        "Shut down; discarding status store"
    );

    Ok(())
}

/// Keyword matcher unless ENABLE_LLM_MATCHING is set and an API key is present.
fn build_matcher(config: &Config) -> Result<Arc<dyn JobMatcher>> {
    match (&config.anthropic_api_key, config.enable_llm_matching) {
        (Some(key), true) => {
            let llm = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
            info!("Job matcher: LLM ({})", llm_client::MODEL);
            Ok(Arc::new(LlmJobMatcher::new(llm, config.max_matches)))
        }
        (None, true) => {
            warn!("ENABLE_LLM_MATCHING is set but ANTHROPIC_API_KEY is missing; using keyword matcher");
            Ok(Arc::new(KeywordJobMatcher::new(config.max_matches)))
        }
        _ => {
            info!("Job matcher: keyword");
            Ok(Arc::new(KeywordJobMatcher::new(config.max_matches)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
