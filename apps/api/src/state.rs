use std::sync::Arc;

use crate::applications::engine::ApplicationEngine;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::matching::scoring::JobMatcher;
use crate::platform::JobBoard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Résumé text extraction. Default: DocumentTextExtractor (PDF + DOCX).
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable matcher. Default: KeywordJobMatcher. Swap via ENABLE_LLM_MATCHING.
    pub matcher: Arc<dyn JobMatcher>,
    /// Live platform when PLATFORM_BASE_URL is set, simulated otherwise.
    pub job_board: Arc<dyn JobBoard>,
    /// Owns the status store for the lifetime of the server.
    pub engine: Arc<ApplicationEngine>,
}
