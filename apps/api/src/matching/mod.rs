//! Résumé analysis: extract text, then rank roles against it.

pub mod catalog;
pub mod handlers;
pub mod prompts;
pub mod scoring;

use std::sync::Arc;

use tracing::warn;

use crate::errors::AppError;
use crate::extraction::{ResumeDocument, TextExtractor};
use crate::matching::scoring::JobMatcher;
use crate::models::job::JobMatch;

/// Extracts the document's text on the blocking pool and ranks it.
///
/// Extraction failures surface as `ExtractionUnavailable`; blank text is
/// not an error and still yields best-effort matches.
pub async fn analyze_resume(
    extractor: Arc<dyn TextExtractor>,
    matcher: &dyn JobMatcher,
    document: ResumeDocument,
) -> Result<Vec<JobMatch>, AppError> {
    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&document))
        .await
        .map_err(|e| AppError::ExtractionUnavailable(format!("extraction task aborted: {e}")))??;

    if text.trim().is_empty() {
        warn!("Résumé produced no text; returning best-effort matches");
    }

    Ok(matcher.match_resume(&text).await)
}
