use axum::extract::{multipart::MultipartRejection, Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{DocumentFormat, ResumeDocument};
use crate::matching::analyze_resume;
use crate::models::job::JobMatch;
use crate::state::AppState;

/// Multipart field carrying the résumé.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub job_matches: Vec<JobMatch>,
}

/// POST /api/analyze-cv
///
/// Accepts a multipart upload (`file`: .pdf or .docx) and returns ranked job matches.
/// The document is held in memory only for the duration of the request.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::InvalidArgument("No file part".to_string()))?;
    if filename.trim().is_empty() {
        return Err(AppError::InvalidArgument("No selected file".to_string()));
    }
    let format = DocumentFormat::from_filename(&filename)?;

    info!("Analyzing résumé upload ({:?}, {} bytes)", format, bytes.len());

    let job_matches = analyze_resume(
        state.extractor.clone(),
        state.matcher.as_ref(),
        ResumeDocument { bytes, format },
    )
    .await?;

    Ok(Json(AnalyzeResponse { job_matches }))
}
