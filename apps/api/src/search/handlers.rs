use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::search::search_jobs;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_results: Vec<JobPosting>,
}

/// POST /api/search-jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload?;
    let title = request.job_title.unwrap_or_default();

    let search_results = search_jobs(state.job_board.as_ref(), &title).await?;

    Ok(Json(SearchResponse { search_results }))
}
