//! Axum route handlers for the application workflow.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::applications::engine::BatchSummary;
use crate::applications::store::StatusSummary;
use crate::errors::AppError;
use crate::models::application::ApplicationRecord;
use crate::models::job::{CandidateData, JobId};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobRequest {
    pub job_id: Option<JobId>,
    pub candidate_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyMultipleRequest {
    pub job_ids: Option<Vec<JobId>>,
    pub candidate_data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ApplyMultipleResponse {
    pub applications: Vec<ApplicationRecord>,
    pub summary: BatchSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn require_job_id(job_id: Option<JobId>) -> Result<JobId, AppError> {
    match job_id {
        Some(id) if id.0 > 0 => Ok(id),
        _ => Err(AppError::InvalidArgument("Job ID is required".to_string())),
    }
}

fn require_job_ids(job_ids: Option<Vec<JobId>>) -> Result<Vec<JobId>, AppError> {
    let job_ids = job_ids.unwrap_or_default();
    if job_ids.is_empty() {
        return Err(AppError::InvalidArgument("Job IDs are required".to_string()));
    }
    if job_ids.iter().any(|id| id.0 == 0) {
        return Err(AppError::InvalidArgument(
            "Job IDs must be positive integers".to_string(),
        ));
    }
    Ok(job_ids)
}

fn candidate_data(raw: Option<Value>) -> Result<CandidateData, AppError> {
    match raw {
        None | Some(Value::Null) => Ok(CandidateData::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(AppError::InvalidArgument(
            "candidateData must be an object".to_string(),
        )),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/apply-job
pub async fn handle_apply_job(
    State(state): State<AppState>,
    payload: Result<Json<ApplyJobRequest>, JsonRejection>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let Json(request) = payload?;
    let job_id = require_job_id(request.job_id)?;
    let candidate = candidate_data(request.candidate_data)?;

    let record = state.engine.apply_one(job_id, &candidate).await?;
    Ok(Json(record))
}

/// POST /api/apply-multiple
///
/// Every job yields exactly one record, in request order, whatever its outcome.
pub async fn handle_apply_multiple(
    State(state): State<AppState>,
    payload: Result<Json<ApplyMultipleRequest>, JsonRejection>,
) -> Result<Json<ApplyMultipleResponse>, AppError> {
    let Json(request) = payload?;
    let job_ids = require_job_ids(request.job_ids)?;
    let candidate = candidate_data(request.candidate_data)?;

    let applications = state.engine.apply_batch(&job_ids, &candidate).await?;
    let summary = BatchSummary::from_records(&applications);

    Ok(Json(ApplyMultipleResponse {
        applications,
        summary,
    }))
}

/// GET /api/job-status/:application_id
///
/// Ids that are malformed or were never issued are both 404.
pub async fn handle_job_status(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let id = Uuid::parse_str(&application_id)
        .map_err(|_| AppError::NotFound(format!("Application {application_id} not found")))?;

    let record = state.engine.get_status(id).await?;
    Ok(Json(record))
}

/// GET /api/job-status
pub async fn handle_status_summary(
    State(state): State<AppState>,
) -> Result<Json<StatusSummary>, AppError> {
    Ok(Json(state.engine.summary().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_job_id() {
        assert_eq!(require_job_id(Some(JobId(3))).unwrap(), JobId(3));
        assert!(require_job_id(None).is_err());
        assert!(require_job_id(Some(JobId(0))).is_err());
    }

    #[test]
    fn test_require_job_ids() {
        assert_eq!(
            require_job_ids(Some(vec![JobId(2), JobId(1)])).unwrap(),
            vec![JobId(2), JobId(1)]
        );
        assert!(require_job_ids(None).is_err());
        assert!(require_job_ids(Some(vec![])).is_err());
        assert!(require_job_ids(Some(vec![JobId(1), JobId(0)])).is_err());
    }

    #[test]
    fn test_candidate_data_shapes() {
        assert!(candidate_data(None).unwrap().is_empty());
        assert!(candidate_data(Some(Value::Null)).unwrap().is_empty());

        let map = candidate_data(Some(json!({"name": "Sam", "email": "sam@example.com"}))).unwrap();
        assert_eq!(map["name"], "Sam");

        assert!(matches!(
            candidate_data(Some(json!(["not", "an", "object"]))),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
