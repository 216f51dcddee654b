pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::matching::handlers as matching;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé analysis
        .route("/api/analyze-cv", post(matching::handle_analyze_cv))
        // Job search
        .route("/api/search-jobs", post(search::handle_search_jobs))
        // Application workflow
        .route("/api/apply-job", post(applications::handle_apply_job))
        .route("/api/apply-multiple", post(applications::handle_apply_multiple))
        .route("/api/job-status", get(applications::handle_status_summary))
        .route(
            "/api/job-status/:application_id",
            get(applications::handle_job_status),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
