//! Job Search: validates a title query and passes it through to the platform.

pub mod handlers;

use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::platform::JobBoard;

/// Queries the platform for `title`. Result order is the platform's own.
pub async fn search_jobs(board: &dyn JobBoard, title: &str) -> Result<Vec<JobPosting>, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidArgument(
            "Job title is required".to_string(),
        ));
    }

    let postings = board.search(title).await?;
    info!("Job search '{title}' returned {} postings", postings.len());
    Ok(postings)
}
