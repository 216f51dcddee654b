//! External job platform: search and application submission.
//!
//! Both seams are traits so the gateway and the application engine never know
//! whether they talk to a live platform or the simulated one.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::{CandidateData, JobId, JobPosting};

pub mod http;
pub mod simulated;

pub use http::HttpPlatform;
pub use simulated::SimulatedPlatform;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("platform returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("platform response could not be parsed: {0}")]
    InvalidResponse(String),
}

/// Title search against the platform.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Returns postings in the platform's relevance order.
    async fn search(&self, title: &str) -> Result<Vec<JobPosting>, PlatformError>;
}

/// Result of one submission attempt as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub diagnostic: Option<String>,
}

impl SubmissionOutcome {
    pub fn accepted() -> Self {
        Self {
            success: true,
            diagnostic: None,
        }
    }

    pub fn rejected(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Submits one application. Never errors: every problem, network included,
/// is a rejected outcome with a diagnostic.
#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    async fn submit_application(
        &self,
        job_id: JobId,
        candidate: &CandidateData,
    ) -> SubmissionOutcome;
}
