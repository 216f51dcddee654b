//! Application record and its lifecycle.
//!
//! `pending → in_progress → completed | failed`. Terminal records are frozen:
//! every mutator returns `TransitionError` once `status.is_terminal()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("application {id}: cannot {action} while {from}")]
pub struct TransitionError {
    pub id: Uuid,
    pub from: &'static str,
    pub action: &'static str,
}

/// The logical steps of one submission, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStep {
    OpenPosting,
    LocateApplyControl,
    FillForm,
    Submit,
}

impl SubmissionStep {
    pub const ORDER: [SubmissionStep; 4] = [
        SubmissionStep::OpenPosting,
        SubmissionStep::LocateApplyControl,
        SubmissionStep::FillForm,
        SubmissionStep::Submit,
    ];

    pub fn log_line(self) -> &'static str {
        match self {
            Self::OpenPosting => "Opening job posting...",
            Self::LocateApplyControl => "Locating apply button...",
            Self::FillForm => "Filling application form...",
            Self::Submit => "Submitting application...",
        }
    }
}

pub const COMPLETED_LOG: &str = "Application completed successfully!";
pub const FAILED_LOG: &str = "Error: Application failed.";

/// Tracked state of one submission attempt.
///
/// `timestamp` is the time of the most recent transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub logs: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ApplicationRecord {
    /// A freshly accepted application. The queue entry keeps `logs` non-empty
    /// from the first observable moment.
    pub fn new(job_id: JobId) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            status: ApplicationStatus::Pending,
            logs: vec![format!("Application queued for job {job_id}")],
            timestamp: Utc::now(),
        }
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        if self.status != ApplicationStatus::Pending {
            return Err(self.refuse("start"));
        }
        self.status = ApplicationStatus::InProgress;
        self.timestamp = Utc::now();
        Ok(())
    }

    /// Appends one progress entry. Only legal while in progress.
    pub fn log(&mut self, entry: impl Into<String>) -> Result<(), TransitionError> {
        if self.status != ApplicationStatus::InProgress {
            return Err(self.refuse("log"));
        }
        self.logs.push(entry.into());
        self.timestamp = Utc::now();
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), TransitionError> {
        if self.status != ApplicationStatus::InProgress {
            return Err(self.refuse("complete"));
        }
        self.logs.push(COMPLETED_LOG.to_string());
        self.status = ApplicationStatus::Completed;
        self.timestamp = Utc::now();
        Ok(())
    }

    /// Fails a pending or in-progress record, appending the failure entry.
    pub fn fail(&mut self, diagnostic: Option<&str>) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(self.refuse("fail"));
        }
        let entry = match diagnostic.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => format!("{FAILED_LOG} {d}"),
            None => FAILED_LOG.to_string(),
        };
        self.logs.push(entry);
        self.status = ApplicationStatus::Failed;
        self.timestamp = Utc::now();
        Ok(())
    }

    fn refuse(&self, action: &'static str) -> TransitionError {
        TransitionError {
            id: self.id,
            from: self.status.as_str(),
            action,
        }
    }
}
