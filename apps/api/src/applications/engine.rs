//! Application Engine: drives each application through its lifecycle and
//! aggregates batches.
//!
//! Per application: accept (pending) → start (in_progress) → one log entry per
//! `SubmissionStep` → submitter outcome → completed | failed. Every transition
//! is written through to the `StatusStore` so status lookups see progress.
//!
//! Batches run on a bounded pool (`futures::StreamExt::buffered`), which keeps
//! results in request order. Each worker owns its record by value until it is
//! terminal; when the shared deadline passes, the worker is dropped and the
//! engine fails whatever state the store last saw.
//!
//! Every call runs on its own spawned task. The caller only awaits the handle,
//! so a dropped request never strands records short of a terminal status.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::applications::store::{StatusStore, StatusSummary, StoreError};
use crate::models::application::{
    ApplicationRecord, ApplicationStatus, SubmissionStep, TransitionError,
};
use crate::models::job::{CandidateData, JobId};
use crate::platform::ApplicationSubmitter;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("application {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("application worker aborted: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Outcome counts for one batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        let count = |s: ApplicationStatus| records.iter().filter(|r| r.status == s).count();
        Self {
            total: records.len(),
            completed: count(ApplicationStatus::Completed),
            failed: count(ApplicationStatus::Failed),
        }
    }
}

#[derive(Clone)]
pub struct ApplicationEngine {
    store: Arc<dyn StatusStore>,
    submitter: Arc<dyn ApplicationSubmitter>,
    concurrency: usize,
    timeout: Duration,
}

impl ApplicationEngine {
    pub fn new(
        store: Arc<dyn StatusStore>,
        submitter: Arc<dyn ApplicationSubmitter>,
        concurrency: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            submitter,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Applies to one job. A refused submission is a `failed` record, not an error.
    pub async fn apply_one(
        &self,
        job_id: JobId,
        candidate: &CandidateData,
    ) -> Result<ApplicationRecord, EngineError> {
        let engine = self.clone();
        let candidate = candidate.clone();
        tokio::spawn(async move {
            let deadline = Instant::now() + engine.timeout;
            let record = engine.accept(job_id).await?;
            engine.run_until(record, &candidate, deadline).await
        })
        .await?
    }

    /// Applies to every job in `job_ids`, returning one record per id in input order.
    pub async fn apply_batch(
        &self,
        job_ids: &[JobId],
        candidate: &CandidateData,
    ) -> Result<Vec<ApplicationRecord>, EngineError> {
        let engine = self.clone();
        let job_ids = job_ids.to_vec();
        let candidate = candidate.clone();
        tokio::spawn(async move { engine.run_batch(&job_ids, &candidate).await }).await?
    }

    pub async fn get_status(&self, id: Uuid) -> Result<ApplicationRecord, EngineError> {
        self.store.get(id).await?.ok_or(EngineError::NotFound(id))
    }

    pub async fn summary(&self) -> Result<StatusSummary, EngineError> {
        Ok(self.store.summary().await?)
    }

    async fn run_batch(
        &self,
        job_ids: &[JobId],
        candidate: &CandidateData,
    ) -> Result<Vec<ApplicationRecord>, EngineError> {
        let deadline = Instant::now() + self.timeout;

        let mut accepted = Vec::with_capacity(job_ids.len());
        for &job_id in job_ids {
            accepted.push(self.accept(job_id).await?);
        }

        info!(
            batch_size = job_ids.len(),
            concurrency = self.concurrency,
            "Starting batch application"
        );

        let results: Vec<Result<ApplicationRecord, EngineError>> = stream::iter(accepted)
            .map(|record| self.run_until(record, candidate, deadline))
            .buffered(self.concurrency)
            .collect()
            .await;

        let records = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let summary = BatchSummary::from_records(&records);
        info!(
            total = summary.total,
            completed = summary.completed,
            failed = summary.failed,
            "Batch application finished"
        );
        Ok(records)
    }

    async fn accept(&self, job_id: JobId) -> Result<ApplicationRecord, EngineError> {
        let record = ApplicationRecord::new(job_id);
        self.store.insert(record.clone()).await?;
        debug!(application_id = %record.id, %job_id, "Application accepted");
        Ok(record)
    }

    async fn run_until(
        &self,
        record: ApplicationRecord,
        candidate: &CandidateData,
        deadline: Instant,
    ) -> Result<ApplicationRecord, EngineError> {
        let id = record.id;
        if Instant::now() >= deadline {
            return self.expire(id).await;
        }
        match timeout_at(deadline, self.drive(record, candidate)).await {
            Ok(result) => result,
            Err(_) => self.expire(id).await,
        }
    }

    /// Walks one record from pending to a terminal status.
    async fn drive(
        &self,
        mut record: ApplicationRecord,
        candidate: &CandidateData,
    ) -> Result<ApplicationRecord, EngineError> {
        record.start()?;
        self.store.update(&record).await?;

        for step in SubmissionStep::ORDER {
            record.log(step.log_line())?;
            self.store.update(&record).await?;
        }

        let outcome = self
            .submitter
            .submit_application(record.job_id, candidate)
            .await;

        if outcome.success {
            record.complete()?;
        } else {
            record.fail(outcome.diagnostic.as_deref())?;
        }
        self.store.update(&record).await?;

        info!(
            application_id = %record.id,
            job_id = %record.job_id,
            status = record.status.as_str(),
            "Application finished"
        );
        Ok(record)
    }

    /// Fails a record whose worker missed the deadline. Already-terminal records
    /// are returned as stored.
    async fn expire(&self, id: Uuid) -> Result<ApplicationRecord, EngineError> {
        let mut record = self.store.get(id).await?.ok_or(EngineError::NotFound(id))?;
        if record.status.is_terminal() {
            return Ok(record);
        }

        warn!(
            application_id = %id,
            job_id = %record.job_id,
            status = record.status.as_str(),
            "Application timed out"
        );
        let diagnostic = format!("Timed out after {}s.", self.timeout.as_secs());
        record.fail(Some(&diagnostic))?;
        self.store.update(&record).await?;
        Ok(record)
    }
}
