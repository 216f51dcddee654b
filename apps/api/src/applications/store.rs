//! Status store: application id → latest `ApplicationRecord`.
//!
//! The engine talks to `dyn StatusStore` only, so a durable backend can replace
//! `InMemoryStatusStore` without touching the engine or the handlers.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{ApplicationRecord, ApplicationStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("application {0} already exists")]
    Duplicate(Uuid),

    #[error("application {0} does not exist")]
    Missing(Uuid),

    #[error("application {0} is terminal and cannot be modified")]
    Frozen(Uuid),
}

/// Per-status record counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

impl StatusSummary {
    pub fn count(&mut self, status: ApplicationStatus) {
        self.total += 1;
        match status {
            ApplicationStatus::Pending => self.pending += 1,
            ApplicationStatus::InProgress => self.in_progress += 1,
            ApplicationStatus::Completed => self.completed += 1,
            ApplicationStatus::Failed => self.failed += 1,
        }
    }
}

#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Stores a newly accepted record. Ids are never reused.
    async fn insert(&self, record: ApplicationRecord) -> Result<(), StoreError>;

    /// Replaces the stored record. Refused once the stored copy is terminal.
    async fn update(&self, record: &ApplicationRecord) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError>;

    async fn summary(&self) -> Result<StatusSummary, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStatusStore {
    records: DashMap<Uuid, ApplicationRecord>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn insert(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        match self.records.entry(record.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(record.id)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn update(&self, record: &ApplicationRecord) -> Result<(), StoreError> {
        let mut stored = self
            .records
            .get_mut(&record.id)
            .ok_or(StoreError::Missing(record.id))?;
        if stored.status.is_terminal() {
            return Err(StoreError::Frozen(record.id));
        }
        *stored = record.clone();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn summary(&self) -> Result<StatusSummary, StoreError> {
        let mut summary = StatusSummary::default();
        for record in self.records.iter() {
            summary.count(record.status);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::job::JobId;

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = InMemoryStatusStore::new();
        let record = ApplicationRecord::new(JobId(3));
        store.insert(record.clone()).await.unwrap();

        let fetched = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = InMemoryStatusStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = InMemoryStatusStore::new();
        let record = ApplicationRecord::new(JobId(3));
        store.insert(record.clone()).await.unwrap();
        assert_eq!(
            store.insert(record.clone()).await,
            Err(StoreError::Duplicate(record.id))
        );
    }

    #[tokio::test]
    async fn test_update_missing_rejected() {
        let store = InMemoryStatusStore::new();
        let record = ApplicationRecord::new(JobId(3));
        assert_eq!(
            store.update(&record).await,
            Err(StoreError::Missing(record.id))
        );
    }

    #[tokio::test]
    async fn test_terminal_record_frozen_in_store() {
        let store = InMemoryStatusStore::new();
        let mut record = ApplicationRecord::new(JobId(3));
        store.insert(record.clone()).await.unwrap();

        record.start().unwrap();
        record.complete().unwrap();
        store.update(&record).await.unwrap();

        let mut tampered = record.clone();
        tampered.logs.push("rewritten".to_string());
        tampered.status = ApplicationStatus::Failed;
        assert_eq!(
            store.update(&tampered).await,
            Err(StoreError::Frozen(record.id))
        );
        assert_eq!(store.get(record.id).await.unwrap().unwrap(), record);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_do_not_conflate() {
        let store = Arc::new(InMemoryStatusStore::new());
        let mut handles = Vec::new();
        for i in 0..64u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                // Job ids repeat; every acceptance still gets its own record.
                let record = ApplicationRecord::new(JobId(i % 8));
                store.insert(record.clone()).await.unwrap();
                record
            }));
        }

        let mut records = Vec::new();
        for h in handles {
            records.push(h.await.unwrap());
        }

        assert_eq!(store.summary().await.unwrap().total, 64);
        for record in records {
            let fetched = store.get(record.id).await.unwrap().unwrap();
            assert_eq!(fetched.job_id, record.job_id);
        }
    }

    #[tokio::test]
    async fn test_summary_counts_by_status() {
        let store = InMemoryStatusStore::new();

        store.insert(ApplicationRecord::new(JobId(1))).await.unwrap();

        let mut running = ApplicationRecord::new(JobId(2));
        store.insert(running.clone()).await.unwrap();
        running.start().unwrap();
        store.update(&running).await.unwrap();

        let mut failed = ApplicationRecord::new(JobId(3));
        store.insert(failed.clone()).await.unwrap();
        failed.fail(None).unwrap();
        store.update(&failed).await.unwrap();

        let summary = store.summary().await.unwrap();
        assert_eq!(
            summary,
            StatusSummary {
                total: 3,
                pending: 1,
                in_progress: 1,
                completed: 0,
                failed: 1,
            }
        );
    }
}
