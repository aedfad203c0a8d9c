//! Dispatch through an `apalis` storage backend.

use apalis::prelude::Storage;
use async_trait::async_trait;

use crate::errors::{ServiceError, ServiceResult};

use super::queue::{JobQueue, JobRequest};

/// Pushes committed jobs onto any apalis storage (Postgres, Redis, ...).
#[derive(Clone)]
pub struct ApalisJobQueue<S> {
    storage: S,
}

impl<S> ApalisJobQueue<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S> JobQueue for ApalisJobQueue<S>
where
    S: Storage<Job = JobRequest> + Clone + Send + Sync + 'static,
    S::Error: std::fmt::Display,
{
    async fn enqueue(&self, job: JobRequest) -> ServiceResult<()> {
        let (id, kind) = (job.id, job.kind.clone());
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| ServiceError::job(e.to_string()))?;

        tracing::info!(job_id = %id, kind = %kind, "Job pushed to storage");
        Ok(())
    }
}
