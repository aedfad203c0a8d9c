//! Job queue seam and in-process implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ServiceResult;

#[cfg(test)]
use mockall::automock;

/// A background job requested by a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: Uuid,
    /// Job kind, e.g. `account.welcome`
    pub kind: String,
    pub params: Value,
    /// User whose action triggered the job
    #[serde(default)]
    pub initiated_by: Option<Uuid>,
    pub enqueued_at: DateTime<Utc>,
}

impl JobRequest {
    pub fn new(kind: impl Into<String>, params: Value, initiated_by: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            params,
            initiated_by,
            enqueued_at: Utc::now(),
        }
    }
}

/// Where committed jobs are dispatched to.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: JobRequest) -> ServiceResult<()>;
}

/// Keeps dispatched jobs in memory.
#[derive(Debug, Default)]
pub struct MemoryJobQueue {
    jobs: Mutex<Vec<JobRequest>>,
}

impl MemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything dispatched so far
    pub fn jobs(&self) -> Vec<JobRequest> {
        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job: JobRequest) -> ServiceResult<()> {
        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(job);
        Ok(())
    }
}

/// Development queue: logs jobs instead of dispatching them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogJobQueue;

#[async_trait]
impl JobQueue for LogJobQueue {
    async fn enqueue(&self, job: JobRequest) -> ServiceResult<()> {
        tracing::warn!("No job backend configured - logging job instead of dispatching");
        tracing::info!(
            job_id = %job.id,
            kind = %job.kind,
            initiated_by = ?job.initiated_by,
            params = %job.params,
            "Job enqueued"
        );
        Ok(())
    }
}

/// Jobs requested during a run, held until the boundary commits.
#[derive(Debug, Default)]
pub struct JobBuffer {
    pending: Mutex<Vec<JobRequest>>,
}

impl JobBuffer {
    pub fn push(&self, job: JobRequest) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(job);
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_jobs(self) -> Vec<JobRequest> {
        self.pending
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_buffer_keeps_order() {
        let buffer = JobBuffer::default();
        buffer.push(JobRequest::new("a", json!({}), None));
        buffer.push(JobRequest::new("b", json!({}), None));

        assert_eq!(buffer.len(), 2);
        let kinds: Vec<_> = buffer.into_jobs().into_iter().map(|j| j.kind).collect();
        assert_eq!(kinds, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_memory_queue_records_jobs() {
        let queue = MemoryJobQueue::new();
        let user = Uuid::new_v4();
        queue
            .enqueue(JobRequest::new("account.welcome", json!({ "name": "ok" }), Some(user)))
            .await
            .unwrap();

        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].kind, "account.welcome");
        assert_eq!(jobs[0].initiated_by, Some(user));
        assert_eq!(jobs[0].params, json!({ "name": "ok" }));
    }

    #[test]
    fn test_job_request_serde() {
        let job = JobRequest::new("account.welcome", json!({ "id": 1 }), None);
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["kind"], "account.welcome");

        let back: JobRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, job);
    }
}
