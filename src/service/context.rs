//! Explicit context threaded through a service run.

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::errors::{ServiceResult, UnexpectedFailure};
use crate::jobs::{JobBuffer, JobRequest};

use super::base::Service;
use super::executor::{drive, Disposition};

/// Handles a service needs while it runs: the active transaction, the
/// run's span and the buffer of jobs to dispatch after commit.
pub struct ServiceContext<'a> {
    txn: &'a DatabaseTransaction,
    jobs: &'a JobBuffer,
    span: Span,
}

impl<'a> ServiceContext<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction, jobs: &'a JobBuffer, span: Span) -> Self {
        Self { txn, jobs, span }
    }

    /// The active transaction; every statement run through it is part of
    /// this run's boundary.
    pub fn db(&self) -> &'a DatabaseTransaction {
        self.txn
    }

    /// Span of the current run
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Queue a background job. It is dispatched only if the outermost
    /// boundary commits.
    pub fn enqueue_job(
        &self,
        kind: impl Into<String>,
        params: impl Serialize,
        initiated_by: Option<Uuid>,
    ) -> ServiceResult<Uuid> {
        let job = JobRequest::new(kind, serde_json::to_value(params)?, initiated_by);
        let id = job.id;

        tracing::debug!(parent: &self.span, job_id = %id, kind = %job.kind, "Job buffered");
        self.jobs.push(job);
        Ok(id)
    }

    /// Number of jobs waiting for commit
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Run a nested service inside the current transaction.
    ///
    /// The child joins this boundary: a handled abort inside the child does
    /// not roll anything back on its own, the caller decides (typically with
    /// `record_child_errors`). An unexpected failure comes back as `Err` and
    /// can be propagated with `?`.
    pub async fn execute<C: Service>(&self, args: C::Args) -> Result<C, UnexpectedFailure<C>> {
        let mut child = C::build(args);
        let span = tracing::info_span!(parent: &self.span, "service", name = C::NAME);
        let ctx = ServiceContext {
            span: span.clone(),
            ..*self
        };

        match drive(&mut child, &ctx).instrument(span).await {
            Disposition::Commit | Disposition::Rollback => Ok(child),
            Disposition::Fault(error) => Err(UnexpectedFailure::new(error, child)),
        }
    }
}
