//! Service executor - drives the lifecycle of a run.
//!
//! ```text
//! Constructed -> Validating -> Invalid                (commit, instance returned)
//!                           -> Executing -> Committed         (instance returned)
//!                                        -> AbortedHandled    (rollback, instance returned)
//!                                        -> AbortedUnexpected (rollback, error returned)
//! ```

use std::sync::Arc;

use tracing::{Instrument, Span};

use crate::config::{
    FIELD_BASE, FIELD_EXCEPTION, FIELD_VALIDATION, MSG_EXCEPTION, MSG_INVALID,
    MSG_RECORD_INVALID, STATUS_INTERNAL_ERROR, STATUS_UNPROCESSABLE,
};
use crate::errors::{ServiceError, UnexpectedFailure};
use crate::infra::Persistence;
use crate::jobs::{JobBuffer, JobQueue};

use super::base::Service;
use super::context::ServiceContext;

/// How the boundary around a run must be closed.
#[derive(Debug)]
pub(crate) enum Disposition {
    Commit,
    Rollback,
    Fault(ServiceError),
}

/// Entry point for running services.
#[derive(Clone)]
pub struct Executor {
    persistence: Persistence,
    jobs: Arc<dyn JobQueue>,
}

impl Executor {
    pub fn new(persistence: Persistence, jobs: Arc<dyn JobQueue>) -> Self {
        Self { persistence, jobs }
    }

    /// Build a service from `args` and run it in its own transaction.
    ///
    /// Validation failures and handled aborts come back as `Ok` with the
    /// errors on the instance. Anything else is rolled back and returned as
    /// [`UnexpectedFailure`], carrying the sanitized instance.
    pub async fn execute<S: Service>(&self, args: S::Args) -> Result<S, UnexpectedFailure<S>> {
        let service = S::build(args);
        let span = tracing::info_span!("service", name = S::NAME);
        self.run(service).instrument(span).await
    }

    async fn run<S: Service>(&self, mut service: S) -> Result<S, UnexpectedFailure<S>> {
        let txn = match self.persistence.begin().await {
            Ok(txn) => txn,
            Err(error) => {
                record_fault(&mut service, &error);
                return Err(UnexpectedFailure::new(error, service));
            }
        };

        let jobs = JobBuffer::default();
        let disposition = {
            let ctx = ServiceContext::new(&txn, &jobs, Span::current());
            drive(&mut service, &ctx).await
        };

        match disposition {
            Disposition::Commit => {
                if let Err(error) = self.persistence.commit(txn).await {
                    record_fault(&mut service, &error);
                    return Err(UnexpectedFailure::new(error, service));
                }
                self.dispatch(jobs).await;
                tracing::debug!(status = service.status_code(), "Service committed");
                Ok(service)
            }
            Disposition::Rollback => {
                self.persistence.rollback(txn).await;
                tracing::debug!(status = service.status_code(), "Service rolled back");
                Ok(service)
            }
            Disposition::Fault(error) => {
                self.persistence.rollback(txn).await;
                Err(UnexpectedFailure::new(error, service))
            }
        }
    }

    /// Hand buffered jobs to the queue once the boundary has committed.
    async fn dispatch(&self, jobs: JobBuffer) {
        for job in jobs.into_jobs() {
            let (id, kind) = (job.id, job.kind.clone());
            if let Err(e) = self.jobs.enqueue(job).await {
                tracing::error!(job_id = %id, kind = %kind, "Job dispatch failed: {}", e);
            }
        }
    }
}

/// Run the hook, validation and business logic of one service, without
/// touching the boundary itself.
pub(crate) async fn drive<S: Service>(service: &mut S, ctx: &ServiceContext<'_>) -> Disposition {
    if let Err(error) = service.before_validation(ctx).await {
        return classify(service, error);
    }

    let rejected = match service.validate() {
        Ok(()) => false,
        Err(errors) => {
            let state = service.state_mut();
            if errors.is_empty() {
                state.errors_mut().add(FIELD_BASE, MSG_INVALID);
            } else {
                state.errors_mut().merge(&errors);
            }
            true
        }
    };
    if rejected || service.has_errors() {
        // Invalid runs still close the boundary with a commit.
        tracing::debug!(errors = %service.errors().to_sentence(), "Service invalid");
        return Disposition::Commit;
    }

    match service.execute(ctx).await {
        Ok(()) => Disposition::Commit,
        Err(error) => classify(service, error),
    }
}

fn classify<S: Service>(service: &mut S, error: ServiceError) -> Disposition {
    match error {
        ServiceError::Rollback => Disposition::Rollback,
        ServiceError::RecordInvalid(nested) => {
            // Own errors take priority; the nested detail is dropped then.
            let state = service.state_mut();
            if !state.has_errors() {
                let message = if nested.is_empty() {
                    MSG_RECORD_INVALID.to_string()
                } else {
                    nested.to_sentence()
                };
                state.errors_mut().add(FIELD_VALIDATION, message);
                state.set_status_code(STATUS_UNPROCESSABLE);
            }
            Disposition::Rollback
        }
        error => {
            record_fault(service, &error);
            Disposition::Fault(error)
        }
    }
}

/// Log an unexpected failure in full (message, debug form and the whole
/// `source()` chain) and annotate the instance with the sanitized message.
fn record_fault<S: Service>(service: &mut S, error: &ServiceError) {
    let causes = source_chain(error);

    tracing::debug!(
        service = S::NAME,
        error = %error,
        details = ?error,
        causes = ?causes,
        "Unexpected service failure"
    );

    let state = service.state_mut();
    if !state.has_errors() {
        state.errors_mut().add(FIELD_EXCEPTION, MSG_EXCEPTION);
        state.set_status_code(STATUS_INTERNAL_ERROR);
    }
}

/// Messages of every error below `error` in its `source()` chain.
fn source_chain(error: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sea_orm::{ConnectOptions, Database as SeaDatabase};
    use serde_json::json;

    use crate::errors::ServiceResult;
    use crate::jobs::MockJobQueue;
    use crate::service::ServiceState;

    /// Buffers one job, then commits or rolls back
    struct Notify {
        rollback: bool,
        state: ServiceState<()>,
    }

    #[async_trait]
    impl Service for Notify {
        const NAME: &'static str = "notify";

        type Args = bool;
        type Output = ();

        fn build(rollback: bool) -> Self {
            Self {
                rollback,
                state: ServiceState::new(),
            }
        }

        fn state(&self) -> &ServiceState<()> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ServiceState<()> {
            &mut self.state
        }

        async fn execute(&mut self, ctx: &ServiceContext<'_>) -> ServiceResult<()> {
            ctx.enqueue_job("notify", json!({ "hello": "world" }), None)?;
            assert_eq!(ctx.pending_jobs(), 1);
            if self.rollback {
                return Err(ServiceError::Rollback);
            }
            self.state.set_result(());
            Ok(())
        }
    }

    async fn executor(queue: MockJobQueue) -> Executor {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = SeaDatabase::connect(options).await.unwrap();
        Executor::new(Persistence::new(db), Arc::new(queue))
    }

    #[test]
    fn test_source_chain_reaches_origin() {
        let db_error = ServiceError::Database(sea_orm::DbErr::Custom("disk I/O error".into()));
        let failure = UnexpectedFailure::new(db_error, Notify::build(false));

        let causes = source_chain(&failure);
        assert_eq!(causes.len(), 2);
        assert!(causes[0].starts_with("Database error"));
        assert!(causes[1].contains("disk I/O error"));

        assert!(source_chain(&ServiceError::internal("boom")).is_empty());
    }

    #[tokio::test]
    async fn test_jobs_dispatched_after_commit() {
        let mut queue = MockJobQueue::new();
        queue
            .expect_enqueue()
            .withf(|job| job.kind == "notify" && job.params == json!({ "hello": "world" }))
            .times(1)
            .returning(|_| Ok(()));

        let service = executor(queue).await.execute::<Notify>(false).await.unwrap();
        assert_eq!(service.status_code(), 200);
    }

    #[tokio::test]
    async fn test_jobs_discarded_on_rollback() {
        let mut queue = MockJobQueue::new();
        queue.expect_enqueue().never();

        let service = executor(queue).await.execute::<Notify>(true).await.unwrap();
        assert_eq!(service.status_code(), 400);
        assert!(!service.has_errors());
    }

    #[tokio::test]
    async fn test_dispatch_failure_keeps_outcome() {
        let mut queue = MockJobQueue::new();
        queue
            .expect_enqueue()
            .times(1)
            .returning(|_| Err(ServiceError::job("queue unavailable")));

        let service = executor(queue).await.execute::<Notify>(false).await.unwrap();
        assert_eq!(service.status_code(), 200);
    }
}
