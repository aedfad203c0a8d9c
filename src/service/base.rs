//! The capability interface every concrete service implements.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ServiceError, ServiceResult};
use crate::presenter::{self, PresentOptions, Presentable};

use super::context::ServiceContext;
use super::error_set::ErrorSet;
use super::state::{ErrorSources, ServiceState};

/// A discrete business operation run by the [`Executor`](super::Executor).
///
/// Implementors hold their typed arguments plus a [`ServiceState`]. The
/// executor drives the lifecycle: `build`, `before_validation`, `validate`
/// and, when valid, `execute` inside one transaction.
///
/// Returning `Err(ServiceError::Rollback)` (usually through one of the
/// `record_*` helpers) rolls the transaction back and still hands the
/// instance back to the caller. Any other error is an unexpected failure.
#[async_trait]
pub trait Service: Send + Sized + 'static {
    /// Name used in logs and spans
    const NAME: &'static str;

    type Args: Send;
    type Output: Send + 'static;

    /// Factory used by the executor to build an instance
    fn build(args: Self::Args) -> Self;

    fn state(&self) -> &ServiceState<Self::Output>;

    fn state_mut(&mut self) -> &mut ServiceState<Self::Output>;

    /// Runs inside the transaction, before validation.
    ///
    /// Errors returned here are classified like those from `execute`: a
    /// `Rollback` or `RecordInvalid` is handled and the instance comes back
    /// as `Ok`, anything else is an unexpected failure. Errors added to the
    /// state without returning `Err` make the run invalid.
    async fn before_validation(&mut self, _ctx: &ServiceContext<'_>) -> ServiceResult<()> {
        Ok(())
    }

    /// Argument validation; errors are merged into the instance
    fn validate(&self) -> Result<(), ErrorSet> {
        Ok(())
    }

    /// Business logic. Only called when validation passed.
    async fn execute(&mut self, ctx: &ServiceContext<'_>) -> ServiceResult<()>;

    fn errors(&self) -> &ErrorSet {
        self.state().errors()
    }

    fn has_errors(&self) -> bool {
        self.state().has_errors()
    }

    fn status_code(&self) -> u16 {
        self.state().status_code()
    }

    fn result(&self) -> Option<&Self::Output> {
        self.state().result()
    }

    fn record_field_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ServiceError {
        self.state_mut().record_field_error(field, message)
    }

    fn record_field_error_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: u16,
    ) -> ServiceError {
        self.state_mut()
            .record_field_error_with_code(field, message, code)
    }

    fn record_child_errors<'a>(&mut self, children: impl ErrorSources<'a>) -> ServiceError {
        self.state_mut().record_child_errors(children)
    }

    fn mark_unauthorized(&mut self) -> ServiceError {
        self.state_mut().mark_unauthorized()
    }

    fn present<T: Presentable + ?Sized>(
        &self,
        object: &T,
        method: Option<&str>,
        options: &PresentOptions,
    ) -> ServiceResult<Value> {
        presenter::present(object, method, options)
    }
}
