//! Centralized error handling.
//!
//! `ServiceError` is what a service's lifecycle steps return. The executor
//! recovers `Rollback` and `RecordInvalid` locally; everything else is an
//! unexpected failure that is annotated on the instance and then handed back
//! to the caller as an [`UnexpectedFailure`].

use std::fmt;

use thiserror::Error;

use crate::service::{ErrorSet, Service};

/// Service error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Roll back the boundary without treating the run as failed
    #[error("Service run rolled back")]
    Rollback,

    /// A nested record failed its own validation rules
    #[error("Validation failed: {}", .0.to_sentence())]
    RecordInvalid(ErrorSet),

    /// The argument bag could not be turned into typed arguments
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Job dispatch failed: {0}")]
    Job(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::RecordInvalid(ErrorSet::from(errors))
    }
}

/// Convenience constructors
impl ServiceError {
    pub fn arguments(msg: impl Into<String>) -> Self {
        ServiceError::Arguments(msg.into())
    }

    pub fn job(msg: impl Into<String>) -> Self {
        ServiceError::Job(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ServiceError::Internal(msg.into())
    }
}

/// Result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// An unexpected failure raised during a run.
///
/// The boundary has already been rolled back. The instance is kept so that
/// callers (and tests) can still inspect the sanitized annotation it carries;
/// the original error is available through [`std::error::Error::source`].
pub struct UnexpectedFailure<S> {
    error: ServiceError,
    service: S,
}

impl<S: Service> UnexpectedFailure<S> {
    pub(crate) fn new(error: ServiceError, service: S) -> Self {
        Self { error, service }
    }

    /// The original error
    pub fn error(&self) -> &ServiceError {
        &self.error
    }

    /// The annotated instance
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Split into the original error and the annotated instance
    pub fn into_parts(self) -> (ServiceError, S) {
        (self.error, self.service)
    }
}

impl<S: Service> fmt::Debug for UnexpectedFailure<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnexpectedFailure")
            .field("service", &S::NAME)
            .field("error", &self.error)
            .finish()
    }
}

impl<S: Service> fmt::Display for UnexpectedFailure<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", S::NAME, self.error)
    }
}

impl<S: Service> std::error::Error for UnexpectedFailure<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Lets a parent service propagate a nested service's failure with `?`.
impl<S: Service> From<UnexpectedFailure<S>> for ServiceError {
    fn from(failure: UnexpectedFailure<S>) -> Self {
        failure.error
    }
}
