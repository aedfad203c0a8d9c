//! Caller-facing response built from a finished service run.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::UnexpectedFailure;
use crate::service::{ErrorSet, Service};

/// `{ status, result, errors }` body returned to callers
#[derive(Debug, Serialize)]
pub struct ServiceResponse<T: Serialize> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "ErrorSet::is_empty")]
    pub errors: ErrorSet,
}

impl<T: Serialize> ServiceResponse<T> {
    /// Consume a finished service
    pub fn from_service<S>(mut service: S) -> Self
    where
        S: Service<Output = T>,
    {
        Self {
            status: service.status_code(),
            errors: service.errors().clone(),
            result: service.state_mut().take_result(),
        }
    }

    /// HTTP status for the derived code
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}

/// Turn an executor outcome into a response.
///
/// An unexpected failure is reported here at error level; the body only
/// ever carries the sanitized annotation.
pub fn respond<S>(outcome: Result<S, UnexpectedFailure<S>>) -> Response
where
    S: Service,
    S::Output: Serialize,
{
    match outcome {
        Ok(service) => ServiceResponse::from_service(service).into_response(),
        Err(failure) => {
            tracing::error!(error = %failure, "Service failed unexpectedly");
            let (_, service) = failure.into_parts();
            ServiceResponse::from_service(service).into_response()
        }
    }
}
