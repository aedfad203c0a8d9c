//! Per-run state every service carries.

use crate::config::{
    FIELD_USER, MSG_UNAUTHORIZED, STATUS_BAD_REQUEST, STATUS_OK, STATUS_UNAUTHORIZED,
    STATUS_UNPROCESSABLE,
};
use crate::errors::ServiceError;

use super::error_set::ErrorSet;

/// Error set, manual status code and result slot of one service run.
#[derive(Debug, Clone)]
pub struct ServiceState<T> {
    errors: ErrorSet,
    manual_status_code: Option<u16>,
    result: Option<T>,
}

impl<T> Default for ServiceState<T> {
    fn default() -> Self {
        Self {
            errors: ErrorSet::new(),
            manual_status_code: None,
            result: None,
        }
    }
}

impl<T> ServiceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Direct access for validation steps; prefer the `record_*` helpers
    /// from business logic, they also abort the boundary.
    pub fn errors_mut(&mut self) -> &mut ErrorSet {
        &mut self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn manual_status_code(&self) -> Option<u16> {
        self.manual_status_code
    }

    pub fn set_status_code(&mut self, code: u16) {
        self.manual_status_code = Some(code);
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn set_result(&mut self, result: T) {
        self.result = Some(result);
    }

    pub fn take_result(&mut self) -> Option<T> {
        self.result.take()
    }

    /// Derived status code: manual code, then 422 on errors, then 200 on a
    /// result, otherwise 400.
    pub fn status_code(&self) -> u16 {
        if let Some(code) = self.manual_status_code {
            return code;
        }
        if self.has_errors() {
            return STATUS_UNPROCESSABLE;
        }
        if self.result.is_some() {
            return STATUS_OK;
        }
        STATUS_BAD_REQUEST
    }

    /// Record a field error and return the rollback signal.
    ///
    /// ```ignore
    /// return Err(self.state_mut().record_field_error("name", "has already been taken"));
    /// ```
    pub fn record_field_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ServiceError {
        self.errors.add(field, message);
        ServiceError::Rollback
    }

    /// Same as [`record_field_error`](Self::record_field_error), also setting
    /// the manual status code. A code of 0 leaves it untouched.
    pub fn record_field_error_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: u16,
    ) -> ServiceError {
        if code != 0 {
            self.manual_status_code = Some(code);
        }
        self.record_field_error(field, message)
    }

    /// Copy every error of one or more child error sets and return the
    /// rollback signal.
    pub fn record_child_errors<'a>(&mut self, children: impl ErrorSources<'a>) -> ServiceError {
        for child in children.error_sets() {
            self.errors.merge(child);
        }
        ServiceError::Rollback
    }

    /// Record `user: Unauthorized`, set 401 and return the rollback signal.
    pub fn mark_unauthorized(&mut self) -> ServiceError {
        self.record_field_error_with_code(FIELD_USER, MSG_UNAUTHORIZED, STATUS_UNAUTHORIZED)
    }
}

/// One error set or a sequence of them.
pub trait ErrorSources<'a> {
    fn error_sets(self) -> Vec<&'a ErrorSet>;
}

impl<'a> ErrorSources<'a> for &'a ErrorSet {
    fn error_sets(self) -> Vec<&'a ErrorSet> {
        vec![self]
    }
}

impl<'a> ErrorSources<'a> for &'a [ErrorSet] {
    fn error_sets(self) -> Vec<&'a ErrorSet> {
        self.iter().collect()
    }
}

impl<'a> ErrorSources<'a> for &'a Vec<ErrorSet> {
    fn error_sets(self) -> Vec<&'a ErrorSet> {
        self.iter().collect()
    }
}

impl<'a> ErrorSources<'a> for Vec<&'a ErrorSet> {
    fn error_sets(self) -> Vec<&'a ErrorSet> {
        self
    }
}

impl<'a, const N: usize> ErrorSources<'a> for [&'a ErrorSet; N] {
    fn error_sets(self) -> Vec<&'a ErrorSet> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STATUS_INTERNAL_ERROR;

    fn child(field: &str, message: &str) -> ErrorSet {
        let mut errors = ErrorSet::new();
        errors.add(field, message);
        errors
    }

    #[test]
    fn test_status_defaults_to_bad_request() {
        let state: ServiceState<i32> = ServiceState::new();
        assert_eq!(state.status_code(), STATUS_BAD_REQUEST);
        assert!(!state.has_errors());
    }

    #[test]
    fn test_status_ok_with_result() {
        let mut state = ServiceState::new();
        state.set_result(42);
        assert_eq!(state.status_code(), STATUS_OK);
    }

    #[test]
    fn test_errors_win_over_result() {
        let mut state = ServiceState::new();
        state.set_result(42);
        state.errors_mut().add("name", "can't be blank");
        assert_eq!(state.status_code(), STATUS_UNPROCESSABLE);
    }

    #[test]
    fn test_manual_code_wins() {
        let mut state: ServiceState<i32> = ServiceState::new();
        state.set_status_code(STATUS_INTERNAL_ERROR);
        assert_eq!(state.status_code(), STATUS_INTERNAL_ERROR);

        state.errors_mut().add("name", "can't be blank");
        state.set_result(1);
        assert_eq!(state.status_code(), STATUS_INTERNAL_ERROR);
    }

    #[test]
    fn test_record_field_error_signals_rollback() {
        let mut state: ServiceState<()> = ServiceState::new();
        let signal = state.record_field_error("name", "has already been taken");

        assert!(matches!(signal, ServiceError::Rollback));
        assert_eq!(state.errors().get("name"), ["has already been taken"]);
        assert_eq!(state.manual_status_code(), None);
        assert_eq!(state.status_code(), STATUS_UNPROCESSABLE);
    }

    #[test]
    fn test_record_field_error_with_code() {
        let mut state: ServiceState<()> = ServiceState::new();
        let signal = state.record_field_error_with_code("account", "not found", 404);

        assert!(matches!(signal, ServiceError::Rollback));
        assert_eq!(state.status_code(), 404);
    }

    #[test]
    fn test_zero_code_is_no_override() {
        let mut state: ServiceState<()> = ServiceState::new();
        let _ = state.record_field_error_with_code("name", "is reserved", 0);
        assert_eq!(state.manual_status_code(), None);
        assert_eq!(state.status_code(), STATUS_UNPROCESSABLE);
    }

    #[test]
    fn test_mark_unauthorized() {
        let mut state: ServiceState<()> = ServiceState::new();
        let signal = state.mark_unauthorized();

        assert!(matches!(signal, ServiceError::Rollback));
        assert_eq!(state.errors().get(FIELD_USER), [MSG_UNAUTHORIZED]);
        assert_eq!(state.status_code(), STATUS_UNAUTHORIZED);
    }

    #[test]
    fn test_child_errors_single_and_sequence_match() {
        let set = child("name", "can't be blank");

        let mut single: ServiceState<()> = ServiceState::new();
        let _ = single.record_child_errors(&set);

        let mut sequence: ServiceState<()> = ServiceState::new();
        let _ = sequence.record_child_errors([&set]);

        assert_eq!(single.errors(), sequence.errors());
    }

    #[test]
    fn test_child_errors_flatten_many() {
        let sets = vec![child("name", "can't be blank"), child("name", "is too long")];

        let mut state: ServiceState<()> = ServiceState::new();
        let signal = state.record_child_errors(&sets);

        assert!(matches!(signal, ServiceError::Rollback));
        assert_eq!(state.errors().get("name"), ["can't be blank", "is too long"]);
        assert_eq!(state.status_code(), STATUS_UNPROCESSABLE);
    }
}
