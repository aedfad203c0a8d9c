//! Application-wide constants
//!
//! Centralized location for status codes, reserved error fields and
//! fixed messages used by the service lifecycle.

// =============================================================================
// Status codes
// =============================================================================

/// A run that produced a result without errors
pub const STATUS_OK: u16 = 200;

/// Fallback when a run produced neither a result nor errors
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Set by `mark_unauthorized`
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Used by services for a missing target record
pub const STATUS_NOT_FOUND: u16 = 404;

/// Derived whenever the error set is non-empty
pub const STATUS_UNPROCESSABLE: u16 = 422;

/// Set when an unexpected failure is classified
pub const STATUS_INTERNAL_ERROR: u16 = 500;

// =============================================================================
// Reserved error fields and messages
// =============================================================================

/// Field used by `mark_unauthorized`
pub const FIELD_USER: &str = "user";

/// Field carrying a nested record's validation failure
pub const FIELD_VALIDATION: &str = "validation";

/// Field used when validation fails without naming a field
pub const FIELD_BASE: &str = "base";

/// Field carrying the sanitized unexpected-failure message
pub const FIELD_EXCEPTION: &str = "exception";

/// Message recorded by `mark_unauthorized`
pub const MSG_UNAUTHORIZED: &str = "Unauthorized";

/// Sanitized message exposed for unexpected failures
pub const MSG_EXCEPTION: &str = "An error occurred";

/// Message used when a validation rule carries no message of its own
pub const MSG_INVALID: &str = "is invalid";

/// Recorded under `validation` when a nested record fails without detail
pub const MSG_RECORD_INVALID: &str = "Record is invalid";

// =============================================================================
// Database
// =============================================================================

/// Default database URL (file-backed SQLite, created on first use)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://service_kit.db?mode=rwc";

/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Background Jobs
// =============================================================================

/// Job kind enqueued after an account is created
pub const JOB_KIND_ACCOUNT_WELCOME: &str = "account.welcome";
