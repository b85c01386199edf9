//! Domain-level constants.
//!
//! User-facing messages shared by the stores and the HTTP layer.

// =============================================================================
// Tasks
// =============================================================================

/// Reported when a task id does not resolve
pub const MSG_TASK_NOT_FOUND: &str = "task not found";

/// Reported when a task title is missing or blank
pub const MSG_INVALID_TITLE: &str = "invalid title";

/// Reported when the `done` flag is missing or not a boolean
pub const MSG_DONE_NOT_BOOLEAN: &str = "done must be boolean";

// =============================================================================
// Users
// =============================================================================

pub const MSG_NAME_REQUIRED: &str = "name is required";

pub const MSG_EMAIL_REQUIRED: &str = "email is required";

pub const MSG_AGE_NOT_POSITIVE: &str = "age must be positive";
