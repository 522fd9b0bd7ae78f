//! Task status and priority vocabularies with validation helpers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Task has not been started.
pub const STATUS_TODO: &str = "todo";
/// Task is in progress.
pub const STATUS_DOING: &str = "doing";
/// Task is finished.
pub const STATUS_DONE: &str = "done";

/// All valid task statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_TODO, STATUS_DOING, STATUS_DONE];

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

/// Priorities are ordered: low < medium < high.
pub const PRIORITY_LOW: i16 = 1;
pub const PRIORITY_MEDIUM: i16 = 2;
pub const PRIORITY_HIGH: i16 = 3;

/// All valid priority levels.
pub const VALID_PRIORITIES: &[i16] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known workflow states.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown task status: '{status}'. Valid statuses: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate that a priority value is one of the known levels.
pub fn validate_priority(priority: i16) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown task priority: {priority}. Valid priorities: 1 (low), 2 (medium), 3 (high)"
        )))
    }
}
