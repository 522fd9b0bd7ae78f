//! Date-range validation shared by projects, fundings, tasks, and links.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Validate that `start <= end` when both dates are present.
///
/// `what` names the field pair in the error message, e.g. `"start_date"`
/// for a project or `"allocation_start"` for a link.
pub fn validate_date_range(
    what: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(format!(
                "{what}: start date {start} is after end date {end}"
            )));
        }
    }
    Ok(())
}
