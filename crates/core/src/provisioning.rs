//! Date arithmetic for template provisioning.
//!
//! When a funding is linked to a project, each template may carry a
//! relative `default_due_days` offset. The offset is resolved against a
//! base date chosen from the link and its endpoints at provisioning time.

use chrono::{Days, NaiveDate};

/// Resolve the base date for due-date offsets.
///
/// Fallback chain: link allocation start, then project start, then
/// funding start, then `today`.
pub fn resolve_base_date(
    allocation_start: Option<NaiveDate>,
    project_start: Option<NaiveDate>,
    funding_start: Option<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    allocation_start
        .or(project_start)
        .or(funding_start)
        .unwrap_or(today)
}

/// Compute a due date from a base date and an optional day offset.
///
/// Returns `None` when the template has no offset. Negative offsets are
/// allowed (deadlines before the base date, e.g. pre-award paperwork).
pub fn due_date(base: NaiveDate, offset_days: Option<i32>) -> Option<NaiveDate> {
    let offset = offset_days?;
    if offset >= 0 {
        base.checked_add_days(Days::new(offset as u64))
    } else {
        base.checked_sub_days(Days::new(offset.unsigned_abs() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn allocation_start_wins() {
        let base = resolve_base_date(
            Some(d("2025-03-01")),
            Some(d("2025-01-01")),
            Some(d("2024-12-01")),
            d("2025-06-01"),
        );
        assert_eq!(base, d("2025-03-01"));
    }

    #[test]
    fn falls_back_to_project_then_funding_then_today() {
        assert_eq!(
            resolve_base_date(None, Some(d("2025-01-01")), Some(d("2024-12-01")), d("2025-06-01")),
            d("2025-01-01")
        );
        assert_eq!(
            resolve_base_date(None, None, Some(d("2024-12-01")), d("2025-06-01")),
            d("2024-12-01")
        );
        assert_eq!(
            resolve_base_date(None, None, None, d("2025-06-01")),
            d("2025-06-01")
        );
    }

    #[test]
    fn offsets_land_on_expected_dates() {
        // Project starting 2025-01-01 with +15/+30 day templates.
        let base = d("2025-01-01");
        assert_eq!(due_date(base, Some(15)), Some(d("2025-01-16")));
        assert_eq!(due_date(base, Some(30)), Some(d("2025-01-31")));
    }

    #[test]
    fn missing_offset_yields_no_due_date() {
        assert_eq!(due_date(d("2025-01-01"), None), None);
    }

    #[test]
    fn zero_and_negative_offsets() {
        assert_eq!(due_date(d("2025-01-10"), Some(0)), Some(d("2025-01-10")));
        assert_eq!(due_date(d("2025-01-10"), Some(-7)), Some(d("2025-01-03")));
    }
}
