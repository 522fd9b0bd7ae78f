//! Domain logic for the funding-aware task tracker.
//!
//! Pure types and rules shared by the persistence and HTTP layers:
//! the error taxonomy, status/priority vocabularies, date-range checks,
//! the exclusive task-scope rule, and the date arithmetic used by
//! template provisioning. No I/O lives here.

pub mod dates;
pub mod error;
pub mod provisioning;
pub mod scope;
pub mod task;
pub mod types;
