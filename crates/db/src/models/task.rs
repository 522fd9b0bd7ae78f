//! Task entity model and DTOs.

use chrono::NaiveDate;
use grantflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task row from the `tasks` table.
///
/// A task is independent of any project or funding; its context lives in
/// the 1:1 `task_scopes` record (see [`super::task_scope`]).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: i16,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub cost_amount: Option<Decimal>,
    pub cost_currency: String,
    pub receipt_url: String,
    pub receipt_note: String,
    pub est_hours: Option<Decimal>,
    /// The template this task was derived from, if any.
    pub template_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    pub status: Option<String>,
    /// Defaults to medium (2) if omitted.
    pub priority: Option<i16>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub cost_amount: Option<Decimal>,
    pub cost_currency: Option<String>,
    pub receipt_url: Option<String>,
    pub receipt_note: Option<String>,
    pub est_hours: Option<Decimal>,
}

/// DTO for updating a task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i16>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub cost_amount: Option<Decimal>,
    pub cost_currency: Option<String>,
    pub receipt_url: Option<String>,
    pub receipt_note: Option<String>,
    pub est_hours: Option<Decimal>,
}
