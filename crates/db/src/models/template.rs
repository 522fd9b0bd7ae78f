//! Funding task template (blueprint) model and DTOs.

use grantflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `funding_templates` table: a reusable task blueprint
/// attached to a funding. Pure data; provisioning only reads it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FundingTemplate {
    pub id: DbId,
    pub funding_id: DbId,
    pub title: String,
    pub description: String,
    pub default_status: String,
    pub default_priority: i16,
    pub default_est_hours: Option<Decimal>,
    /// Due date offset in days, resolved against the link base date at
    /// provisioning time. `None` means derived tasks get no due date.
    pub default_due_days: Option<i32>,
    pub mandatory: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a template under a funding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplate {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    pub default_status: Option<String>,
    /// Defaults to medium (2) if omitted.
    pub default_priority: Option<i16>,
    pub default_est_hours: Option<Decimal>,
    pub default_due_days: Option<i32>,
    /// Defaults to `true` if omitted.
    pub mandatory: Option<bool>,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub default_status: Option<String>,
    pub default_priority: Option<i16>,
    pub default_est_hours: Option<Decimal>,
    pub default_due_days: Option<i32>,
    pub mandatory: Option<bool>,
}
