//! Project-funding link entity model and DTOs.

use chrono::NaiveDate;
use grantflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_fundings` table: the association entity joining
/// a project and a funding, unique per pair. Creating one triggers template
/// provisioning; deleting one triggers cleanup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFunding {
    pub id: DbId,
    pub project_id: DbId,
    pub funding_id: DbId,
    pub allocation_start: Option<NaiveDate>,
    pub allocation_end: Option<NaiveDate>,
    pub is_primary: bool,
    pub note: String,
    pub created_at: Timestamp,
}

/// DTO for attaching a funding to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLink {
    pub project_id: DbId,
    pub funding_id: DbId,
    pub allocation_start: Option<NaiveDate>,
    pub allocation_end: Option<NaiveDate>,
    pub is_primary: Option<bool>,
    pub note: Option<String>,
}
