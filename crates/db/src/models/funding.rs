//! Funding entity model and DTOs.

use chrono::NaiveDate;
use grantflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Valid funding kinds.
pub const VALID_FUNDING_KINDS: &[&str] = &["grant", "sponsorship", "donation", "internal"];

/// A funding row from the `fundings` table (grant, sponsorship, donation,
/// or internal budget line).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Funding {
    pub id: DbId,
    pub kind: String,
    pub name: String,
    pub funder: String,
    pub program: String,
    pub agreement_number: String,
    pub amount_total: Option<Decimal>,
    pub currency: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reporting_deadline: Option<NaiveDate>,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new funding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFunding {
    /// Defaults to `internal` if omitted.
    pub kind: Option<String>,
    pub name: String,
    pub funder: Option<String>,
    pub program: Option<String>,
    pub agreement_number: Option<String>,
    pub amount_total: Option<Decimal>,
    /// Defaults to `PLN` if omitted.
    pub currency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reporting_deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

/// DTO for updating an existing funding. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFunding {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub funder: Option<String>,
    pub program: Option<String>,
    pub agreement_number: Option<String>,
    pub amount_total: Option<Decimal>,
    pub currency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reporting_deadline: Option<NaiveDate>,
    pub description: Option<String>,
}
