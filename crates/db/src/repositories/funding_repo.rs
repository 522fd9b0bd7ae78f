//! Repository for the `fundings` table.
//!
//! Funding deletion is NOT exposed here: it must run the cleanup hook
//! first, so it lives on [`crate::provisioning::LinkService`].

use grantflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::funding::{CreateFunding, Funding, UpdateFunding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, name, funder, program, agreement_number, amount_total, \
    currency, start_date, end_date, reporting_deadline, description, created_at";

/// Provides CRUD operations for fundings.
pub struct FundingRepo;

impl FundingRepo {
    /// Insert a new funding, returning the created row.
    ///
    /// If `kind` is `None`, defaults to `internal`; `currency` defaults to `PLN`.
    pub async fn create(pool: &PgPool, input: &CreateFunding) -> Result<Funding, sqlx::Error> {
        let query = format!(
            "INSERT INTO fundings
                (kind, name, funder, program, agreement_number, amount_total,
                 currency, start_date, end_date, reporting_deadline, description)
             VALUES (COALESCE($1, 'internal'), $2, COALESCE($3, ''), COALESCE($4, ''),
                     COALESCE($5, ''), $6, COALESCE($7, 'PLN'), $8, $9, $10,
                     COALESCE($11, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Funding>(&query)
            .bind(&input.kind)
            .bind(&input.name)
            .bind(&input.funder)
            .bind(&input.program)
            .bind(&input.agreement_number)
            .bind(input.amount_total)
            .bind(&input.currency)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.reporting_deadline)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a funding by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Funding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fundings WHERE id = $1");
        sqlx::query_as::<_, Funding>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all fundings ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Funding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fundings ORDER BY created_at DESC");
        sqlx::query_as::<_, Funding>(&query).fetch_all(pool).await
    }

    /// List fundings linked to a project, oldest link first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Funding>, sqlx::Error> {
        let query = "SELECT f.id, f.kind, f.name, f.funder, f.program, f.agreement_number, \
             f.amount_total, f.currency, f.start_date, f.end_date, f.reporting_deadline, \
             f.description, f.created_at
             FROM fundings f
             JOIN project_fundings pf ON pf.funding_id = f.id
             WHERE pf.project_id = $1
             ORDER BY pf.created_at ASC";
        sqlx::query_as::<_, Funding>(query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a funding. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFunding,
    ) -> Result<Option<Funding>, sqlx::Error> {
        let query = format!(
            "UPDATE fundings SET
                kind = COALESCE($2, kind),
                name = COALESCE($3, name),
                funder = COALESCE($4, funder),
                program = COALESCE($5, program),
                agreement_number = COALESCE($6, agreement_number),
                amount_total = COALESCE($7, amount_total),
                currency = COALESCE($8, currency),
                start_date = COALESCE($9, start_date),
                end_date = COALESCE($10, end_date),
                reporting_deadline = COALESCE($11, reporting_deadline),
                description = COALESCE($12, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Funding>(&query)
            .bind(id)
            .bind(&input.kind)
            .bind(&input.name)
            .bind(&input.funder)
            .bind(&input.program)
            .bind(&input.agreement_number)
            .bind(input.amount_total)
            .bind(&input.currency)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.reporting_deadline)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
