//! Repository for the `funding_templates` table (the template registry).

use grantflow_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::template::{CreateTemplate, FundingTemplate, UpdateTemplate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, funding_id, title, description, default_status, default_priority, \
    default_est_hours, default_due_days, mandatory, created_at";

/// Provides CRUD operations for funding task templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template under a funding, returning the created row.
    pub async fn create(
        pool: &PgPool,
        funding_id: DbId,
        input: &CreateTemplate,
    ) -> Result<FundingTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO funding_templates
                (funding_id, title, description, default_status, default_priority,
                 default_est_hours, default_due_days, mandatory)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'todo'), COALESCE($5, 2),
                     $6, $7, COALESCE($8, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FundingTemplate>(&query)
            .bind(funding_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.default_status)
            .bind(input.default_priority)
            .bind(input.default_est_hours)
            .bind(input.default_due_days)
            .bind(input.mandatory)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FundingTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM funding_templates WHERE id = $1");
        sqlx::query_as::<_, FundingTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a funding's templates in registry order (insertion order).
    ///
    /// This ordering is what makes provisioning deterministic: derived
    /// tasks are created in the same sequence on every invocation.
    pub async fn list_by_funding(
        pool: &PgPool,
        funding_id: DbId,
    ) -> Result<Vec<FundingTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM funding_templates WHERE funding_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, FundingTemplate>(&query)
            .bind(funding_id)
            .fetch_all(pool)
            .await
    }

    /// Same as [`Self::list_by_funding`] but on a transaction connection,
    /// for use inside the provisioning pass.
    pub async fn list_by_funding_tx(
        conn: &mut PgConnection,
        funding_id: DbId,
    ) -> Result<Vec<FundingTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM funding_templates WHERE funding_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, FundingTemplate>(&query)
            .bind(funding_id)
            .fetch_all(conn)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    ///
    /// Templates are never mutated by provisioning; this is user editing
    /// of the blueprint. Already-derived tasks are not touched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<FundingTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE funding_templates SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                default_status = COALESCE($4, default_status),
                default_priority = COALESCE($5, default_priority),
                default_est_hours = COALESCE($6, default_est_hours),
                default_due_days = COALESCE($7, default_due_days),
                mandatory = COALESCE($8, mandatory)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FundingTemplate>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.default_status)
            .bind(input.default_priority)
            .bind(input.default_est_hours)
            .bind(input.default_due_days)
            .bind(input.mandatory)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template by ID. Returns `true` if a row was removed.
    ///
    /// Derived tasks keep existing; their `template_id` goes NULL via the
    /// SET NULL foreign key.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM funding_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
