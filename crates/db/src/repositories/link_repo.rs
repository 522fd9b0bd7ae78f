//! Repository for the `project_fundings` table.
//!
//! Raw row access only. Attaching and detaching go through
//! [`crate::provisioning::LinkService`], which wraps the insert/delete in
//! a transaction together with the provisioning hooks. Deleting a row
//! directly while derived tasks still reference it fails on the RESTRICT
//! foreign keys in `task_scopes`.

use grantflow_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::link::{CreateLink, ProjectFunding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, funding_id, allocation_start, allocation_end, \
    is_primary, note, created_at";

/// Provides row-level operations for project-funding links.
pub struct LinkRepo;

impl LinkRepo {
    /// Insert a new link row, returning it.
    ///
    /// Violates `uq_project_fundings_pair` if the pair is already linked.
    /// Runs on a connection so the service can keep it inside the
    /// provisioning transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateLink,
    ) -> Result<ProjectFunding, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_fundings
                (project_id, funding_id, allocation_start, allocation_end, is_primary, note)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE), COALESCE($6, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFunding>(&query)
            .bind(input.project_id)
            .bind(input.funding_id)
            .bind(input.allocation_start)
            .bind(input.allocation_end)
            .bind(input.is_primary)
            .bind(&input.note)
            .fetch_one(conn)
            .await
    }

    /// Find a link by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectFunding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_fundings WHERE id = $1");
        sqlx::query_as::<_, ProjectFunding>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List links for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectFunding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_fundings
             WHERE project_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ProjectFunding>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List links for a funding, oldest first.
    pub async fn list_by_funding(
        pool: &PgPool,
        funding_id: DbId,
    ) -> Result<Vec<ProjectFunding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_fundings
             WHERE funding_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ProjectFunding>(&query)
            .bind(funding_id)
            .fetch_all(pool)
            .await
    }

    /// Physically delete a link row. Returns `true` if a row was removed.
    ///
    /// Callers must have run the unlink cleanup in the same transaction.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_fundings WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
