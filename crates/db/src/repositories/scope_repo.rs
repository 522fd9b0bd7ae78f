//! Repository for the `task_scopes` table: assign, unassign, resolve.

use grantflow_core::error::CoreError;
use grantflow_core::scope::{ScopeInput, ScopeRef};
use grantflow_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::task_scope::TaskScope;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, task_id, project_id, funding_id, link_id, funding_scoped, template_id, created_at";

/// Scope assignment for tasks.
///
/// The exactly-one rule is validated in core before any write; the DB
/// CHECK constraint is the backstop. Assigning a new context to a task
/// that was mechanically derived from a funding also strips the derived
/// markers, so the task is never swept by cleanup for a funding it no
/// longer represents.
pub struct ScopeRepo;

impl ScopeRepo {
    /// Assign a task to exactly one context, replacing any existing scope.
    ///
    /// Fails with `Validation` unless exactly one context is provided,
    /// and with `NotFound` if the task or the referenced context row does
    /// not exist.
    pub async fn assign(pool: &PgPool, task_id: DbId, input: &ScopeInput) -> DbResult<TaskScope> {
        let target = input.validate()?;

        let mut tx = pool.begin().await?;

        ensure_exists(&mut *tx, "tasks", "Task", task_id).await?;
        match target {
            ScopeRef::Project(id) => ensure_exists(&mut *tx, "projects", "Project", id).await?,
            ScopeRef::Funding(id) => ensure_exists(&mut *tx, "fundings", "Funding", id).await?,
            ScopeRef::Link(id) => {
                ensure_exists(&mut *tx, "project_fundings", "ProjectFunding", id).await?
            }
        }

        let existing = Self::find_by_task_tx(&mut *tx, task_id).await?;

        // Unchanged context keeps its markers; moving a derived task to a
        // new context turns it into an ordinary task (spec of the
        // funding_scoped marker).
        let moving_off_derived = match &existing {
            Some(scope) => scope.funding_scoped && scope.context() != target,
            None => false,
        };
        if moving_off_derived {
            sqlx::query("UPDATE tasks SET template_id = NULL, updated_at = NOW() WHERE id = $1")
                .bind(task_id)
                .execute(&mut *tx)
                .await?;
        }
        let keep_markers = matches!(&existing, Some(s) if s.context() == target);

        let (project_id, funding_id, link_id) = match target {
            ScopeRef::Project(id) => (Some(id), None, None),
            ScopeRef::Funding(id) => (None, Some(id), None),
            ScopeRef::Link(id) => (None, None, Some(id)),
        };

        let query = format!(
            "INSERT INTO task_scopes (task_id, project_id, funding_id, link_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_task_scopes_task DO UPDATE SET
                project_id = EXCLUDED.project_id,
                funding_id = EXCLUDED.funding_id,
                link_id = EXCLUDED.link_id,
                funding_scoped = CASE WHEN $5 THEN task_scopes.funding_scoped ELSE FALSE END,
                template_id = CASE WHEN $5 THEN task_scopes.template_id ELSE NULL END
             RETURNING {COLUMNS}"
        );
        let scope = sqlx::query_as::<_, TaskScope>(&query)
            .bind(task_id)
            .bind(project_id)
            .bind(funding_id)
            .bind(link_id)
            .bind(keep_markers)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(scope)
    }

    /// Remove a task's scope record. The task becomes unassigned, not
    /// deleted. Returns `true` if a record existed.
    pub async fn unassign(pool: &PgPool, task_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_scopes WHERE task_id = $1")
            .bind(task_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve the context a task belongs to, or `None` if unassigned.
    pub async fn resolve(pool: &PgPool, task_id: DbId) -> Result<Option<ScopeRef>, sqlx::Error> {
        Ok(Self::find_by_task(pool, task_id)
            .await?
            .map(|scope| scope.context()))
    }

    /// Fetch the full scope record for a task.
    pub async fn find_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Option<TaskScope>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_scopes WHERE task_id = $1");
        sqlx::query_as::<_, TaskScope>(&query)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    async fn find_by_task_tx(
        conn: &mut PgConnection,
        task_id: DbId,
    ) -> Result<Option<TaskScope>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_scopes WHERE task_id = $1");
        sqlx::query_as::<_, TaskScope>(&query)
            .bind(task_id)
            .fetch_optional(conn)
            .await
    }
}

/// Fail with `NotFound` unless a row with `id` exists in `table`.
async fn ensure_exists(
    conn: &mut PgConnection,
    table: &str,
    entity: &'static str,
    id: DbId,
) -> DbResult<()> {
    let query = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    let (exists,): (bool,) = sqlx::query_as(&query).bind(id).fetch_one(conn).await?;
    if exists {
        Ok(())
    } else {
        Err(DbError::Core(CoreError::NotFound { entity, id }))
    }
}
