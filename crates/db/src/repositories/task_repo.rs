//! Repository for the `tasks` table.

use grantflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, priority, start_date, due_date, \
    cost_amount, cost_currency, receipt_url, receipt_note, est_hours, template_id, \
    created_at, updated_at";

/// Provides CRUD operations for tasks.
///
/// Scope assignment is separate (see [`crate::repositories::ScopeRepo`]):
/// a task created here is unassigned until a scope record is attached.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (title, description, status, priority, start_date, due_date,
                 cost_amount, cost_currency, receipt_url, receipt_note, est_hours)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, 'todo'), COALESCE($4, 2),
                     $5, $6, $7, COALESCE($8, 'PLN'), COALESCE($9, ''),
                     COALESCE($10, ''), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.priority)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(input.cost_amount)
            .bind(&input.cost_currency)
            .bind(&input.receipt_url)
            .bind(&input.receipt_note)
            .bind(input.est_hours)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY created_at DESC");
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// List tasks scoped to a link, in creation order.
    pub async fn list_by_link(pool: &PgPool, link_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT t.{} FROM tasks t
             JOIN task_scopes s ON s.task_id = t.id
             WHERE s.link_id = $1
             ORDER BY t.id ASC",
            prefixed_columns()
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(link_id)
            .fetch_all(pool)
            .await
    }

    /// List tasks visible on a project: scoped to it directly or through
    /// one of its links.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT t.{} FROM tasks t
             JOIN task_scopes s ON s.task_id = t.id
             LEFT JOIN project_fundings pf ON pf.id = s.link_id
             WHERE s.project_id = $1 OR pf.project_id = $1
             ORDER BY t.id ASC",
            prefixed_columns()
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task's own fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Scope changes
    /// go through `ScopeRepo`, which also maintains the funding-derived
    /// markers.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                start_date = COALESCE($6, start_date),
                due_date = COALESCE($7, due_date),
                cost_amount = COALESCE($8, cost_amount),
                cost_currency = COALESCE($9, cost_currency),
                receipt_url = COALESCE($10, receipt_url),
                receipt_note = COALESCE($11, receipt_note),
                est_hours = COALESCE($12, est_hours),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.priority)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(input.cost_amount)
            .bind(&input.cost_currency)
            .bind(&input.receipt_url)
            .bind(&input.receipt_note)
            .bind(input.est_hours)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    /// Its scope record, if any, cascades.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `COLUMNS` with each column prefixed by the `t.` alias, for joins.
fn prefixed_columns() -> String {
    COLUMNS
        .split(", ")
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", t.")
}
