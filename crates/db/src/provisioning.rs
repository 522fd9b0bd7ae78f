//! Template provisioning engine and link lifecycle service.
//!
//! When a funding is attached to a project, the funding's task templates
//! are materialized into concrete tasks scoped to the new link; when the
//! link (or the whole funding) goes away, the derived tasks are retracted.
//! The hooks replace the implicit save/delete signals of an earlier
//! incarnation of this system with explicit, transaction-bound calls:
//! whoever creates or deletes a link invokes the matching hook exactly
//! once, inside the same transaction, which [`LinkService`] guarantees.
//!
//! Every hook is idempotent. The primary pass keys on `(template, link)`
//! (backed by the `uq_task_scopes_template_link` index), so an
//! at-least-once caller retrying after a partial failure cannot duplicate
//! tasks; atomicity comes from the surrounding transaction, which rolls
//! back everything including the link row itself.

use chrono::Utc;
use grantflow_core::dates::validate_date_range;
use grantflow_core::error::CoreError;
use grantflow_core::provisioning::{due_date, resolve_base_date};
use grantflow_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{conflict_on_unique, DbError, DbResult};
use crate::models::link::{CreateLink, ProjectFunding};
use crate::models::task::Task;
use crate::models::template::FundingTemplate;
use crate::repositories::{LinkRepo, TemplateRepo};

/// Counts reported by a cleanup hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
    /// Mechanically-derived tasks deleted.
    pub tasks_deleted: u64,
    /// Scope records of manually-created tasks released (tasks survive,
    /// unassigned).
    pub scopes_released: u64,
}

/// Reactive provisioning of funding templates into tasks.
///
/// `clone_funding_tasks` enables the secondary pass that clones tasks
/// already scoped directly to the funding into each new link. It is off
/// by default; deployments that used the link as a per-project working
/// copy of the funding checklist turn it on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisioningEngine {
    pub clone_funding_tasks: bool,
}

impl ProvisioningEngine {
    /// Materialize the funding's templates as tasks scoped to `link`.
    ///
    /// Runs on the transaction that created the link. Returns the number
    /// of tasks created (0 on a fully-provisioned retry).
    pub async fn on_link_created(
        &self,
        conn: &mut PgConnection,
        link: &ProjectFunding,
    ) -> DbResult<u64> {
        let (project_start,): (Option<chrono::NaiveDate>,) =
            sqlx::query_as("SELECT start_date FROM projects WHERE id = $1")
                .bind(link.project_id)
                .fetch_one(&mut *conn)
                .await?;
        let (funding_start,): (Option<chrono::NaiveDate>,) =
            sqlx::query_as("SELECT start_date FROM fundings WHERE id = $1")
                .bind(link.funding_id)
                .fetch_one(&mut *conn)
                .await?;

        let base = resolve_base_date(
            link.allocation_start,
            project_start,
            funding_start,
            Utc::now().date_naive(),
        );

        let templates = TemplateRepo::list_by_funding_tx(&mut *conn, link.funding_id).await?;

        let mut created = 0u64;
        for template in &templates {
            if derived_task_exists(&mut *conn, template.id, link.id).await? {
                continue;
            }
            insert_derived_task(&mut *conn, link.id, template, due_date(base, template.default_due_days))
                .await?;
            created += 1;
        }

        if self.clone_funding_tasks {
            created += self.clone_funding_scoped_tasks(&mut *conn, link).await?;
        }

        tracing::info!(
            link_id = link.id,
            project_id = link.project_id,
            funding_id = link.funding_id,
            templates = templates.len(),
            tasks_created = created,
            "Provisioned funding templates for link"
        );
        Ok(created)
    }

    /// Secondary pass: clone tasks scoped directly to the funding into
    /// the new link, keyed on `(title, template)` against the link's
    /// existing tasks so retries do not duplicate clones.
    async fn clone_funding_scoped_tasks(
        &self,
        conn: &mut PgConnection,
        link: &ProjectFunding,
    ) -> DbResult<u64> {
        let sources = sqlx::query_as::<_, Task>(
            "SELECT t.id, t.title, t.description, t.status, t.priority, t.start_date,
                    t.due_date, t.cost_amount, t.cost_currency, t.receipt_url,
                    t.receipt_note, t.est_hours, t.template_id, t.created_at, t.updated_at
             FROM tasks t
             JOIN task_scopes s ON s.task_id = t.id
             WHERE s.funding_id = $1
             ORDER BY t.id ASC",
        )
        .bind(link.funding_id)
        .fetch_all(&mut *conn)
        .await?;

        let mut cloned = 0u64;
        for source in &sources {
            let (exists,): (bool,) = sqlx::query_as(
                "SELECT EXISTS (
                    SELECT 1 FROM tasks t
                    JOIN task_scopes s ON s.task_id = t.id
                    WHERE s.link_id = $1
                      AND t.title = $2
                      AND t.template_id IS NOT DISTINCT FROM $3
                 )",
            )
            .bind(link.id)
            .bind(&source.title)
            .bind(source.template_id)
            .fetch_one(&mut *conn)
            .await?;
            if exists {
                continue;
            }

            let (task_id,): (DbId,) = sqlx::query_as(
                "INSERT INTO tasks
                    (title, description, status, priority, start_date, due_date,
                     cost_amount, cost_currency, receipt_url, receipt_note,
                     est_hours, template_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                 RETURNING id",
            )
            .bind(&source.title)
            .bind(&source.description)
            .bind(&source.status)
            .bind(source.priority)
            .bind(source.start_date)
            .bind(source.due_date)
            .bind(source.cost_amount)
            .bind(&source.cost_currency)
            .bind(&source.receipt_url)
            .bind(&source.receipt_note)
            .bind(source.est_hours)
            .bind(source.template_id)
            .fetch_one(&mut *conn)
            .await?;

            // Clones keep scope.template_id NULL: their idempotence key is
            // the title, and the (template, link) unique index belongs to
            // the primary pass.
            sqlx::query(
                "INSERT INTO task_scopes (task_id, link_id, funding_scoped)
                 VALUES ($1, $2, TRUE)",
            )
            .bind(task_id)
            .bind(link.id)
            .execute(&mut *conn)
            .await?;
            cloned += 1;
        }
        Ok(cloned)
    }

    /// Retract the link's derived tasks before the link row is deleted.
    ///
    /// Derived tasks (`funding_scoped = true`) are deleted outright.
    /// Manually-created tasks scoped to the link keep existing; only
    /// their scope record is removed, leaving them unassigned.
    pub async fn on_link_deleted(
        &self,
        conn: &mut PgConnection,
        link_id: DbId,
    ) -> DbResult<CleanupStats> {
        let deleted = sqlx::query(
            "DELETE FROM tasks WHERE id IN (
                SELECT task_id FROM task_scopes
                WHERE link_id = $1 AND funding_scoped
             )",
        )
        .bind(link_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        let released = sqlx::query(
            "DELETE FROM task_scopes WHERE link_id = $1 AND NOT funding_scoped",
        )
        .bind(link_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        tracing::info!(
            link_id,
            tasks_deleted = deleted,
            scopes_released = released,
            "Retracted tasks for unlinked funding"
        );
        Ok(CleanupStats {
            tasks_deleted: deleted,
            scopes_released: released,
        })
    }

    /// Sweep every task derived from this funding, across all projects,
    /// before the funding row is deleted.
    ///
    /// Covers tasks scoped to the funding directly and tasks scoped to
    /// any of its links. Manually-created tasks in either context lose
    /// only their scope record (set-null semantic: they become
    /// unassigned).
    pub async fn on_funding_deleted(
        &self,
        conn: &mut PgConnection,
        funding_id: DbId,
    ) -> DbResult<CleanupStats> {
        let deleted = sqlx::query(
            "DELETE FROM tasks WHERE id IN (
                SELECT s.task_id FROM task_scopes s
                LEFT JOIN project_fundings pf ON pf.id = s.link_id
                WHERE s.funding_scoped
                  AND (s.funding_id = $1 OR pf.funding_id = $1)
             )",
        )
        .bind(funding_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        let released = sqlx::query(
            "DELETE FROM task_scopes WHERE id IN (
                SELECT s.id FROM task_scopes s
                LEFT JOIN project_fundings pf ON pf.id = s.link_id
                WHERE NOT s.funding_scoped
                  AND (s.funding_id = $1 OR pf.funding_id = $1)
             )",
        )
        .bind(funding_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        tracing::info!(
            funding_id,
            tasks_deleted = deleted,
            scopes_released = released,
            "Swept derived tasks for deleted funding"
        );
        Ok(CleanupStats {
            tasks_deleted: deleted,
            scopes_released: released,
        })
    }
}

/// True if the primary pass already created a task for `(template, link)`.
async fn derived_task_exists(
    conn: &mut PgConnection,
    template_id: DbId,
    link_id: DbId,
) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM task_scopes WHERE template_id = $1 AND link_id = $2
         )",
    )
    .bind(template_id)
    .bind(link_id)
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

/// Insert one task derived from a template, plus its link scope.
async fn insert_derived_task(
    conn: &mut PgConnection,
    link_id: DbId,
    template: &FundingTemplate,
    due: Option<chrono::NaiveDate>,
) -> Result<(), sqlx::Error> {
    let (task_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO tasks (title, description, status, priority, due_date, est_hours, template_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(&template.title)
    .bind(&template.description)
    .bind(&template.default_status)
    .bind(template.default_priority)
    .bind(due)
    .bind(template.default_est_hours)
    .bind(template.id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(
        "INSERT INTO task_scopes (task_id, link_id, funding_scoped, template_id)
         VALUES ($1, $2, TRUE, $3)",
    )
    .bind(task_id)
    .bind(link_id)
    .bind(template.id)
    .execute(conn)
    .await?;
    Ok(())
}

/// Link lifecycle: attach/detach fundings with the provisioning hooks
/// bound into the same transaction as the row change.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkService {
    pub engine: ProvisioningEngine,
}

impl LinkService {
    pub fn new(engine: ProvisioningEngine) -> Self {
        Self { engine }
    }

    /// Attach a funding to a project.
    ///
    /// Validates allocation date order, inserts the link, and provisions
    /// templates, all in one transaction: a provisioning failure rolls
    /// back the link itself. A duplicate (project, funding) pair fails
    /// with `Conflict`; a missing project or funding with `NotFound`.
    pub async fn create_link(&self, pool: &PgPool, input: &CreateLink) -> DbResult<ProjectFunding> {
        validate_date_range(
            "allocation_start",
            input.allocation_start,
            input.allocation_end,
        )?;

        let mut tx = pool.begin().await?;

        ensure_exists(&mut *tx, "projects", "Project", input.project_id).await?;
        ensure_exists(&mut *tx, "fundings", "Funding", input.funding_id).await?;

        let link = LinkRepo::insert(&mut *tx, input).await.map_err(|err| {
            conflict_on_unique(
                err,
                "uq_project_fundings_pair",
                "Funding is already linked to this project",
            )
        })?;

        self.engine.on_link_created(&mut *tx, &link).await?;

        tx.commit().await?;
        Ok(link)
    }

    /// Detach a funding from a project: cleanup hook first, then the
    /// physical delete, in one transaction. Returns `false` if the link
    /// does not exist.
    pub async fn delete_link(&self, pool: &PgPool, link_id: DbId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;

        self.engine.on_link_deleted(&mut *tx, link_id).await?;
        let deleted = LinkRepo::delete(&mut *tx, link_id).await?;

        tx.commit().await?;
        Ok(deleted)
    }

    /// Delete a project: run the unlink cleanup for each of its links,
    /// release project-scoped tasks, then delete the row (links cascade).
    /// Returns `false` if the project does not exist.
    pub async fn delete_project(&self, pool: &PgPool, project_id: DbId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;

        let links: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM project_fundings WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;
        for (link_id,) in &links {
            self.engine.on_link_deleted(&mut *tx, *link_id).await?;
        }

        // Project scopes are never written by the engine: all manual, so
        // the tasks survive unassigned.
        let released = sqlx::query("DELETE FROM task_scopes WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        tx.commit().await?;
        if deleted {
            tracing::info!(
                project_id,
                links_cleaned = links.len(),
                scopes_released = released,
                "Deleted project with link cleanup"
            );
        }
        Ok(deleted)
    }

    /// Delete a funding: sweep its derived tasks across all projects,
    /// then delete the row (links cascade). Returns `false` if the
    /// funding does not exist.
    pub async fn delete_funding(&self, pool: &PgPool, funding_id: DbId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;

        self.engine.on_funding_deleted(&mut *tx, funding_id).await?;
        let deleted = sqlx::query("DELETE FROM fundings WHERE id = $1")
            .bind(funding_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        tx.commit().await?;
        Ok(deleted)
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
