//! Task scope model: the 1:1 record declaring which single context
//! (project, funding, or link) a task belongs to.

use grantflow_core::scope::ScopeRef;
use grantflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `task_scopes` table.
///
/// Exactly one of `project_id`, `funding_id`, `link_id` is set (DB CHECK
/// `ck_task_scopes_exactly_one`). A task without a scope row is
/// unassigned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskScope {
    pub id: DbId,
    pub task_id: DbId,
    pub project_id: Option<DbId>,
    pub funding_id: Option<DbId>,
    pub link_id: Option<DbId>,
    /// True when this scope was mechanically derived from a funding
    /// template or clone pass; governs cleanup eligibility.
    pub funding_scoped: bool,
    /// Provisioning key: copy of the task's originating template id, set
    /// only by the engine (carries the `(template, link)` unique index).
    pub template_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl TaskScope {
    /// The single context this scope resolves to.
    pub fn context(&self) -> ScopeRef {
        match (self.project_id, self.funding_id, self.link_id) {
            (Some(id), None, None) => ScopeRef::Project(id),
            (None, Some(id), None) => ScopeRef::Funding(id),
            (None, None, Some(id)) => ScopeRef::Link(id),
            // Unreachable while ck_task_scopes_exactly_one holds.
            _ => unreachable!("task scope row violates the exactly-one constraint"),
        }
    }
}
