//! The exclusive task-scope rule.
//!
//! A task's context is attached, not embedded: a separate scope record
//! points at exactly one of project, funding, or project-funding link.
//! A task with no scope record is unassigned.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// The single context a task scope resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScopeRef {
    Project(DbId),
    Funding(DbId),
    Link(DbId),
}

/// Caller-supplied scope target. At most one field may be set;
/// [`ScopeInput::validate`] enforces exactly one.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScopeInput {
    pub project_id: Option<DbId>,
    pub funding_id: Option<DbId>,
    pub link_id: Option<DbId>,
}

impl ScopeInput {
    /// Validate the exactly-one rule and return the chosen context.
    ///
    /// Zero or more than one non-null field fails with a validation error.
    pub fn validate(&self) -> Result<ScopeRef, CoreError> {
        let provided = [
            self.project_id.is_some(),
            self.funding_id.is_some(),
            self.link_id.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if provided != 1 {
            return Err(CoreError::Validation(
                "Provide exactly one of: project_id, funding_id, link_id".to_string(),
            ));
        }

        Ok(match (self.project_id, self.funding_id, self.link_id) {
            (Some(id), None, None) => ScopeRef::Project(id),
            (None, Some(id), None) => ScopeRef::Funding(id),
            (None, None, Some(id)) => ScopeRef::Link(id),
            _ => unreachable!("exactly one field checked above"),
        })
    }
}
