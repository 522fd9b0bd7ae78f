//! Route modules, one per resource, plus the `/api/v1` aggregate.

pub mod funding;
pub mod health;
pub mod link;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/fundings", funding::router())
        .nest("/templates", funding::template_router())
        .nest("/project-fundings", link::router())
        .nest("/tasks", task::router())
}
