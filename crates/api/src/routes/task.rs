//! Route definitions for tasks and their scope.

use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// GET    /{id}/scope   -> get_scope (resolved context or null)
/// PUT    /{id}/scope   -> assign_scope (exactly one context)
/// DELETE /{id}/scope   -> unassign_scope (task becomes unassigned)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route(
            "/{id}/scope",
            get(task::get_scope)
                .put(task::assign_scope)
                .delete(task::unassign_scope),
        )
}
