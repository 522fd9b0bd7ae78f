//! Route definitions for project-funding links.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::link;
use crate::state::AppState;

/// Routes mounted at `/project-fundings`.
///
/// ```text
/// POST   /      -> create (attach; provisions templates)
/// GET    /{id}  -> get_by_id
/// DELETE /{id}  -> delete (detach; retracts derived tasks)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(link::create))
        .route("/{id}", get(link::get_by_id).delete(link::delete))
}
