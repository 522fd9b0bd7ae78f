//! Route definitions for fundings and their template registry.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{funding, template};
use crate::state::AppState;

/// Routes mounted at `/fundings`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete (runs cleanup hook)
/// GET    /{id}/templates            -> template::list
/// POST   /{id}/templates            -> template::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(funding::list).post(funding::create))
        .route(
            "/{id}",
            get(funding::get_by_id)
                .put(funding::update)
                .delete(funding::delete),
        )
        .route(
            "/{id}/templates",
            get(template::list).post(template::create),
        )
}

/// Routes mounted at `/templates` for direct template editing.
///
/// ```text
/// PUT    /{id}  -> template::update
/// DELETE /{id}  -> template::delete
/// ```
pub fn template_router() -> Router<AppState> {
    Router::new().route("/{id}", put(template::update).delete(template::delete))
}
