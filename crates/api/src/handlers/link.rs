//! Handlers for `/project-fundings`: attaching and detaching fundings.
//!
//! Both mutations go through the link service so the provisioning hooks
//! run inside the same transaction as the row change.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grantflow_core::error::CoreError;
use grantflow_core::types::DbId;
use grantflow_db::models::link::{CreateLink, ProjectFunding};
use grantflow_db::repositories::LinkRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/project-fundings
///
/// Attach a funding to a project. Templates are provisioned as a side
/// effect; a duplicate pair returns 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLink>,
) -> AppResult<(StatusCode, Json<ProjectFunding>)> {
    let link = state.links.create_link(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /api/v1/project-fundings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectFunding>> {
    let link = LinkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectFunding",
            id,
        }))?;
    Ok(Json(link))
}

/// GET /api/v1/projects/{id}/links
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectFunding>>> {
    let links = LinkRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(links))
}

/// DELETE /api/v1/project-fundings/{id}
///
/// Detach: derived tasks are retracted, manual tasks released, then the
/// link row is deleted.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = state.links.delete_link(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectFunding",
            id,
        }))
    }
}
