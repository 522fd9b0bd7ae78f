//! Handlers for the `/tasks` resource, including scope assignment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grantflow_core::dates::validate_date_range;
use grantflow_core::error::CoreError;
use grantflow_core::scope::{ScopeInput, ScopeRef};
use grantflow_core::task::{validate_priority, validate_status};
use grantflow_core::types::DbId;
use grantflow_db::models::task::{CreateTask, Task, UpdateTask};
use grantflow_db::models::task_scope::TaskScope;
use grantflow_db::repositories::{ScopeRepo, TaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_task_fields(
    status: Option<&String>,
    priority: Option<i16>,
    start_date: Option<chrono::NaiveDate>,
    due_date: Option<chrono::NaiveDate>,
) -> AppResult<()> {
    if let Some(status) = status {
        validate_status(status).map_err(AppError::Core)?;
    }
    if let Some(priority) = priority {
        validate_priority(priority).map_err(AppError::Core)?;
    }
    validate_date_range("start_date", start_date, due_date).map_err(AppError::Core)?;
    Ok(())
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_task_fields(
        input.status.as_ref(),
        input.priority,
        input.start_date,
        input.due_date,
    )?;
    let task = TaskRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list(&state.pool).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    validate_task_fields(
        input.status.as_ref(),
        input.priority,
        input.start_date,
        input.due_date,
    )?;
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

/// Scope payload for GET responses: the resolved context, or null for an
/// unassigned task.
#[derive(Serialize)]
pub struct ScopeResponse {
    pub scope: Option<ScopeRef>,
    pub funding_scoped: bool,
}

/// PUT /api/v1/tasks/{id}/scope
pub async fn assign_scope(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ScopeInput>,
) -> AppResult<Json<TaskScope>> {
    let scope = ScopeRepo::assign(&state.pool, id, &input).await?;
    Ok(Json(scope))
}

/// GET /api/v1/tasks/{id}/scope
pub async fn get_scope(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScopeResponse>> {
    if TaskRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }
    let scope = ScopeRepo::find_by_task(&state.pool, id).await?;
    Ok(Json(ScopeResponse {
        funding_scoped: scope.as_ref().is_some_and(|s| s.funding_scoped),
        scope: scope.map(|s| s.context()),
    }))
}

/// DELETE /api/v1/tasks/{id}/scope
///
/// The task becomes unassigned; it is not deleted.
pub async fn unassign_scope(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }
    ScopeRepo::unassign(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
