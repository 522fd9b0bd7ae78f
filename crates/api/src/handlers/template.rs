//! Handlers for funding task templates, nested under
//! `/fundings/{funding_id}/templates`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grantflow_core::error::CoreError;
use grantflow_core::task::{validate_priority, validate_status};
use grantflow_core::types::DbId;
use grantflow_db::models::template::{CreateTemplate, FundingTemplate, UpdateTemplate};
use grantflow_db::repositories::{FundingRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/fundings/{funding_id}/templates
pub async fn create(
    State(state): State<AppState>,
    Path(funding_id): Path<DbId>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<FundingTemplate>)> {
    if let Some(status) = &input.default_status {
        validate_status(status).map_err(AppError::Core)?;
    }
    if let Some(priority) = input.default_priority {
        validate_priority(priority).map_err(AppError::Core)?;
    }
    if FundingRepo::find_by_id(&state.pool, funding_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Funding",
            id: funding_id,
        }));
    }
    let template = TemplateRepo::create(&state.pool, funding_id, &input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/fundings/{funding_id}/templates
///
/// Registry order: templates are returned in the order provisioning
/// consumes them.
pub async fn list(
    State(state): State<AppState>,
    Path(funding_id): Path<DbId>,
) -> AppResult<Json<Vec<FundingTemplate>>> {
    let templates = TemplateRepo::list_by_funding(&state.pool, funding_id).await?;
    Ok(Json(templates))
}

/// PUT /api/v1/templates/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<FundingTemplate>> {
    if let Some(status) = &input.default_status {
        validate_status(status).map_err(AppError::Core)?;
    }
    if let Some(priority) = input.default_priority {
        validate_priority(priority).map_err(AppError::Core)?;
    }
    let template = TemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FundingTemplate",
            id,
        }))?;
    Ok(Json(template))
}

/// DELETE /api/v1/templates/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TemplateRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "FundingTemplate",
            id,
        }))
    }
}
