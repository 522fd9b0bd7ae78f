//! Handlers for the `/fundings` resource.
//!
//! Deletion is special: it routes through the link service so the
//! derived-task sweep runs in the same transaction as the row delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grantflow_core::dates::validate_date_range;
use grantflow_core::error::CoreError;
use grantflow_core::types::DbId;
use grantflow_db::models::funding::{CreateFunding, Funding, UpdateFunding};
use grantflow_db::repositories::FundingRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/fundings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFunding>,
) -> AppResult<(StatusCode, Json<Funding>)> {
    validate_date_range("start_date", input.start_date, input.end_date)
        .map_err(AppError::Core)?;
    let funding = FundingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(funding)))
}

/// GET /api/v1/fundings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Funding>>> {
    let fundings = FundingRepo::list(&state.pool).await?;
    Ok(Json(fundings))
}

/// GET /api/v1/fundings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Funding>> {
    let funding = FundingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Funding",
            id,
        }))?;
    Ok(Json(funding))
}

/// PUT /api/v1/fundings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFunding>,
) -> AppResult<Json<Funding>> {
    validate_date_range("start_date", input.start_date, input.end_date)
        .map_err(AppError::Core)?;
    let funding = FundingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Funding",
            id,
        }))?;
    Ok(Json(funding))
}

/// DELETE /api/v1/fundings/{id}
///
/// Runs the funding-deleted cleanup hook, then deletes the row.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = state.links.delete_funding(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Funding",
            id,
        }))
    }
}
