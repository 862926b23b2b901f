//! Space endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use studium_core::{CreateSpaceRequest, Space, SpaceRepository, UpdateSpaceRequest};

use crate::error::ApiError;
use crate::AppState;

pub async fn create_space(
    State(state): State<AppState>,
    Json(req): Json<CreateSpaceRequest>,
) -> Result<Json<Space>, ApiError> {
    Ok(Json(state.db.spaces.create(req).await?))
}

pub async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Space>, ApiError> {
    Ok(Json(state.db.spaces.get(id).await?))
}

/// Partial update. Only `name` and `notes` are applied; any other key in
/// the payload is dropped during deserialization.
pub async fn update_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSpaceRequest>,
) -> Result<Json<Space>, ApiError> {
    Ok(Json(state.db.spaces.update(id, req).await?))
}

pub async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.spaces.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
