//! Folder endpoints.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use studium_core::{Folder, FolderRepository, FolderWithSpaces};

use crate::auth::resolve_owner;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

pub async fn create_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<Folder>, ApiError> {
    let owner = resolve_owner(&state.verifier, &headers).await?;
    let folder = state.db.folders.create(&req.name, &owner).await?;
    Ok(Json(folder))
}

pub async fn list_folders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<FolderWithSpaces>>, ApiError> {
    let owner = resolve_owner(&state.verifier, &headers).await?;
    Ok(Json(state.db.folders.list(&owner).await?))
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.folders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let owner = resolve_owner(&state.verifier, &headers).await?;
    let removed = state.db.folders.clear_all(&owner).await?;
    Ok(Json(json!({ "deleted_folders": removed })))
}
