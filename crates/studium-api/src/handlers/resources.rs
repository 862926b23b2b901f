//! Resource endpoints: upload, retrieval, validation, deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use studium_core::{Error, Resource, ResourceRepository, ResourceSummary};

use crate::error::ApiError;
use crate::AppState;

/// Longest content preview returned by the upload endpoint.
const PREVIEW_LEN: usize = 200;

fn preview(content: &str) -> &str {
    match content.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

pub async fn upload_resource(
    State(state): State<AppState>,
    Path(folder_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("malformed multipart body: {e}")))?
        .ok_or_else(|| Error::Validation("no file field in upload".into()))?;

    let name = field.file_name().unwrap_or("upload.txt").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| Error::Validation(format!("failed to read upload: {e}")))?;
    if bytes.is_empty() {
        return Err(Error::Validation("empty file".into()).into());
    }

    // Extraction failure surfaces here; nothing is stored on that path.
    let content = state.extractor.extract(&bytes)?;
    let resource = state.db.resources.create(&name, folder_id, &content).await?;

    Ok(Json(json!({
        "id": resource.id,
        "name": resource.name,
        "content_preview": preview(&resource.content),
    })))
}

pub async fn list_resources(
    State(state): State<AppState>,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<Vec<ResourceSummary>>, ApiError> {
    Ok(Json(state.db.resources.list_for_folder(folder_id).await?))
}

pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(state.db.resources.get(id).await?))
}

pub async fn get_resource_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let resource = state.db.resources.get(id).await?;
    Ok(Json(json!({ "content": resource.content })))
}

/// Existence probe used by clients before generation requests; an unknown id
/// is a normal answer here, not an error.
pub async fn validate_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.db.resources.get(id).await {
        Ok(resource) => Ok(Json(json!({
            "valid": true,
            "id": resource.id,
            "name": resource.name,
        }))),
        Err(Error::NotFound(_)) => Ok(Json(json!({
            "valid": false,
            "id": id,
            "reason": "resource not found",
        }))),
        Err(err) => Err(err.into()),
    }
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.resources.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
