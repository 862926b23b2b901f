//! Chat message endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use studium_core::{ChatMessage, MessageRepository, MessageRole};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

pub async fn append_message(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
    Json(req): Json<AppendMessageRequest>,
) -> Result<Json<ChatMessage>, ApiError> {
    let message = state
        .db
        .messages
        .append(space_id, req.role, &req.content)
        .await?;
    Ok(Json(message))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    Ok(Json(state.db.messages.list(space_id).await?))
}

pub async fn clear_messages(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.messages.clear(space_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
