//! Generation endpoints: ask/chat, notes, quiz, flashcards.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use studium_core::{FlashcardOptions, QuizOptions};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub context: Option<String>,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .generation
        .ask(&req.question, req.context.as_deref())
        .await?;
    Ok(Json(json!({ "response": response })))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Same pipeline as `ask`; kept as a separate route for the chat client.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .generation
        .ask(&req.message, req.context.as_deref())
        .await?;
    Ok(Json(json!({ "response": response })))
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub context: String,
}

pub async fn generate_notes(
    State(state): State<AppState>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notes = state.generation.generate_notes(&req.context).await?;
    Ok(Json(json!({ "notes": notes })))
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub resource_ids: Vec<Uuid>,
    #[serde(default)]
    pub options: QuizOptions,
}

pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let quiz = state
        .generation
        .generate_quiz(&req.resource_ids, &req.options)
        .await?;
    Ok(Json(json!({ "quiz": quiz })))
}

#[derive(Debug, Deserialize)]
pub struct FlashcardsRequest {
    pub resource_ids: Vec<Uuid>,
    #[serde(default)]
    pub options: FlashcardOptions,
}

pub async fn generate_flashcards(
    State(state): State<AppState>,
    Json(req): Json<FlashcardsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let flashcards = state
        .generation
        .generate_flashcards(&req.resource_ids, &req.options)
        .await?;
    Ok(Json(json!({ "flashcards": flashcards })))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
