//! HTTP handlers for studium-api.

pub mod folders;
pub mod generation;
pub mod messages;
pub mod resources;
pub mod spaces;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::AppState;

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(generation::health))
        .route(
            "/folders",
            post(folders::create_folder).get(folders::list_folders),
        )
        .route("/folders/:id", delete(folders::delete_folder))
        .route(
            "/folders/:id/resources",
            post(resources::upload_resource).get(resources::list_resources),
        )
        .route(
            "/resources/:id",
            get(resources::get_resource).delete(resources::delete_resource),
        )
        .route("/resources/:id/content", get(resources::get_resource_content))
        .route("/resources/:id/validate", get(resources::validate_resource))
        .route("/spaces", post(spaces::create_space))
        .route(
            "/spaces/:id",
            get(spaces::get_space)
                .put(spaces::update_space)
                .delete(spaces::delete_space),
        )
        .route(
            "/spaces/:id/messages",
            post(messages::append_message)
                .get(messages::list_messages)
                .delete(messages::clear_messages),
        )
        .route("/ask", post(generation::ask))
        .route("/chat", post(generation::chat))
        .route("/generate-notes", post(generation::generate_notes))
        .route("/generate-quiz", post(generation::generate_quiz))
        .route("/generate-flashcards", post(generation::generate_flashcards))
        .route("/clear-all", delete(folders::clear_all))
        .with_state(state)
}
