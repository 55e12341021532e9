//! Route definitions for the `/flashcards` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::flashcards;
use crate::state::AppState;

/// Routes mounted at `/flashcards`.
///
/// ```text
/// GET    /               -> list_flashcards
/// POST   /               -> create_flashcard
/// GET    /study          -> list_study_flashcards
/// GET    /{id}           -> get_flashcard
/// PATCH  /{id}           -> update_flashcard
/// DELETE /{id}           -> delete_flashcard
/// POST   /{id}/approve   -> approve_flashcard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(flashcards::list_flashcards).post(flashcards::create_flashcard),
        )
        .route("/study", get(flashcards::list_study_flashcards))
        .route(
            "/{id}",
            get(flashcards::get_flashcard)
                .patch(flashcards::update_flashcard)
                .delete(flashcards::delete_flashcard),
        )
        .route("/{id}/approve", post(flashcards::approve_flashcard))
}
