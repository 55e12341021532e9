pub mod auth;
pub mod flashcards;
pub mod generations;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current account (requires auth)
///
/// /flashcards                        list, create
/// /flashcards/study                  approved cards for study
/// /flashcards/{id}                   get, update, delete
/// /flashcards/{id}/approve           approve (POST)
///
/// /generations                       list, generate (POST)
/// /generations/{id}                  get with its flashcards
/// ```
///
/// Everything except register and login requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/flashcards", flashcards::router())
        .nest("/generations", generations::router())
}
