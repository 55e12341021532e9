//! Route definitions for the `/generations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::generations;
use crate::state::AppState;

/// Routes mounted at `/generations`.
///
/// ```text
/// GET  /      -> list_generations
/// POST /      -> create_generation
/// GET  /{id}  -> get_generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(generations::list_generations).post(generations::create_generation),
        )
        .route("/{id}", get(generations::get_generation))
}
