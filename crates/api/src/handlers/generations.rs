//! Handlers for the `/generations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flashdeck_core::error::CoreError;
use flashdeck_core::pagination::{limit_or_default, offset_or_default};
use flashdeck_db::models::generation::{
    CreateGeneration, GenerationListParams, GenerationWithFlashcards,
};
use flashdeck_db::repositories::{FlashcardRepo, GenerationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::generation::create_generation as run_generation;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /generations
// ---------------------------------------------------------------------------

/// Generate a batch of pending flashcards from source text.
pub async fn create_generation(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateGeneration>,
) -> AppResult<impl IntoResponse> {
    let result =
        run_generation(&state.pool, state.completion.as_ref(), auth.user_id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

// ---------------------------------------------------------------------------
// GET /generations
// ---------------------------------------------------------------------------

/// List the caller's generations, newest first.
pub async fn list_generations(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<GenerationListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = limit_or_default(params.limit);
    let offset = offset_or_default(params.offset);

    let generations =
        GenerationRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;

    Ok(Json(DataResponse { data: generations }))
}

// ---------------------------------------------------------------------------
// GET /generations/{id}
// ---------------------------------------------------------------------------

/// A generation with the caller's cards that still belong to it.
pub async fn get_generation(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let generation = GenerationRepo::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id,
        }))?;

    let flashcards = FlashcardRepo::list_by_generation(&state.pool, auth.user_id, id).await?;

    Ok(Json(DataResponse {
        data: GenerationWithFlashcards {
            generation,
            flashcards,
        },
    }))
}
