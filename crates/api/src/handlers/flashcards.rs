//! Handlers for the `/flashcards` resource.
//!
//! Every handler scopes its queries to the authenticated user. A card owned
//! by someone else is reported exactly like a missing card (404).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flashdeck_core::error::CoreError;
use flashdeck_core::flashcard::{marks_edited, study_source_filter};
use flashdeck_core::pagination::{limit_or_default, offset_or_default};
use flashdeck_core::types::DbId;
use flashdeck_db::models::flashcard::{
    CreateFlashcard, Flashcard, FlashcardFilter, FlashcardListParams, FlashcardPage, StudyParams,
    UpdateFlashcard,
};
use flashdeck_db::repositories::FlashcardRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Flashcard",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /flashcards
// ---------------------------------------------------------------------------

/// List the caller's flashcards with optional status, source and generation
/// filters. Newest first, with the total match count for pagination.
pub async fn list_flashcards(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<FlashcardListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = limit_or_default(params.limit);
    let offset = offset_or_default(params.offset);
    let filter = FlashcardFilter::from(&params);

    let items =
        FlashcardRepo::list_filtered(&state.pool, auth.user_id, &filter, limit, offset).await?;
    let total = FlashcardRepo::count_filtered(&state.pool, auth.user_id, &filter).await?;

    Ok(Json(DataResponse {
        data: FlashcardPage {
            items,
            total,
            limit,
            offset,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /flashcards
// ---------------------------------------------------------------------------

/// Create a card by hand. Manual cards are approved immediately.
pub async fn create_flashcard(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFlashcard>,
) -> AppResult<impl IntoResponse> {
    let card = FlashcardRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(flashcard_id = card.id, user_id = auth.user_id, "Flashcard created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

// ---------------------------------------------------------------------------
// GET /flashcards/study
// ---------------------------------------------------------------------------

/// Approved cards for a study session, optionally limited to one source.
pub async fn list_study_flashcards(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<StudyParams>,
) -> AppResult<impl IntoResponse> {
    let source = study_source_filter(params.source.as_deref());
    let cards = FlashcardRepo::list_for_study(&state.pool, auth.user_id, source).await?;

    tracing::debug!(user_id = auth.user_id, count = cards.len(), "Study deck loaded");

    Ok(Json(DataResponse { data: cards }))
}

// ---------------------------------------------------------------------------
// GET /flashcards/{id}
// ---------------------------------------------------------------------------

pub async fn get_flashcard(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let card = FlashcardRepo::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: card }))
}

// ---------------------------------------------------------------------------
// PATCH /flashcards/{id}
// ---------------------------------------------------------------------------

/// Partially update a card's content and/or status.
pub async fn update_flashcard(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateFlashcard>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Update must set at least one of: front, back, status".into(),
        )));
    }

    let card = apply_update(&state, auth.user_id, id, &input).await?;
    Ok(Json(DataResponse { data: card }))
}

// ---------------------------------------------------------------------------
// POST /flashcards/{id}/approve
// ---------------------------------------------------------------------------

/// Promote a pending card to approved.
pub async fn approve_flashcard(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let card = apply_update(&state, auth.user_id, id, &UpdateFlashcard::approve()).await?;
    Ok(Json(DataResponse { data: card }))
}

// ---------------------------------------------------------------------------
// DELETE /flashcards/{id}
// ---------------------------------------------------------------------------

/// Permanently delete a card. The parent generation, if any, is untouched.
pub async fn delete_flashcard(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    let deleted = FlashcardRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(flashcard_id = id, user_id = auth.user_id, "Flashcard deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared update path
// ---------------------------------------------------------------------------

/// Load the caller's card, derive the edited flag, and write the update.
///
/// The row is re-checked against the owner on write, so a card deleted
/// between the two queries still yields 404.
async fn apply_update(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    input: &UpdateFlashcard,
) -> AppResult<Flashcard> {
    let existing = FlashcardRepo::find_by_id(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mark_edited = marks_edited(
        &existing.source,
        input.touches_content(),
        input.status.is_some(),
    );

    let updated = FlashcardRepo::update(&state.pool, id, user_id, input, mark_edited)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        flashcard_id = id,
        user_id,
        from_status = %existing.status,
        to_status = %updated.status,
        is_edited = updated.is_edited,
        "Flashcard updated",
    );

    Ok(updated)
}
