//! Generation entity model and DTOs.

use flashdeck_core::generation::{
    MAX_CARD_COUNT, MAX_SOURCE_TEXT_CHARS, MIN_CARD_COUNT, MIN_SOURCE_TEXT_CHARS,
};
use flashdeck_core::pagination::MAX_LIMIT;
use flashdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::flashcard::Flashcard;
use crate::models::lenient;

/// A row from the `generations` table. Never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Generation {
    pub id: DbId,
    pub user_id: DbId,
    pub model: String,
    pub generated_count: i32,
    pub source_text_length: i32,
    pub created_at: Timestamp,
}

/// Request body for `POST /generations`.
///
/// Fields are `Option` so that missing or wrong-typed values are reported
/// per field together with out-of-range ones.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGeneration {
    #[serde(default, deserialize_with = "lenient")]
    #[validate(
        required(message = "is required and must be a string"),
        length(min = MIN_SOURCE_TEXT_CHARS, max = MAX_SOURCE_TEXT_CHARS)
    )]
    pub source_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[validate(
        required(message = "is required and must be an integer"),
        range(min = MIN_CARD_COUNT, max = MAX_CARD_COUNT)
    )]
    pub count: Option<i32>,
}

impl CreateGeneration {
    pub fn source_text(&self) -> &str {
        self.source_text.as_deref().unwrap_or_default()
    }

    pub fn count(&self) -> i32 {
        self.count.unwrap_or_default()
    }
}

/// Query parameters for `GET /generations`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerationListParams {
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// Generation metadata written alongside its flashcards.
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub model: String,
    pub source_text_length: i32,
}

/// A generation together with its child flashcards.
#[derive(Debug, Serialize)]
pub struct GenerationWithFlashcards {
    pub generation: Generation,
    pub flashcards: Vec<Flashcard>,
}
