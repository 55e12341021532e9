//! Flashcard entity model and DTOs.

use flashdeck_core::flashcard::{non_blank_field, source_field, status_field, study_source_field};
use flashdeck_core::pagination::MAX_LIMIT;
use flashdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lenient;

/// A row from the `flashcards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flashcard {
    pub id: DbId,
    pub user_id: DbId,
    pub generation_id: Option<DbId>,
    pub front: String,
    pub back: String,
    pub source: String,
    pub status: String,
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for manually creating a flashcard.
///
/// Only the content is accepted from the client; source and status are
/// always set server-side. Both sides are `Option` so a missing or
/// wrong-typed side is reported by validation rather than by the JSON parser.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateFlashcard {
    #[serde(default, deserialize_with = "lenient")]
    #[validate(
        required(message = "is required and must be a string"),
        custom(function = "non_blank_field")
    )]
    pub front: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[validate(
        required(message = "is required and must be a string"),
        custom(function = "non_blank_field")
    )]
    pub back: Option<String>,
}

impl CreateFlashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: Some(front.into()),
            back: Some(back.into()),
        }
    }

    /// Front text; empty only if the DTO was never validated.
    pub fn front(&self) -> &str {
        self.front.as_deref().unwrap_or_default()
    }

    /// Back text; empty only if the DTO was never validated.
    pub fn back(&self) -> &str {
        self.back.as_deref().unwrap_or_default()
    }
}

/// DTO for a partial flashcard update. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFlashcard {
    #[validate(custom(function = "non_blank_field"))]
    pub front: Option<String>,
    #[validate(custom(function = "non_blank_field"))]
    pub back: Option<String>,
    #[validate(custom(function = "status_field"))]
    pub status: Option<String>,
}

impl UpdateFlashcard {
    /// An update that only promotes the card to `approved`.
    pub fn approve() -> Self {
        Self {
            status: Some(flashdeck_core::flashcard::STATUS_APPROVED.to_string()),
            ..Self::default()
        }
    }

    /// True when the update changes the front or the back.
    pub fn touches_content(&self) -> bool {
        self.front.is_some() || self.back.is_some()
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        !self.touches_content() && self.status.is_none()
    }
}

/// Query parameters for `GET /flashcards`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FlashcardListParams {
    #[validate(custom(function = "status_field"))]
    pub status: Option<String>,
    #[validate(custom(function = "source_field"))]
    pub source: Option<String>,
    #[validate(range(min = 1))]
    pub generation_id: Option<DbId>,
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// Owner-independent filter applied by [`crate::repositories::FlashcardRepo`].
#[derive(Debug, Default, Clone)]
pub struct FlashcardFilter {
    pub status: Option<String>,
    pub source: Option<String>,
    pub generation_id: Option<DbId>,
}

impl From<&FlashcardListParams> for FlashcardFilter {
    fn from(params: &FlashcardListParams) -> Self {
        Self {
            status: params.status.clone(),
            source: params.source.clone(),
            generation_id: params.generation_id,
        }
    }
}

/// Query parameters for `GET /flashcards/study`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StudyParams {
    #[validate(custom(function = "study_source_field"))]
    pub source: Option<String>,
}

/// One page of flashcards plus the total number of matching rows.
#[derive(Debug, Serialize)]
pub struct FlashcardPage {
    pub items: Vec<Flashcard>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
