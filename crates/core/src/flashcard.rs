//! Flashcard status/source vocabulary and lifecycle rules.
//!
//! Flashcards carry two independent attributes:
//!
//! - **source** -- where the card came from (`manual` or `ai`), fixed at creation.
//! - **status** -- whether the card is visible in study mode (`approved`) or
//!   still waiting in the review queue (`pending`).
//!
//! Manual cards are created approved. AI cards are created pending and are
//! promoted by an explicit approve (or a status update).

use validator::ValidationError;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Card is waiting for the owner to review it. Not shown in study mode.
pub const STATUS_PENDING: &str = "pending";
/// Card is active study material.
pub const STATUS_APPROVED: &str = "approved";

/// All valid flashcard statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED];

// ---------------------------------------------------------------------------
// Source constants
// ---------------------------------------------------------------------------

/// Card was typed in by the owner.
pub const SOURCE_MANUAL: &str = "manual";
/// Card was produced by a generation request.
pub const SOURCE_AI: &str = "ai";

/// All valid flashcard sources.
pub const VALID_SOURCES: &[&str] = &[SOURCE_MANUAL, SOURCE_AI];

/// Study-mode filter value meaning "any source".
pub const STUDY_SOURCE_ALL: &str = "all";

/// Upper bound on the number of cards returned for one study session.
pub const MAX_STUDY_CARDS: i64 = 1000;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid flashcard status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate that a source string is one of the known sources.
pub fn validate_source(source: &str) -> Result<(), CoreError> {
    if VALID_SOURCES.contains(&source) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid flashcard source '{source}'. Must be one of: {VALID_SOURCES:?}"
        )))
    }
}

/// `validator` adapter for status fields on request DTOs.
pub fn status_field(status: &str) -> Result<(), ValidationError> {
    validate_status(status).map_err(|_| {
        let mut err = ValidationError::new("status");
        err.message = Some(format!("must be one of: {}", VALID_STATUSES.join(", ")).into());
        err
    })
}

/// `validator` adapter for source filter fields on request DTOs.
pub fn source_field(source: &str) -> Result<(), ValidationError> {
    validate_source(source).map_err(|_| {
        let mut err = ValidationError::new("source");
        err.message = Some(format!("must be one of: {}", VALID_SOURCES.join(", ")).into());
        err
    })
}

/// `validator` adapter for the study-mode source filter (`ai`, `manual`, `all`).
pub fn study_source_field(source: &str) -> Result<(), ValidationError> {
    if source == STUDY_SOURCE_ALL {
        return Ok(());
    }
    source_field(source).map_err(|mut err| {
        err.message = Some(
            format!(
                "must be one of: {}, {STUDY_SOURCE_ALL}",
                VALID_SOURCES.join(", ")
            )
            .into(),
        );
        err
    })
}

/// Rejects strings that are empty or consist only of whitespace.
pub fn non_blank_field(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Resolve the study-mode source filter into an optional SQL filter value.
///
/// `None` and `"all"` mean no source restriction.
pub fn study_source_filter(source: Option<&str>) -> Option<&str> {
    match source {
        None | Some(STUDY_SOURCE_ALL) => None,
        Some(s) => Some(s),
    }
}

// ---------------------------------------------------------------------------
// Edited flag
// ---------------------------------------------------------------------------

/// Decide whether an update marks the card as edited.
///
/// Only AI-sourced cards track edits. The flag is set when the update touches
/// the front or back and does not also set the status: approving a card while
/// correcting it is treated as part of the review, not as an edit.
pub fn marks_edited(source: &str, touches_content: bool, sets_status: bool) -> bool {
    source == SOURCE_AI && touches_content && !sets_status
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
