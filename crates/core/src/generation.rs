//! Bounds and value types for AI-assisted flashcard generation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum source text length, in characters.
pub const MIN_SOURCE_TEXT_CHARS: u64 = 1_000;
/// Maximum source text length, in characters.
pub const MAX_SOURCE_TEXT_CHARS: u64 = 10_000;

/// Minimum number of cards a single request may ask for.
pub const MIN_CARD_COUNT: i32 = 1;
/// Maximum number of cards a single request may ask for.
pub const MAX_CARD_COUNT: i32 = 50;

/// One front/back pair proposed by the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub front: String,
    pub back: String,
}

/// Length of the source text as stored on the generation record.
///
/// Counted in Unicode scalar values so the stored number matches the bounds
/// the request was validated against.
pub fn source_text_length(source_text: &str) -> Result<i32, CoreError> {
    i32::try_from(source_text.chars().count())
        .map_err(|_| CoreError::Validation("Source text is too long".into()))
}

/// Trim proposed cards and drop the ones with an empty side.
pub fn usable_cards(cards: Vec<GeneratedCard>) -> Vec<GeneratedCard> {
    cards
        .into_iter()
        .filter_map(|card| {
            let front = card.front.trim();
            let back = card.back.trim();
            if front.is_empty() || back.is_empty() {
                None
            } else {
                Some(GeneratedCard {
                    front: front.to_string(),
                    back: back.to_string(),
                })
            }
        })
        .collect()
}
