//! Generation flow: draft cards with the completion service, then persist the
//! generation record and its pending flashcards together.

use flashdeck_core::generation::source_text_length;
use flashdeck_core::types::DbId;
use flashdeck_db::models::generation::{
    CreateGeneration, GenerationWithFlashcards, NewGeneration,
};
use flashdeck_db::repositories::GenerationRepo;
use flashdeck_db::DbPool;
use flashdeck_llm::CompletionClient;

use crate::error::AppResult;

/// Run one generation request for `user_id`.
///
/// `input` must already be validated; the completion service is only called
/// for requests within bounds. Nothing is written unless the service returns
/// at least one usable card, and the generation row and its cards are
/// committed in a single transaction.
pub async fn create_generation(
    pool: &DbPool,
    completion: &dyn CompletionClient,
    user_id: DbId,
    input: &CreateGeneration,
) -> AppResult<GenerationWithFlashcards> {
    let source_text_length = source_text_length(input.source_text())?;

    tracing::info!(
        user_id,
        requested = input.count(),
        source_text_length,
        model = %completion.model(),
        "Requesting flashcard generation",
    );

    let cards =
        flashdeck_llm::generate_cards(completion, input.source_text(), input.count()).await?;

    if cards.len() != input.count() as usize {
        tracing::warn!(
            user_id,
            requested = input.count(),
            returned = cards.len(),
            "Completion returned a different number of flashcards than requested",
        );
    }

    let new_generation = NewGeneration {
        model: completion.model().to_string(),
        source_text_length,
    };
    let result =
        GenerationRepo::create_with_flashcards(pool, user_id, &new_generation, &cards).await?;

    tracing::info!(
        generation_id = result.generation.id,
        user_id,
        generated_count = result.generation.generated_count,
        "Generation stored",
    );

    Ok(result)
}
