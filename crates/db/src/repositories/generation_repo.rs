//! Repository for the `generations` table.

use flashdeck_core::generation::GeneratedCard;
use flashdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::generation::{Generation, GenerationWithFlashcards, NewGeneration};
use crate::repositories::FlashcardRepo;

/// Column list for `generations` queries.
const COLUMNS: &str = "id, user_id, model, generated_count, source_text_length, created_at";

/// Provides insert and owner-scoped reads for generation records.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a generation and all of its flashcards in one transaction.
    ///
    /// `generated_count` is taken from `cards.len()`. If either insert fails
    /// nothing is committed.
    pub async fn create_with_flashcards(
        pool: &PgPool,
        user_id: DbId,
        input: &NewGeneration,
        cards: &[GeneratedCard],
    ) -> Result<GenerationWithFlashcards, sqlx::Error> {
        let generated_count = i32::try_from(cards.len())
            .map_err(|e| sqlx::Error::Protocol(format!("generated_count out of range: {e}")))?;

        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO generations \
                (user_id, model, generated_count, source_text_length) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let generation = sqlx::query_as::<_, Generation>(&insert_query)
            .bind(user_id)
            .bind(&input.model)
            .bind(generated_count)
            .bind(input.source_text_length)
            .fetch_one(&mut *tx)
            .await?;

        let flashcards =
            FlashcardRepo::create_generated(&mut tx, user_id, generation.id, cards).await?;

        tx.commit().await?;

        tracing::debug!(
            generation_id = generation.id,
            user_id,
            generated_count,
            "Generation and flashcards committed",
        );

        Ok(GenerationWithFlashcards {
            generation,
            flashcards,
        })
    }

    /// Find a generation by id, only if it belongs to `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's generations, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Generation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generations \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
