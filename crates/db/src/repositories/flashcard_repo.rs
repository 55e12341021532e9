//! Repository for the `flashcards` table.

use flashdeck_core::flashcard::{
    MAX_STUDY_CARDS, SOURCE_AI, SOURCE_MANUAL, STATUS_APPROVED, STATUS_PENDING,
};
use flashdeck_core::generation::GeneratedCard;
use flashdeck_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgConnection, PgPool, Postgres};

use crate::models::flashcard::{CreateFlashcard, Flashcard, FlashcardFilter, UpdateFlashcard};

/// Column list for `flashcards` queries.
const COLUMNS: &str = "\
    id, user_id, generation_id, front, back, source, status, \
    is_edited, created_at, updated_at";

/// Provides owner-scoped CRUD operations for flashcards.
pub struct FlashcardRepo;

impl FlashcardRepo {
    /// Insert a manually written card. Always `manual` and `approved`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFlashcard,
    ) -> Result<Flashcard, sqlx::Error> {
        let query = format!(
            "INSERT INTO flashcards (user_id, front, back, source, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(user_id)
            .bind(input.front())
            .bind(input.back())
            .bind(SOURCE_MANUAL)
            .bind(STATUS_APPROVED)
            .fetch_one(pool)
            .await
    }

    /// Batch-insert generated cards as `ai` / `pending` children of a generation.
    ///
    /// Takes a connection so the caller can run it inside the same
    /// transaction as the generation insert. Rows come back ordered by id,
    /// which matches the order of `cards`.
    pub async fn create_generated(
        conn: &mut PgConnection,
        user_id: DbId,
        generation_id: DbId,
        cards: &[GeneratedCard],
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        if cards.is_empty() {
            return Ok(vec![]);
        }

        let fronts: Vec<String> = cards.iter().map(|c| c.front.clone()).collect();
        let backs: Vec<String> = cards.iter().map(|c| c.back.clone()).collect();

        let query = format!(
            "WITH inserted AS ( \
                INSERT INTO flashcards (user_id, generation_id, front, back, source, status) \
                SELECT $1, $2, t.front, t.back, $5, $6 \
                FROM UNNEST($3::text[], $4::text[]) WITH ORDINALITY AS t(front, back, ord) \
                ORDER BY t.ord \
                RETURNING {COLUMNS} \
             ) \
             SELECT {COLUMNS} FROM inserted ORDER BY id"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(user_id)
            .bind(generation_id)
            .bind(&fronts)
            .bind(&backs)
            .bind(SOURCE_AI)
            .bind(STATUS_PENDING)
            .fetch_all(&mut *conn)
            .await
    }

    /// Find a card by id, only if it belongs to `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flashcards WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of the owner's cards, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        user_id: DbId,
        filter: &FlashcardFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_filter(user_id, filter);

        let query = format!(
            "SELECT {COLUMNS} FROM flashcards {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_values_as(sqlx::query_as::<_, Flashcard>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count the owner's cards matching the filter (for pagination metadata).
    pub async fn count_filtered(
        pool: &PgPool,
        user_id: DbId,
        filter: &FlashcardFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_filter(user_id, filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM flashcards {where_clause}");

        let q = bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// All approved cards for a study session, oldest first, capped at
    /// [`MAX_STUDY_CARDS`].
    pub async fn list_for_study(
        pool: &PgPool,
        user_id: DbId,
        source: Option<&str>,
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcards \
             WHERE user_id = $1 AND status = $2 \
               AND ($3::text IS NULL OR source = $3) \
             ORDER BY created_at ASC, id ASC \
             LIMIT $4"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(user_id)
            .bind(STATUS_APPROVED)
            .bind(source)
            .bind(MAX_STUDY_CARDS)
            .fetch_all(pool)
            .await
    }

    /// List the owner's cards that belong to one generation, in insert order.
    pub async fn list_by_generation(
        pool: &PgPool,
        user_id: DbId,
        generation_id: DbId,
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcards \
             WHERE user_id = $1 AND generation_id = $2 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(user_id)
            .bind(generation_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields are written.
    ///
    /// `mark_edited` can only raise `is_edited`, never clear it.
    /// Returns `None` if no row matches both `id` and `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateFlashcard,
        mark_edited: bool,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        let query = format!(
            "UPDATE flashcards SET \
                front = COALESCE($3, front), \
                back = COALESCE($4, back), \
                status = COALESCE($5, status), \
                is_edited = is_edited OR $6 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.front)
            .bind(&input.back)
            .bind(&input.status)
            .bind(mark_edited)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a card. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// A typed bind value for dynamically built filters.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build the WHERE clause for a filtered listing.
///
/// The owner condition is always first. Returns the clause, the values to
/// bind in order, and the next free placeholder index.
fn build_filter(user_id: DbId, filter: &FlashcardFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["user_id = $1".to_string()];
    let mut bind_values: Vec<BindValue> = vec![BindValue::BigInt(user_id)];
    let mut bind_idx = 2u32;

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(ref source) = filter.source {
        conditions.push(format!("source = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(source.clone()));
    }

    if let Some(generation_id) = filter.generation_id {
        conditions.push(format!("generation_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(generation_id));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

fn bind_values_as<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}

fn bind_values_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
