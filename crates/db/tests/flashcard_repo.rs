//! Integration tests for the flashcard repository.
//!
//! Exercises owner scoping, list filters, study selection and the edited
//! flag against a real database.

use flashdeck_core::generation::GeneratedCard;
use flashdeck_db::models::flashcard::{CreateFlashcard, FlashcardFilter, UpdateFlashcard};
use flashdeck_db::models::generation::NewGeneration;
use flashdeck_db::models::user::CreateUser;
use flashdeck_db::repositories::{FlashcardRepo, GenerationRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
    .id
}

fn manual(front: &str, back: &str) -> CreateFlashcard {
    CreateFlashcard::new(front, back)
}

fn generated(n: usize) -> Vec<GeneratedCard> {
    (1..=n)
        .map(|i| GeneratedCard {
            front: format!("Q{i}"),
            back: format!("A{i}"),
        })
        .collect()
}

async fn new_generation(pool: &PgPool, user_id: i64, n: usize) -> i64 {
    let input = NewGeneration {
        model: "test-model".to_string(),
        source_text_length: 1500,
    };
    GenerationRepo::create_with_flashcards(pool, user_id, &input, &generated(n))
        .await
        .expect("generation insert should succeed")
        .generation
        .id
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_cards_are_approved_and_unedited(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;

    let card = FlashcardRepo::create(&pool, user, &manual("Capital of France?", "Paris"))
        .await
        .unwrap();

    assert_eq!(card.user_id, user);
    assert_eq!(card.front, "Capital of France?");
    assert_eq!(card.source, "manual");
    assert_eq!(card.status, "approved");
    assert!(!card.is_edited);
    assert!(card.generation_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cards_are_invisible_to_other_users(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com").await;
    let other = new_user(&pool, "other@test.com").await;
    let card = FlashcardRepo::create(&pool, owner, &manual("Q", "A"))
        .await
        .unwrap();

    assert!(FlashcardRepo::find_by_id(&pool, card.id, other)
        .await
        .unwrap()
        .is_none());
    assert!(FlashcardRepo::find_by_id(&pool, card.id, owner)
        .await
        .unwrap()
        .is_some());

    let patch = UpdateFlashcard {
        front: Some("hijacked".into()),
        ..Default::default()
    };
    assert!(FlashcardRepo::update(&pool, card.id, other, &patch, false)
        .await
        .unwrap()
        .is_none());
    assert!(!FlashcardRepo::delete(&pool, card.id, other).await.unwrap());

    let unchanged = FlashcardRepo::find_by_id(&pool, card.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.front, "Q");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_and_counts_match(pool: PgPool) {
    let user = new_user(&pool, "list@test.com").await;
    FlashcardRepo::create(&pool, user, &manual("m1", "b"))
        .await
        .unwrap();
    FlashcardRepo::create(&pool, user, &manual("m2", "b"))
        .await
        .unwrap();
    let generation_id = new_generation(&pool, user, 3).await;

    let all = FlashcardFilter::default();
    assert_eq!(
        FlashcardRepo::count_filtered(&pool, user, &all).await.unwrap(),
        5
    );

    let pending = FlashcardFilter {
        status: Some("pending".into()),
        ..Default::default()
    };
    let items = FlashcardRepo::list_filtered(&pool, user, &pending, 20, 0)
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|c| c.source == "ai"));

    let by_generation = FlashcardFilter {
        generation_id: Some(generation_id),
        source: Some("ai".into()),
        ..Default::default()
    };
    assert_eq!(
        FlashcardRepo::count_filtered(&pool, user, &by_generation)
            .await
            .unwrap(),
        3
    );

    let manual_only = FlashcardFilter {
        source: Some("manual".into()),
        ..Default::default()
    };
    assert_eq!(
        FlashcardRepo::count_filtered(&pool, user, &manual_only)
            .await
            .unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_pages_newest_first(pool: PgPool) {
    let user = new_user(&pool, "page@test.com").await;
    for i in 1..=5 {
        FlashcardRepo::create(&pool, user, &manual(&format!("card {i}"), "b"))
            .await
            .unwrap();
    }

    let all = FlashcardFilter::default();
    let first = FlashcardRepo::list_filtered(&pool, user, &all, 2, 0)
        .await
        .unwrap();
    let second = FlashcardRepo::list_filtered(&pool, user, &all, 2, 2)
        .await
        .unwrap();
    let past_end = FlashcardRepo::list_filtered(&pool, user, &all, 2, 10)
        .await
        .unwrap();

    let fronts: Vec<_> = first.iter().chain(&second).map(|c| c.front.as_str()).collect();
    assert_eq!(fronts, ["card 5", "card 4", "card 3", "card 2"]);
    assert!(past_end.is_empty());
}

// ---------------------------------------------------------------------------
// Study
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn study_returns_only_approved_cards_oldest_first(pool: PgPool) {
    let user = new_user(&pool, "study@test.com").await;
    let first = FlashcardRepo::create(&pool, user, &manual("first", "b"))
        .await
        .unwrap();
    let generation_id = new_generation(&pool, user, 2).await;
    let ai_cards = FlashcardRepo::list_by_generation(&pool, user, generation_id)
        .await
        .unwrap();

    // Approve one of the two AI cards.
    FlashcardRepo::update(&pool, ai_cards[0].id, user, &UpdateFlashcard::approve(), false)
        .await
        .unwrap();

    let deck = FlashcardRepo::list_for_study(&pool, user, None).await.unwrap();
    let ids: Vec<_> = deck.iter().map(|c| c.id).collect();
    assert_eq!(ids, [first.id, ai_cards[0].id]);

    let ai_only = FlashcardRepo::list_for_study(&pool, user, Some("ai"))
        .await
        .unwrap();
    assert_eq!(ai_only.len(), 1);
    assert_eq!(ai_only[0].source, "ai");

    let manual_only = FlashcardRepo::list_for_study(&pool, user, Some("manual"))
        .await
        .unwrap();
    assert_eq!(manual_only.len(), 1);
    assert_eq!(manual_only[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn study_is_capped_at_one_thousand_cards(pool: PgPool) {
    let user = new_user(&pool, "cap@test.com").await;
    sqlx::query(
        "INSERT INTO flashcards (user_id, front, back, source, status) \
         SELECT $1, 'Q' || n, 'A' || n, 'manual', 'approved' \
         FROM generate_series(1, 1001) AS n ORDER BY n",
    )
    .bind(user)
    .execute(&pool)
    .await
    .unwrap();

    let deck = FlashcardRepo::list_for_study(&pool, user, None).await.unwrap();

    assert_eq!(deck.len(), 1000);
    assert_eq!(deck[0].front, "Q1");
    assert_eq!(deck[999].front, "Q1000");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_keeps_unspecified_fields_and_sticky_edited_flag(pool: PgPool) {
    let user = new_user(&pool, "upd@test.com").await;
    let generation_id = new_generation(&pool, user, 1).await;
    let card = FlashcardRepo::list_by_generation(&pool, user, generation_id)
        .await
        .unwrap()
        .remove(0);

    let patch = UpdateFlashcard {
        back: Some("better answer".into()),
        ..Default::default()
    };
    let edited = FlashcardRepo::update(&pool, card.id, user, &patch, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.front, card.front);
    assert_eq!(edited.back, "better answer");
    assert_eq!(edited.status, "pending");
    assert!(edited.is_edited);
    assert!(edited.updated_at >= card.updated_at);

    // A later status-only change never clears the flag.
    let approved = FlashcardRepo::update(&pool, card.id, user, &UpdateFlashcard::approve(), false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, "approved");
    assert!(approved.is_edited);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_card_leaves_its_generation(pool: PgPool) {
    let user = new_user(&pool, "del@test.com").await;
    let generation_id = new_generation(&pool, user, 2).await;
    let cards = FlashcardRepo::list_by_generation(&pool, user, generation_id)
        .await
        .unwrap();

    assert!(FlashcardRepo::delete(&pool, cards[0].id, user).await.unwrap());
    assert!(!FlashcardRepo::delete(&pool, cards[0].id, user).await.unwrap());

    let generation = GenerationRepo::find_by_id(&pool, generation_id, user)
        .await
        .unwrap()
        .expect("generation must survive card deletion");
    assert_eq!(generation.generated_count, 2);

    let remaining = FlashcardRepo::list_by_generation(&pool, user, generation_id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, cards[1].id);
}
