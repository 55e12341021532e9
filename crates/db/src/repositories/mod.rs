mod flashcard_repo;
mod generation_repo;
mod user_repo;

pub use flashcard_repo::FlashcardRepo;
pub use generation_repo::GenerationRepo;
pub use user_repo::UserRepo;
