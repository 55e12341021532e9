pub mod auth;
pub mod flashcards;
pub mod generations;
