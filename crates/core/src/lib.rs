//! Domain rules shared by the Flashdeck database and API layers.
//!
//! Nothing in this crate performs I/O: it holds the status/source vocabulary,
//! the edited-flag rule, generation bounds, and pagination limits.

pub mod error;
pub mod flashcard;
pub mod generation;
pub mod pagination;
pub mod types;
