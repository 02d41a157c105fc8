pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use database::{MemoryStore, ReviewStore, SqliteStore};
pub use error::{Result, StudyError};
pub use models::{
    Deck, Flashcard, MasteryLevel, Rating, ReviewState, StudyMode, StudyReport, StudySession,
};
