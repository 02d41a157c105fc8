//! Persistence of review state.
//!
//! The scheduler and the session only talk to storage through [`ReviewStore`].
//! A read that follows a write on the same store must observe that write.

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{ReviewState, StudyStreak};
use chrono::NaiveDate;

pub trait ReviewStore {
    /// Stored state for `card_id`, or `None` if the card was never rated.
    fn load(&self, card_id: &str) -> Result<Option<ReviewState>>;

    /// Inserts or replaces the state for `state.card_id`. Saving the same state twice is harmless.
    fn save(&mut self, state: &ReviewState) -> Result<()>;

    fn load_all(&self) -> Result<Vec<ReviewState>>;

    fn load_streak(&self) -> Result<Option<StudyStreak>>;

    fn save_streak(&mut self, streak: &StudyStreak) -> Result<()>;

    /// Writes the outcome of one rating: the new review state, then the streak if it changed.
    /// If the review state cannot be written, the streak is left untouched.
    fn save_review(&mut self, state: &ReviewState, streak: Option<&StudyStreak>) -> Result<()> {
        self.save(state)?;
        if let Some(streak) = streak {
            self.save_streak(streak)?;
        }
        Ok(())
    }

    /// Stored state, or a fresh one that is not persisted until first rated.
    fn load_or_default(&self, card_id: &str, today: NaiveDate) -> Result<ReviewState> {
        Ok(self
            .load(card_id)?
            .unwrap_or_else(|| ReviewState::new(card_id, today)))
    }
}

impl<S: ReviewStore + ?Sized> ReviewStore for &mut S {
    fn load(&self, card_id: &str) -> Result<Option<ReviewState>> {
        (**self).load(card_id)
    }

    fn save(&mut self, state: &ReviewState) -> Result<()> {
        (**self).save(state)
    }

    fn load_all(&self) -> Result<Vec<ReviewState>> {
        (**self).load_all()
    }

    fn load_streak(&self) -> Result<Option<StudyStreak>> {
        (**self).load_streak()
    }

    fn save_streak(&mut self, streak: &StudyStreak) -> Result<()> {
        (**self).save_streak(streak)
    }

    fn save_review(&mut self, state: &ReviewState, streak: Option<&StudyStreak>) -> Result<()> {
        (**self).save_review(state, streak)
    }
}
