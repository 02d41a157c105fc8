//! In-process review store backed by a map keyed by card id.
use super::ReviewStore;
use crate::error::Result;
use crate::models::{ReviewState, StudyStreak};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    states: HashMap<String, ReviewState>,
    streak: Option<StudyStreak>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl ReviewStore for MemoryStore {
    fn load(&self, card_id: &str) -> Result<Option<ReviewState>> {
        Ok(self.states.get(card_id).cloned())
    }

    fn save(&mut self, state: &ReviewState) -> Result<()> {
        self.states.insert(state.card_id.clone(), state.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<ReviewState>> {
        let mut states: Vec<_> = self.states.values().cloned().collect();
        states.sort_by(|a, b| a.card_id.cmp(&b.card_id));
        Ok(states)
    }

    fn load_streak(&self) -> Result<Option<StudyStreak>> {
        Ok(self.streak.clone())
    }

    fn save_streak(&mut self, streak: &StudyStreak) -> Result<()> {
        self.streak = Some(streak.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_load_or_default_does_not_persist() {
        let store = MemoryStore::new();
        let state = store.load_or_default("a", today()).unwrap();
        assert!(state.is_new());
        assert_eq!(state.next_review_date, today());
        assert!(store.is_empty());
        assert!(store.load("a").unwrap().is_none());
    }

    #[test]
    fn test_read_your_writes() {
        let mut store = MemoryStore::new();
        let mut state = ReviewState::new("a", today());
        state.repetitions = 2;
        state.interval = 6;

        store.save(&state).unwrap();
        store.save(&state).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load("a").unwrap(), Some(state));
    }

    #[test]
    fn test_streak() {
        let mut store = MemoryStore::new();
        assert!(store.load_streak().unwrap().is_none());
        let streak = StudyStreak {
            days: 2,
            last_study_date: today(),
        };
        store.save_streak(&streak).unwrap();
        assert_eq!(store.load_streak().unwrap(), Some(streak));
    }
}
