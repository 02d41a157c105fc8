//! Read-only progress figures derived from stored review state.
use super::sm2::{self, MasteryLevel};
use super::{Flashcard, ReviewState, StudyStreak};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MasteryBreakdown {
    pub new: usize,
    pub learning: usize,
    pub familiar: usize,
    pub mastered: usize,
}

impl MasteryBreakdown {
    pub fn add(&mut self, level: MasteryLevel) {
        match level {
            MasteryLevel::New => self.new += 1,
            MasteryLevel::Learning => self.learning += 1,
            MasteryLevel::Familiar => self.familiar += 1,
            MasteryLevel::Mastered => self.mastered += 1,
        }
    }

    pub fn count(&self, level: MasteryLevel) -> usize {
        match level {
            MasteryLevel::New => self.new,
            MasteryLevel::Learning => self.learning,
            MasteryLevel::Familiar => self.familiar,
            MasteryLevel::Mastered => self.mastered,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.learning + self.familiar + self.mastered
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseProgress {
    pub case: String,
    pub total: usize,
    /// Cards with at least one passing review since their last failure
    pub studied: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudyReport {
    pub total_cards: usize,
    pub due_count: usize,
    pub mastery: MasteryBreakdown,
    pub by_case: Vec<CaseProgress>,
    pub streak_days: u32,
}

impl StudyReport {
    /// Cards without a stored state count as new and due.
    pub fn build(
        cards: &[Flashcard],
        states: &[ReviewState],
        today: NaiveDate,
        streak: Option<&StudyStreak>,
    ) -> Self {
        let by_id: HashMap<&str, &ReviewState> =
            states.iter().map(|s| (s.card_id.as_str(), s)).collect();

        let mut due_count = 0;
        let mut mastery = MasteryBreakdown::default();
        let mut by_case: Vec<CaseProgress> = Vec::new();

        for card in cards {
            let state = by_id.get(card.id.as_str()).copied();

            if state.is_none_or(|s| sm2::is_due(s, today)) {
                due_count += 1;
            }
            mastery.add(state.map_or(MasteryLevel::New, sm2::mastery_level));

            let studied = state.is_some_and(|s| s.repetitions > 0);
            match by_case.iter_mut().find(|p| p.case == card.case) {
                Some(progress) => {
                    progress.total += 1;
                    progress.studied += studied as usize;
                }
                None => by_case.push(CaseProgress {
                    case: card.case.clone(),
                    total: 1,
                    studied: studied as usize,
                }),
            }
        }

        StudyReport {
            total_cards: cards.len(),
            due_count,
            mastery,
            by_case,
            streak_days: streak.map_or(0, |s| s.current_days(today)),
        }
    }
}
