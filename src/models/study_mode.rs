//! Which cards a session is built from.
use super::{Deck, Flashcard, sm2};
use crate::database::ReviewStore;
use crate::error::Result;
use chrono::NaiveDate;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyMode {
    All,
    /// Cards never rated, or whose review date has arrived
    Due,
    Case(String),
    Category(String),
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyMode::All => write!(f, "all cards"),
            StudyMode::Due => write!(f, "due cards"),
            StudyMode::Case(name) => write!(f, "case '{name}'"),
            StudyMode::Category(name) => write!(f, "category '{name}'"),
        }
    }
}

pub fn select_cards<S: ReviewStore + ?Sized>(
    deck: &Deck,
    mode: &StudyMode,
    store: &S,
    today: NaiveDate,
) -> Result<Vec<Flashcard>> {
    match mode {
        StudyMode::All => Ok(deck.flashcards.clone()),
        StudyMode::Case(name) => Ok(deck.filter_by_case(name)),
        StudyMode::Category(name) => Ok(deck.filter_by_category(name)),
        StudyMode::Due => {
            let mut due = Vec::new();
            for card in &deck.flashcards {
                let is_due = match store.load(&card.id)? {
                    Some(state) => sm2::is_due(&state, today),
                    None => true,
                };
                if is_due {
                    due.push(card.clone());
                }
            }
            Ok(due)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::ReviewState;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn card(id: &str, case: &str, category: &str) -> Flashcard {
        Flashcard {
            id: id.to_string(),
            case: case.to_string(),
            category: category.to_string(),
            question: String::new(),
            answer: String::new(),
            explanation: String::new(),
        }
    }

    fn deck() -> Deck {
        Deck {
            name: "d".to_string(),
            flashcards: vec![
                card("new", "Hip", "Anatomy"),
                card("due", "Knee", "Anatomy"),
                card("later", "Hip", "Trauma"),
            ],
        }
    }

    fn ids(cards: Vec<Flashcard>) -> Vec<String> {
        cards.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_due_mode_includes_unrated_and_due() {
        let mut store = MemoryStore::new();
        let mut due = ReviewState::new("due", date(1));
        due.next_review_date = date(5);
        let mut later = ReviewState::new("later", date(1));
        later.next_review_date = date(6);
        store.save(&due).unwrap();
        store.save(&later).unwrap();

        let selected = select_cards(&deck(), &StudyMode::Due, &store, date(5)).unwrap();
        assert_eq!(ids(selected), vec!["new", "due"]);
    }

    #[test]
    fn test_filter_modes() {
        let store = MemoryStore::new();
        let d = deck();
        let today = date(1);

        assert_eq!(select_cards(&d, &StudyMode::All, &store, today).unwrap().len(), 3);
        assert_eq!(
            ids(select_cards(&d, &StudyMode::Case("Hip".into()), &store, today).unwrap()),
            vec!["new", "later"]
        );
        assert_eq!(
            ids(select_cards(&d, &StudyMode::Category("Anatomy".into()), &store, today).unwrap()),
            vec!["new", "due"]
        );
    }
}
