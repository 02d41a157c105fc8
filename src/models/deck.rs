//! Deck is the card catalog a study session draws from.
use super::Flashcard;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default = "default_deck_name")]
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

fn default_deck_name() -> String {
    "My Deck".to_string()
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            name: default_deck_name(),
            flashcards: Vec::new(),
        }
    }
}

impl Deck {
    /// Distinct case names, in order of first appearance.
    pub fn cases(&self) -> Vec<String> {
        distinct(self.flashcards.iter().map(|c| c.case.as_str()))
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.flashcards.iter().map(|c| c.category.as_str()))
    }

    pub fn filter_by_case(&self, case: &str) -> Vec<Flashcard> {
        self.flashcards
            .iter()
            .filter(|c| c.case == case)
            .cloned()
            .collect()
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<Flashcard> {
        self.flashcards
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
