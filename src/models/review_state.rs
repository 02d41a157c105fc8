//! Per-card scheduling state, keyed by card id.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub card_id: String,
    pub ease_factor: f64,
    /// Days until the next review
    pub interval: u32,
    /// Consecutive passing reviews since the last failure
    pub repetitions: u32,
    pub next_review_date: NaiveDate,
}

impl ReviewState {
    /// Fresh state for a card that has never been reviewed. Due on `today`.
    pub fn new(card_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            card_id: card_id.into(),
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review_date: today,
        }
    }

    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }
}
