//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an easiness factor (EF) that adjusts based on performance
//! - The failing grade (Again) resets repetitions, schedules the card for the next day
//!   and lowers EF by 0.2
//! - Passing grades (Hard, Good, Easy) increase the interval progressively
//!   (1 day → 6 days → previous interval × EF)
//! - EF never falls below 1.3
//!
//! Every function here is pure. Persisting the returned state is the caller's job.

use super::review_state::MIN_EASE_FACTOR;
use super::{Rating, ReviewState};
use crate::error::Result;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

const FAIL_EASE_PENALTY: f64 = 0.2;
const FIRST_INTERVAL: u32 = 1;
const SECOND_INTERVAL: u32 = 6;

/// Coarse progress tier, used for reporting only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    New,
    Learning,
    Familiar,
    Mastered,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 4] = [
        MasteryLevel::New,
        MasteryLevel::Learning,
        MasteryLevel::Familiar,
        MasteryLevel::Mastered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MasteryLevel::New => "New",
            MasteryLevel::Learning => "Learning",
            MasteryLevel::Familiar => "Familiar",
            MasteryLevel::Mastered => "Mastered",
        }
    }
}

/// State of a card that has never been reviewed.
pub fn default_state(card_id: impl Into<String>, today: NaiveDate) -> ReviewState {
    ReviewState::new(card_id, today)
}

/// Calendar-day comparison, no time component involved.
pub fn is_due(state: &ReviewState, today: NaiveDate) -> bool {
    state.next_review_date <= today
}

/// Calculates the state that follows `rating` given on `reviewed_on`.
/// The next review date is counted from `reviewed_on`, not from the previous due date.
pub fn apply_rating(state: &ReviewState, rating: Rating, reviewed_on: NaiveDate) -> ReviewState {
    if rating.is_fail() {
        return ReviewState {
            card_id: state.card_id.clone(),
            ease_factor: (state.ease_factor - FAIL_EASE_PENALTY).max(MIN_EASE_FACTOR),
            interval: FIRST_INTERVAL,
            repetitions: 0,
            next_review_date: add_days(reviewed_on, FIRST_INTERVAL),
        };
    }

    let new_interval = match state.repetitions {
        0 => FIRST_INTERVAL,
        1 => SECOND_INTERVAL,
        _ => (state.interval as f64 * state.ease_factor).round() as u32,
    };

    // q = 5 raises EF by 0.1, q = 4 leaves it unchanged, q = 2 lowers it by 0.32
    let q = rating.quality() as f64;
    let new_ef = (state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASE_FACTOR);

    ReviewState {
        card_id: state.card_id.clone(),
        ease_factor: new_ef,
        interval: new_interval,
        repetitions: state.repetitions + 1,
        next_review_date: add_days(reviewed_on, new_interval),
    }
}

/// Validates a raw 0-5 grade before applying it.
pub fn apply_grade(state: &ReviewState, grade: u8, reviewed_on: NaiveDate) -> Result<ReviewState> {
    let rating = Rating::try_from(grade)?;
    Ok(apply_rating(state, rating, reviewed_on))
}

pub fn mastery_level(state: &ReviewState) -> MasteryLevel {
    if state.repetitions == 0 {
        MasteryLevel::New
    } else if state.interval < 7 {
        MasteryLevel::Learning
    } else if state.interval < 21 {
        MasteryLevel::Familiar
    } else {
        MasteryLevel::Mastered
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudyError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(ease_factor: f64, interval: u32, repetitions: u32) -> ReviewState {
        ReviewState {
            card_id: "card".to_string(),
            ease_factor,
            interval,
            repetitions,
            next_review_date: date(2024, 1, 1),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_state_is_due_immediately() {
        let today = date(2024, 3, 10);
        let s = default_state("abc", today);
        assert!(is_due(&s, today));
        assert_eq!(mastery_level(&s), MasteryLevel::New);
    }

    #[test]
    fn test_is_due_compares_dates() {
        let mut s = state(2.5, 6, 2);
        s.next_review_date = date(2024, 1, 8);
        assert!(!is_due(&s, date(2024, 1, 7)));
        assert!(is_due(&s, date(2024, 1, 8)));
        assert!(is_due(&s, date(2024, 2, 1)));
    }

    #[test]
    fn test_first_review() {
        for rating in [Rating::Hard, Rating::Good, Rating::Easy] {
            let next = apply_rating(&state(2.5, 0, 0), rating, date(2024, 1, 1));
            assert_eq!(next.interval, 1);
            assert_eq!(next.repetitions, 1);
            assert_eq!(next.next_review_date, date(2024, 1, 2));
        }
    }

    #[test]
    fn test_second_review_ignores_ease() {
        for ef in [1.3, 2.0, 2.5, 3.1] {
            let next = apply_rating(&state(ef, 1, 1), Rating::Hard, date(2024, 1, 1));
            assert_eq!(next.interval, 6);
            assert_eq!(next.repetitions, 2);
        }
    }

    #[test]
    fn test_later_reviews_multiply_by_previous_ease() {
        let next = apply_rating(&state(2.5, 6, 2), Rating::Easy, date(2024, 1, 8));
        assert_eq!(next.interval, 15);
        assert_eq!(next.repetitions, 3);
        assert_eq!(next.next_review_date, date(2024, 1, 23));

        let next = apply_rating(&state(1.3, 10, 4), Rating::Good, date(2024, 1, 1));
        assert_eq!(next.interval, 13);
    }

    #[test]
    fn test_hard_keeps_progress() {
        let next = apply_rating(&state(2.5, 6, 2), Rating::Hard, date(2024, 1, 8));
        assert_eq!(next.repetitions, 3);
        assert_eq!(next.interval, 15);
        assert!(approx(next.ease_factor, 2.18));
        assert_eq!(next.next_review_date, date(2024, 1, 23));
    }

    #[test]
    fn test_fail_resets() {
        let next = apply_rating(&state(2.5, 10, 5), Rating::Fail, date(2024, 5, 31));
        assert_eq!(next.interval, 1);
        assert_eq!(next.repetitions, 0);
        assert!(approx(next.ease_factor, 2.3));
        assert_eq!(next.next_review_date, date(2024, 6, 1));
    }

    #[test]
    fn test_fail_ease_floor() {
        let next = apply_rating(&state(1.4, 3, 1), Rating::Fail, date(2024, 1, 1));
        assert!(approx(next.ease_factor, 1.3));

        let next = apply_rating(&state(1.3, 1, 1), Rating::Fail, date(2024, 1, 1));
        assert!(approx(next.ease_factor, 1.3));
    }

    #[test]
    fn test_ease_adjustment_per_rating() {
        let today = date(2024, 1, 1);
        assert!(approx(apply_rating(&state(2.5, 6, 2), Rating::Easy, today).ease_factor, 2.6));
        assert!(approx(apply_rating(&state(2.5, 6, 2), Rating::Good, today).ease_factor, 2.5));
        assert!(approx(apply_rating(&state(2.5, 6, 2), Rating::Hard, today).ease_factor, 2.18));
        assert!(approx(apply_rating(&state(1.4, 6, 2), Rating::Hard, today).ease_factor, 1.3));
    }

    #[test]
    fn test_ease_never_below_floor() {
        let mut s = state(2.5, 0, 0);
        let sequence = [
            Rating::Hard,
            Rating::Fail,
            Rating::Hard,
            Rating::Hard,
            Rating::Fail,
            Rating::Fail,
            Rating::Hard,
            Rating::Easy,
            Rating::Fail,
            Rating::Hard,
        ];
        let mut today = date(2024, 1, 1);
        for _ in 0..5 {
            for rating in sequence {
                s = apply_rating(&s, rating, today);
                assert!(s.ease_factor >= MIN_EASE_FACTOR);
                if s.repetitions >= 1 {
                    assert!(s.interval >= 1);
                }
                today = s.next_review_date;
            }
        }
    }

    #[test]
    fn test_review_scenario() {
        let s0 = default_state("c", date(2024, 1, 1));

        let s1 = apply_rating(&s0, Rating::Good, date(2024, 1, 1));
        assert_eq!((s1.repetitions, s1.interval), (1, 1));
        assert_eq!(s1.next_review_date, date(2024, 1, 2));

        let s2 = apply_rating(&s1, Rating::Good, date(2024, 1, 2));
        assert_eq!((s2.repetitions, s2.interval), (2, 6));
        assert_eq!(s2.next_review_date, date(2024, 1, 8));

        let s3 = apply_rating(&s2, Rating::Easy, date(2024, 1, 8));
        assert_eq!(s3.repetitions, 3);
        assert_eq!(s3.interval, (6.0 * s2.ease_factor).round() as u32);
        assert_eq!(s3.next_review_date, date(2024, 1, 8) + Days::new(s3.interval as u64));
    }

    #[test]
    fn test_late_review_counts_from_review_date() {
        let mut s = state(2.5, 6, 2);
        s.next_review_date = date(2024, 1, 8);
        let next = apply_rating(&s, Rating::Good, date(2024, 1, 20));
        assert_eq!(next.next_review_date, date(2024, 2, 4));
    }

    #[test]
    fn test_apply_grade_rejects_unknown_grades() {
        let s = state(2.5, 0, 0);
        assert!(matches!(
            apply_grade(&s, 3, date(2024, 1, 1)),
            Err(StudyError::InvalidRating(3))
        ));
        assert_eq!(apply_grade(&s, 4, date(2024, 1, 1)).unwrap().interval, 1);
    }

    #[test]
    fn test_mastery_tiers() {
        assert_eq!(mastery_level(&state(2.5, 0, 0)), MasteryLevel::New);
        assert_eq!(mastery_level(&state(2.5, 1, 1)), MasteryLevel::Learning);
        assert_eq!(mastery_level(&state(2.5, 6, 2)), MasteryLevel::Learning);
        assert_eq!(mastery_level(&state(2.5, 7, 3)), MasteryLevel::Familiar);
        assert_eq!(mastery_level(&state(2.5, 20, 3)), MasteryLevel::Familiar);
        assert_eq!(mastery_level(&state(2.5, 21, 4)), MasteryLevel::Mastered);
    }
}
