//! Consecutive-day study streak.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStreak {
    pub days: u32,
    pub last_study_date: NaiveDate,
}

impl StudyStreak {
    /// Streak after studying on `today`, given the previously stored streak.
    pub fn record(previous: Option<&StudyStreak>, today: NaiveDate) -> StudyStreak {
        let days = match previous {
            Some(prev) if prev.last_study_date == today => return prev.clone(),
            Some(prev) if prev.last_study_date.succ_opt() == Some(today) => prev.days + 1,
            _ => 1,
        };

        StudyStreak {
            days,
            last_study_date: today,
        }
    }

    /// Streak length as seen on `today`; a streak not continued yesterday or today is broken.
    pub fn current_days(&self, today: NaiveDate) -> u32 {
        if self.last_study_date == today || self.last_study_date.succ_opt() == Some(today) {
            self.days
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_first_study_starts_streak() {
        let streak = StudyStreak::record(None, date(5));
        assert_eq!(streak.days, 1);
        assert_eq!(streak.last_study_date, date(5));
    }

    #[test]
    fn test_same_day_unchanged() {
        let prev = StudyStreak {
            days: 3,
            last_study_date: date(5),
        };
        assert_eq!(StudyStreak::record(Some(&prev), date(5)), prev);
    }

    #[test]
    fn test_consecutive_day_extends() {
        let prev = StudyStreak {
            days: 3,
            last_study_date: date(5),
        };
        assert_eq!(StudyStreak::record(Some(&prev), date(6)).days, 4);
    }

    #[test]
    fn test_gap_resets() {
        let prev = StudyStreak {
            days: 3,
            last_study_date: date(5),
        };
        let next = StudyStreak::record(Some(&prev), date(8));
        assert_eq!(next.days, 1);
        assert_eq!(next.last_study_date, date(8));
    }

    #[test]
    fn test_current_days() {
        let streak = StudyStreak {
            days: 4,
            last_study_date: date(5),
        };
        assert_eq!(streak.current_days(date(5)), 4);
        assert_eq!(streak.current_days(date(6)), 4);
        assert_eq!(streak.current_days(date(7)), 0);
    }
}
