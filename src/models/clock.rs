//! Source of the current calendar date.
use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven date, for tests and for simulating the passage of days.
#[derive(Clone, Debug)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Advances the date by `days`.
    pub fn advance_days(&self, days: u64) {
        let next = self
            .date
            .get()
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.date.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
