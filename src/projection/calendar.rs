use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Answers whether a calendar date is a holiday.
pub trait HolidayLookup {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Holiday calendar of one tenant.
///
/// Holds one-off dates plus recurring month/day pairs that match every year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
    recurring: BTreeSet<(u32, u32)>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_date(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    /// Registers a holiday repeating every year on the month/day of `date`.
    pub fn add_recurring(&mut self, date: NaiveDate) {
        self.recurring.insert((date.month(), date.day()));
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.add_date(date);
        self
    }

    pub fn with_recurring(mut self, date: NaiveDate) -> Self {
        self.add_recurring(date);
        self
    }

    pub fn len(&self) -> usize {
        self.dates.len() + self.recurring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.recurring.is_empty()
    }
}

impl HolidayLookup for HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date) || self.recurring.contains(&(date.month(), date.day()))
    }
}

impl FromIterator<(NaiveDate, bool)> for HolidayCalendar {
    /// Builds a calendar from `(date, recurring)` pairs.
    fn from_iter<I: IntoIterator<Item = (NaiveDate, bool)>>(iter: I) -> Self {
        let mut calendar = Self::new();
        for (date, recurring) in iter {
            if recurring {
                calendar.add_recurring(date);
            } else {
                calendar.add_date(date);
            }
        }
        calendar
    }
}
