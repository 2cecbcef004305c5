use crate::models::TimeEntry;
use chrono::{Datelike, Duration, NaiveDate};

const WORKDAYS: usize = 5;

/// Monday to Friday of the calendar week containing a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub monday: NaiveDate,
    pub friday: NaiveDate,
}

impl WeekWindow {
    pub fn containing(today: NaiveDate) -> Self {
        let monday = week_start(today);
        Self {
            monday,
            friday: monday + Duration::days(WORKDAYS as i64 - 1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.friday
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        (0..WORKDAYS as i64).map(move |offset| self.monday + Duration::days(offset))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub date: NaiveDate,
    pub hours: f64,
}

impl DayCard {
    pub fn has_hours(&self) -> bool {
        self.hours > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub weekly_hours: f64,
    pub weekly_pay: f64,
    pub lifetime_hours: f64,
}

impl Summary {
    pub fn compute(entries: &[TimeEntry], hourly_rate: f64, today: NaiveDate) -> Self {
        let weekly_hours = weekly_hours(entries, WeekWindow::containing(today));
        Self {
            weekly_hours,
            weekly_pay: pay(weekly_hours, hourly_rate),
            lifetime_hours: total_hours(entries.iter()),
        }
    }
}

pub fn weekly_hours(entries: &[TimeEntry], window: WeekWindow) -> f64 {
    total_hours(entries.iter().filter(|entry| window.contains(entry.date)))
}

/// Sum of hours per weekday of the current week, Monday first.
pub fn day_cards(entries: &[TimeEntry], today: NaiveDate) -> Vec<DayCard> {
    WeekWindow::containing(today)
        .days()
        .map(|date| DayCard {
            date,
            hours: total_hours(entries.iter().filter(|entry| entry.date == date)),
        })
        .collect()
}

/// `hours * rate`, rounded to cents.
pub fn pay(hours: f64, rate: f64) -> f64 {
    round_cents(hours * rate)
}

/// Rounds to two decimals. Values too large to scale are already whole.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

// Folds from +0.0; `Sum` yields -0.0 for no items, which prints as "-0".
fn total_hours<'a>(entries: impl Iterator<Item = &'a TimeEntry>) -> f64 {
    entries.fold(0.0, |sum, entry| sum + entry.hours)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
