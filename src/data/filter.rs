//! Month / weekday selection over a loaded dataset.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use thiserror::Error;

use crate::data::trip::{Dataset, TripRecord, weekday_name};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a month name or \"All\"")]
pub struct InvalidMonth(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a day name or \"All\"")]
pub struct InvalidDay(pub String);

pub fn month_names() -> impl Iterator<Item = &'static str> {
    MONTHS.iter().map(|m| m.name())
}

pub fn day_names() -> impl Iterator<Item = &'static str> {
    WEEKDAYS.iter().map(|d| weekday_name(*d))
}

fn is_all(s: &str) -> bool {
    s.eq_ignore_ascii_case("all")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl FromStr for MonthFilter {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_all(s) {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .map(MonthFilter::Only)
            .ok_or_else(|| InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Only(month) => f.write_str(month.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl FromStr for DayFilter {
    type Err = InvalidDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_all(s) {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
            .map(DayFilter::Only)
            .ok_or_else(|| InvalidDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// Which trips to keep, by derived start month and weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    pub fn is_identity(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::Only(month) => trip.month() == month,
        };
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Only(day) => trip.weekday() == day,
        };
        month_ok && day_ok
    }

    /// Returns the matching subset of `dataset`. The input is never modified;
    /// when nothing is filtered it is handed back borrowed, without a copy.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Cow<'a, Dataset> {
        if self.is_identity() {
            return Cow::Borrowed(dataset);
        }
        let records = dataset
            .iter()
            .filter(|trip| self.matches(trip))
            .cloned()
            .collect();
        Cow::Owned(Dataset::new(dataset.schema().clone(), records))
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month: {}, day: {}", self.month, self.day)
    }
}
