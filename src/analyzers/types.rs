//! Data types produced by the aggregators.

use std::fmt;
use std::time::Duration;

use chrono::{Month, Weekday};
use serde::Serialize;

pub const NO_DATA: &str = "No data available";

/// A statistic that may not be computable for a given dataset, either because
/// its column is absent from the city's schema or because no rows have a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stat<T> {
    Available(T),
    Unavailable,
}

impl<T> Stat<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Stat::Available(_))
    }

    pub fn as_ref(&self) -> Stat<&T> {
        match self {
            Stat::Available(v) => Stat::Available(v),
            Stat::Unavailable => Stat::Unavailable,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stat<U> {
        match self {
            Stat::Available(v) => Stat::Available(f(v)),
            Stat::Unavailable => Stat::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Stat::Available(v),
            None => Stat::Unavailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Stat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Available(v) => v.fmt(f),
            Stat::Unavailable => f.write_str(NO_DATA),
        }
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Stat<Month>,
    pub weekday: Stat<Weekday>,
    pub hour: Stat<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Stat<String>,
    pub end_station: Stat<String>,
    pub trip: Stat<StationPair>,
}

/// Total and mean trip duration, kept in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: f64,
    pub mean_seconds: Stat<f64>,
}

impl DurationStats {
    pub fn total_days(&self) -> f64 {
        self.total_seconds / 86_400.0
    }

    pub fn mean_minutes(&self) -> Stat<f64> {
        self.mean_seconds.clone().map(|s| s / 60.0)
    }
}

/// Rider breakdown. Only `user_types` is guaranteed; the rest depend on the
/// city's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Stat<Vec<(String, usize)>>,
    pub earliest_birth_year: Stat<i32>,
    pub latest_birth_year: Stat<i32>,
    pub common_birth_year: Stat<i32>,
}

/// A computed value and how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}
