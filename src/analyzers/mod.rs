//! Descriptive statistics over a (filtered) trip dataset.
//!
//! Each aggregator is an independent pure function of the dataset. Optional
//! statistics come back as [`types::Stat`]; aggregators with a required column
//! return an [`AnalysisError`] when it is missing, without affecting the others.

pub mod duration;
pub mod stations;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;

use std::time::Instant;

use tracing::debug;

use crate::data::Dataset;
use crate::error::AnalysisError;
use types::{DurationStats, StationStats, TimeStats, Timed, UserStats};

/// Runs `f`, recording its wall-clock time.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let started = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: started.elapsed(),
    }
}

/// All four aggregator results for one dataset.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub rows: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<Result<StationStats, AnalysisError>>,
    pub durations: Timed<Result<DurationStats, AnalysisError>>,
    pub users: Timed<Result<UserStats, AnalysisError>>,
}

#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn analyze(dataset: &Dataset) -> Analysis {
    let analysis = Analysis {
        rows: dataset.len(),
        time: timed(|| time::time_stats(dataset)),
        stations: timed(|| stations::station_stats(dataset)),
        durations: timed(|| duration::duration_stats(dataset)),
        users: timed(|| users::user_stats(dataset)),
    };

    debug!(
        time_us = analysis.time.elapsed.as_micros() as u64,
        stations_us = analysis.stations.elapsed.as_micros() as u64,
        durations_us = analysis.durations.elapsed.as_micros() as u64,
        users_us = analysis.users.elapsed.as_micros() as u64,
        "Analysis complete"
    );
    analysis
}
