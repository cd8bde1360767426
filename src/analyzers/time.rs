//! Most frequent times of travel.

use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::mode;
use crate::data::Dataset;

/// Most common start month, weekday and hour.
///
/// Every statistic is [`Stat::Unavailable`](crate::analyzers::types::Stat)
/// when the dataset has no rows.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn time_stats(dataset: &Dataset) -> TimeStats {
    TimeStats {
        month: mode(dataset.iter().map(|t| t.month())).into(),
        weekday: mode(dataset.iter().map(|t| t.weekday())).into(),
        hour: mode(dataset.iter().map(|t| t.hour())).into(),
    }
}
