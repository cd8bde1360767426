//! Total and average trip duration.

use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::data::{Column, Dataset, TripRecord};
use crate::error::AnalysisError;

/// Parses a row's duration in seconds.
fn seconds(trip: &TripRecord) -> Result<f64, AnalysisError> {
    let raw = trip
        .trip_duration
        .as_deref()
        .ok_or(AnalysisError::MissingValue {
            column: Column::TripDuration,
            line: trip.line,
        })?;
    raw.parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| AnalysisError::InvalidValue {
            column: Column::TripDuration,
            line: trip.line,
            value: raw.to_string(),
        })
}

/// Sums and averages `Trip Duration` over the dataset.
///
/// # Errors
///
/// The duration column is required: its absence, or a blank, non-numeric or
/// negative duration on any row, fails the whole computation.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats, AnalysisError> {
    if !dataset.schema().has(Column::TripDuration) {
        return Err(AnalysisError::MissingColumn(Column::TripDuration));
    }

    let durations = dataset
        .iter()
        .map(seconds)
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(DurationStats {
        trips: durations.len(),
        // Sum::sum on an empty f64 iterator yields -0.0
        total_seconds: durations.iter().fold(0.0, |total, s| total + s),
        mean_seconds: mean(&durations).into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Stat;
    use crate::data::{DayFilter, MonthFilter, TripFilter, read_trips};
    use chrono::Month;

    #[test]
    fn test_duration_stats() {
        let csv = "Start Time,Trip Duration\n2017-01-02 08:00:00,60\n2017-01-02 08:00:00,120\n2017-01-02 08:00:00,180\n";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = duration_stats(&dataset).unwrap();

        assert_eq!(stats.trips, 3);
        assert_eq!(stats.total_seconds, 360.0);
        assert!((stats.total_days() - 0.0042).abs() < 1e-4);
        assert_eq!(stats.mean_minutes(), Stat::Available(2.0));
    }

    #[test]
    fn test_total_days_matches_sum_of_seconds() {
        let csv = "Start Time,Trip Duration\n2017-01-02 08:00:00,489.066\n2017-01-02 08:00:00,1261.276\n2017-01-02 08:00:00,86400\n";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = duration_stats(&dataset).unwrap();

        let sum: f64 = 489.066 + 1261.276 + 86400.0;
        assert!(((stats.total_days() * 86_400.0).round() - sum.round()).abs() < 1.0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dataset = read_trips("Start Time\n2017-01-02 08:00:00\n".as_bytes()).unwrap();
        assert_eq!(
            duration_stats(&dataset),
            Err(AnalysisError::MissingColumn(Column::TripDuration))
        );
    }

    #[test]
    fn test_blank_value_is_fatal() {
        let csv = "Start Time,Trip Duration\n2017-01-02 08:00:00,60\n2017-01-02 08:00:00,\n";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        assert_eq!(
            duration_stats(&dataset),
            Err(AnalysisError::MissingValue {
                column: Column::TripDuration,
                line: 3
            })
        );
    }

    #[test]
    fn test_error_reports_source_line_after_filtering() {
        let csv = "\
Start Time,Trip Duration
2017-01-02 08:00:00,60
2017-02-06 08:00:00,90
2017-01-03 08:00:00,
";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let january = TripFilter::new(MonthFilter::Only(Month::January), DayFilter::All);
        let err = duration_stats(&january.apply(&dataset)).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::MissingValue {
                column: Column::TripDuration,
                line: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "line 4 has no value for required column Trip Duration"
        );
    }

    #[test]
    fn test_invalid_values_are_fatal() {
        for bad in ["n/a", "-5"] {
            let csv = format!("Start Time,Trip Duration\n2017-01-02 08:00:00,{bad}\n");
            let dataset = read_trips(csv.as_bytes()).unwrap();
            assert_eq!(
                duration_stats(&dataset),
                Err(AnalysisError::InvalidValue {
                    column: Column::TripDuration,
                    line: 2,
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = read_trips("Start Time,Trip Duration\n".as_bytes()).unwrap();
        let stats = duration_stats(&dataset).unwrap();

        assert_eq!(stats.trips, 0);
        assert_eq!(stats.total_seconds, 0.0);
        assert!(stats.total_seconds.is_sign_positive());
        assert_eq!(stats.mean_seconds, Stat::Unavailable);
    }
}
