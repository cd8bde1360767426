//! Most popular stations and station pairs.

use crate::analyzers::types::{StationPair, StationStats};
use crate::analyzers::utility::mode;
use crate::data::{Column, Dataset};
use crate::error::AnalysisError;

/// Most common start station, end station and (start, end) trip.
///
/// Rows with a blank station are skipped.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingColumn`] if the dataset has no
/// `Start Station` or `End Station` column.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn station_stats(dataset: &Dataset) -> Result<StationStats, AnalysisError> {
    for column in [Column::StartStation, Column::EndStation] {
        if !dataset.schema().has(column) {
            return Err(AnalysisError::MissingColumn(column));
        }
    }

    let start_station = mode(dataset.iter().filter_map(|t| t.start_station.as_deref()));
    let end_station = mode(dataset.iter().filter_map(|t| t.end_station.as_deref()));
    let trip = mode(
        dataset
            .iter()
            .filter_map(|t| Some((t.start_station.as_deref()?, t.end_station.as_deref()?))),
    );

    Ok(StationStats {
        start_station: start_station.map(str::to_string).into(),
        end_station: end_station.map(str::to_string).into(),
        trip: trip
            .map(|(start, end)| StationPair {
                start: start.to_string(),
                end: end.to_string(),
            })
            .into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Stat;
    use crate::data::read_trips;

    #[test]
    fn test_station_stats() {
        let csv = "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,A,B
2017-01-02 08:00:00,A,B
2017-01-02 08:00:00,B,C
";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = station_stats(&dataset).unwrap();

        assert_eq!(stats.start_station, Stat::Available("A".to_string()));
        assert_eq!(stats.end_station, Stat::Available("B".to_string()));
        assert_eq!(
            stats.trip,
            Stat::Available(StationPair {
                start: "A".to_string(),
                end: "B".to_string()
            })
        );
    }

    #[test]
    fn test_pair_tie_goes_to_first_seen() {
        let csv = "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,X,Y
2017-01-02 08:00:00,A,B
2017-01-02 08:00:00,A,B
2017-01-02 08:00:00,X,Y
";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = station_stats(&dataset).unwrap();

        assert_eq!(stats.start_station, Stat::Available("X".to_string()));
        assert_eq!(stats.trip.map(|p| p.start), Stat::Available("X".to_string()));
    }

    #[test]
    fn test_blank_stations_are_skipped() {
        let csv = "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,,B
2017-01-02 08:00:00,,B
2017-01-02 08:00:00,C,D
";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = station_stats(&dataset).unwrap();

        assert_eq!(stats.start_station, Stat::Available("C".to_string()));
        assert_eq!(stats.end_station, Stat::Available("B".to_string()));
        assert_eq!(stats.trip.map(|p| p.end), Stat::Available("D".to_string()));
    }

    #[test]
    fn test_missing_station_column_is_fatal() {
        let csv = "Start Time,Start Station\n2017-01-02 08:00:00,A\n";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        assert_eq!(
            station_stats(&dataset),
            Err(AnalysisError::MissingColumn(Column::EndStation))
        );
    }

    #[test]
    fn test_empty_dataset_has_no_data() {
        let csv = "Start Time,Start Station,End Station\n";
        let dataset = read_trips(csv.as_bytes()).unwrap();
        let stats = station_stats(&dataset).unwrap();

        assert_eq!(stats.start_station, Stat::Unavailable);
        assert_eq!(stats.end_station, Stat::Unavailable);
        assert_eq!(stats.trip, Stat::Unavailable);
    }
}
