//! Rider demographics.

use tracing::warn;

use crate::analyzers::types::{Stat, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::data::{Column, Dataset};
use crate::error::AnalysisError;

/// Parses every non-blank birth year. Returns `None` if any cell is not a
/// number, in which case no birth-year statistic is reported.
fn birth_years(dataset: &Dataset) -> Option<Vec<i32>> {
    dataset
        .iter()
        .filter_map(|t| t.birth_year.as_deref().map(|raw| (t.line, raw)))
        .map(|(line, raw)| {
            let year = raw
                .parse::<f64>()
                .ok()
                .filter(|y| y.is_finite())
                .map(|y| y.round() as i32);
            if year.is_none() {
                warn!(line, value = raw, "Invalid birth year");
            }
            year
        })
        .collect()
}

/// Computes each demographic statistic independently, so a city without
/// gender or birth-year data still reports the others.
///
/// # Errors
///
/// Only the `User Type` column is required.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn user_stats(dataset: &Dataset) -> Result<UserStats, AnalysisError> {
    let schema = dataset.schema();
    if !schema.has(Column::UserType) {
        return Err(AnalysisError::MissingColumn(Column::UserType));
    }

    let user_types = owned_counts(value_counts(
        dataset.iter().filter_map(|t| t.user_type.as_deref()),
    ));

    let genders = if schema.has(Column::Gender) {
        let counts = owned_counts(value_counts(
            dataset.iter().filter_map(|t| t.gender.as_deref()),
        ));
        if counts.is_empty() {
            Stat::Unavailable
        } else {
            Stat::Available(counts)
        }
    } else {
        Stat::Unavailable
    };

    let years = if schema.has(Column::BirthYear) {
        birth_years(dataset).unwrap_or_default()
    } else {
        Vec::new()
    };

    Ok(UserStats {
        user_types,
        genders,
        earliest_birth_year: years.iter().copied().min().into(),
        latest_birth_year: years.iter().copied().max().into(),
        common_birth_year: mode(years.iter().copied()).into(),
    })
}

fn owned_counts(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_trips;

    const WITH_DEMOGRAPHICS: &str = "\
Start Time,User Type,Gender,Birth Year
2017-01-02 08:00:00,Subscriber,Male,1989.0
2017-01-02 08:00:00,Customer,,
2017-01-02 08:00:00,Subscriber,Female,1992.0
2017-01-02 08:00:00,Subscriber,Male,1992.0
2017-01-02 08:00:00,Customer,Female,1960.0
";

    const WITHOUT_GENDER: &str = "\
Start Time,User Type,Birth Year
2017-01-02 08:00:00,Subscriber,1989.0
2017-01-02 08:00:00,Customer,
2017-01-02 08:00:00,Subscriber,1992.0
2017-01-02 08:00:00,Subscriber,1992.0
2017-01-02 08:00:00,Customer,1960.0
";

    fn pairs(values: &[(&str, usize)]) -> Vec<(String, usize)> {
        values.iter().map(|(v, n)| (v.to_string(), *n)).collect()
    }

    #[test]
    fn test_user_stats() {
        let dataset = read_trips(WITH_DEMOGRAPHICS.as_bytes()).unwrap();
        let stats = user_stats(&dataset).unwrap();

        assert_eq!(stats.user_types, pairs(&[("Subscriber", 3), ("Customer", 2)]));
        assert_eq!(
            stats.genders,
            Stat::Available(pairs(&[("Male", 2), ("Female", 2)]))
        );
        assert_eq!(stats.earliest_birth_year, Stat::Available(1960));
        assert_eq!(stats.latest_birth_year, Stat::Available(1992));
        assert_eq!(stats.common_birth_year, Stat::Available(1992));
    }

    #[test]
    fn test_removing_gender_leaves_other_stats_unchanged() {
        let full = user_stats(&read_trips(WITH_DEMOGRAPHICS.as_bytes()).unwrap()).unwrap();
        let reduced = user_stats(&read_trips(WITHOUT_GENDER.as_bytes()).unwrap()).unwrap();

        assert_eq!(reduced.genders, Stat::Unavailable);
        assert_eq!(reduced.user_types, full.user_types);
        assert_eq!(reduced.earliest_birth_year, full.earliest_birth_year);
        assert_eq!(reduced.latest_birth_year, full.latest_birth_year);
        assert_eq!(reduced.common_birth_year, full.common_birth_year);
    }

    #[test]
    fn test_no_demographic_columns() {
        let csv = "Start Time,User Type\n2017-01-02 08:00:00,Subscriber\n2017-01-02 08:00:00,Customer\n";
        let stats = user_stats(&read_trips(csv.as_bytes()).unwrap()).unwrap();

        assert_eq!(stats.user_types, pairs(&[("Subscriber", 1), ("Customer", 1)]));
        assert_eq!(stats.genders, Stat::Unavailable);
        assert_eq!(stats.earliest_birth_year, Stat::Unavailable);
        assert_eq!(stats.latest_birth_year, Stat::Unavailable);
        assert_eq!(stats.common_birth_year, Stat::Unavailable);
    }

    #[test]
    fn test_invalid_birth_year_only_drops_year_stats() {
        let csv = "\
Start Time,User Type,Gender,Birth Year
2017-01-02 08:00:00,Subscriber,Male,1989.0
2017-01-02 08:00:00,Customer,Female,unknown
";
        let stats = user_stats(&read_trips(csv.as_bytes()).unwrap()).unwrap();

        assert_eq!(stats.user_types, pairs(&[("Subscriber", 1), ("Customer", 1)]));
        assert_eq!(
            stats.genders,
            Stat::Available(pairs(&[("Male", 1), ("Female", 1)]))
        );
        assert_eq!(stats.earliest_birth_year, Stat::Unavailable);
        assert_eq!(stats.latest_birth_year, Stat::Unavailable);
        assert_eq!(stats.common_birth_year, Stat::Unavailable);
    }

    #[test]
    fn test_missing_user_type_is_fatal() {
        let dataset = read_trips("Start Time,Gender\n2017-01-02 08:00:00,Male\n".as_bytes()).unwrap();
        assert_eq!(
            user_stats(&dataset),
            Err(AnalysisError::MissingColumn(Column::UserType))
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = read_trips("Start Time,User Type,Gender,Birth Year\n".as_bytes()).unwrap();
        let stats = user_stats(&dataset).unwrap();

        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, Stat::Unavailable);
        assert_eq!(stats.common_birth_year, Stat::Unavailable);
    }
}
