//! In-memory representation of trip records and the datasets that hold them.

use std::fmt;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A column recognised in trip CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::StartTime,
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Header text as it appears in the source files.
    pub fn header(self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The recognised columns a dataset was loaded with, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut schema = Schema::default();
        for column in columns {
            if !schema.has(column) {
                schema.columns.push(column);
            }
        }
        schema
    }

    /// Builds a schema from CSV headers, ignoring anything unrecognised.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        Schema::new(headers.into_iter().filter_map(Column::from_header))
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One bike-share rental.
///
/// Calendar fields are derived from `start_time` on construction and cannot
/// drift from it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    month: Month,
    weekday: Weekday,
    hour: u32,

    /// Line in the source file, 0 when the record was not read from one.
    pub line: u64,
    pub end_time: Option<String>,
    /// Seconds, as written in the file. Parsed by the duration aggregator.
    pub trip_duration: Option<String>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    /// As written in the file; some exports use floats (`1989.0`).
    pub birth_year: Option<String>,
}

impl TripRecord {
    pub fn new(start_time: NaiveDateTime) -> Self {
        // month() is always 1..=12
        let month = Month::try_from(start_time.month() as u8).unwrap_or(Month::January);
        TripRecord {
            start_time,
            month,
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            line: 0,
            end_time: None,
            trip_duration: None,
            start_station: None,
            end_station: None,
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Display form of a column's value for this row, `None` when blank.
    pub fn value(&self, column: Column) -> Option<String> {
        match column {
            Column::StartTime => Some(self.start_time.format(TIMESTAMP_FORMAT).to_string()),
            Column::EndTime => self.end_time.clone(),
            Column::TripDuration => self.trip_duration.clone(),
            Column::StartStation => self.start_station.clone(),
            Column::EndStation => self.end_station.clone(),
            Column::UserType => self.user_type.clone(),
            Column::Gender => self.gender.clone(),
            Column::BirthYear => self.birth_year.clone(),
        }
    }
}

/// Trips for one city, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Dataset { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let trip = TripRecord::new(ts("2017-06-23 15:09:32"));
        assert_eq!(trip.month(), Month::June);
        assert_eq!(trip.weekday(), Weekday::Fri);
        assert_eq!(trip.hour(), 15);
    }

    #[test]
    fn test_schema_ignores_unknown_headers() {
        let schema = Schema::from_headers(["", "Start Time", "Trip Duration", "Bike Id"]);
        assert_eq!(schema.columns(), &[Column::StartTime, Column::TripDuration]);
        assert!(!schema.has(Column::Gender));
    }

    #[test]
    fn test_schema_deduplicates() {
        let schema = Schema::new([Column::Gender, Column::Gender, Column::UserType]);
        assert_eq!(schema.columns(), &[Column::Gender, Column::UserType]);
    }

    #[test]
    fn test_value_formats_columns() {
        let mut trip = TripRecord::new(ts("2017-01-01 00:07:57"));
        trip.trip_duration = Some("60".to_string());
        trip.birth_year = Some("1989.0".to_string());

        assert_eq!(
            trip.value(Column::StartTime).as_deref(),
            Some("2017-01-01 00:07:57")
        );
        assert_eq!(trip.value(Column::TripDuration).as_deref(), Some("60"));
        assert_eq!(trip.value(Column::BirthYear).as_deref(), Some("1989.0"));
        assert_eq!(trip.value(Column::Gender), None);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
    }
}
