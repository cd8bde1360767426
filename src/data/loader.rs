//! CSV ingestion for trip files.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::CityCatalog;
use crate::data::city::City;
use crate::data::trip::{Column, Dataset, Schema, TIMESTAMP_FORMAT, TripRecord};
use crate::error::LoadError;

const TIMESTAMP_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A row as it appears on disk. Every column except `Start Time` may be
/// missing from the header entirely, which deserializes to `None`.
///
/// Numeric columns stay as text here; a bad value only affects the
/// statistics that read it.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<String>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Reads trips from CSV, deriving calendar fields for each row.
///
/// # Errors
///
/// Fails if the header has no `Start Time` column, or if any row has an
/// unparseable start time or is otherwise malformed CSV.
pub fn read_trips<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let schema = Schema::from_headers(headers.iter());
    if !schema.has(Column::StartTime) {
        return Err(LoadError::MissingColumn(Column::StartTime));
    }
    debug!(columns = ?schema.columns(), "Trip file schema");

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawTrip = row.deserialize(Some(&headers))?;

        let start_time =
            parse_timestamp(&raw.start_time).ok_or_else(|| LoadError::InvalidTimestamp {
                line,
                value: raw.start_time.clone(),
            })?;

        let mut trip = TripRecord::new(start_time);
        trip.line = line;
        trip.end_time = raw.end_time;
        trip.trip_duration = raw.trip_duration;
        trip.start_station = raw.start_station;
        trip.end_station = raw.end_station;
        trip.user_type = raw.user_type;
        trip.gender = raw.gender;
        trip.birth_year = raw.birth_year;

        records.push(trip);
    }

    Ok(Dataset::new(schema, records))
}

/// Loads the trips stored in the CSV file at `path`.
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file)
}

/// Loads every trip recorded for `city`.
#[tracing::instrument(skip_all, fields(city = %city))]
pub fn load_city(catalog: &CityCatalog, city: City) -> Result<Dataset, LoadError> {
    let path = catalog.path_for(city);
    let started = Instant::now();

    let dataset = load_path(&path)?;

    info!(
        path = %path.display(),
        rows = dataset.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Trip data loaded"
    );
    Ok(dataset)
}

/// Like [`load_city`], but for a city given by name. Returns the resolved
/// city alongside its trips.
///
/// # Errors
///
/// Returns [`LoadError::InvalidCity`] when `name` is not a supported city.
pub fn load_city_named(catalog: &CityCatalog, name: &str) -> Result<(City, Dataset), LoadError> {
    let city: City = name.parse()?;
    Ok((city, load_city(catalog, city)?))
}
