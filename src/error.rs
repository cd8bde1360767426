//! Typed errors for loading and analyzing trip data.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::trip::Column;

/// Returned when a city name is not one of the supported cities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown city `{0}` (expected one of: Chicago, New York City, Washington)")]
pub struct InvalidCityError(pub String);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    InvalidCity(#[from] InvalidCityError),
    #[error("could not open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(Column),
    #[error("line {line}: invalid start time `{value}`")]
    InvalidTimestamp { line: u64, value: String },
}

/// Fatal precondition failures for a single aggregator run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Missing required column: {0}")]
    MissingColumn(Column),
    /// `line` is the row's line in the source file.
    #[error("line {line} has no value for required column {column}")]
    MissingValue { column: Column, line: u64 },
    #[error("line {line}: invalid {column} `{value}`")]
    InvalidValue {
        column: Column,
        line: u64,
        value: String,
    },
}
