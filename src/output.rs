//! Output formatting and persistence for trip statistics.
//!
//! Supports the human-readable console report, raw row pages, JSON
//! serialization, and CSV export of the filtered rows.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::analyzers::Analysis;
use crate::analyzers::types::{DurationStats, NO_DATA, Stat, StationStats, TimeStats, UserStats};
use crate::analyzers::utility::round_half_even;
use crate::data::trip::weekday_name;
use crate::data::{City, Dataset, Schema, TripFilter, TripRecord};
use crate::error::AnalysisError;
use csv::WriterBuilder;

pub const PAGE_SIZE: usize = 5;

pub fn write_separator<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}

fn elapsed<W: Write>(out: &mut W, took: Duration) -> Result<()> {
    writeln!(out, "\nThis took {:.4} seconds.", took.as_secs_f64())?;
    write_separator(out)
}

fn counts<W: Write>(out: &mut W, values: &[(String, usize)]) -> Result<()> {
    if values.is_empty() {
        writeln!(out, "  {NO_DATA}")?;
    }
    for (value, n) in values {
        writeln!(out, "  {value}: {n}")?;
    }
    Ok(())
}

/// One-line description of what is being reported on.
pub fn write_selection<W: Write>(
    out: &mut W,
    city: City,
    filter: &TripFilter,
    rows: usize,
) -> Result<()> {
    writeln!(out, "\n{city} ({filter}): {rows} trips")?;
    write_separator(out)
}

fn write_time<W: Write>(out: &mut W, stats: &TimeStats) -> Result<()> {
    writeln!(out, "Most Common Month: {}", stats.month.as_ref().map(|m| m.name()))?;
    writeln!(
        out,
        "Most Common Day: {}",
        stats.weekday.as_ref().map(|d| weekday_name(*d))
    )?;
    writeln!(out, "Most Common Hour: {}", stats.hour)?;
    Ok(())
}

fn write_stations<W: Write>(out: &mut W, stats: &StationStats) -> Result<()> {
    writeln!(out, "Most Commonly used start station: {}", stats.start_station)?;
    writeln!(out, "Most Commonly used end station: {}", stats.end_station)?;
    writeln!(out, "Most Commonly used combination of start and end station: {}", stats.trip)?;
    Ok(())
}

fn write_durations<W: Write>(out: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(
        out,
        "Total travel time: {:.1} Days",
        round_half_even(stats.total_days(), 1)
    )?;
    match stats.mean_minutes() {
        Stat::Available(minutes) => {
            writeln!(out, "Mean travel time: {:.1} Minutes", round_half_even(minutes, 1))?
        }
        Stat::Unavailable => writeln!(out, "Mean travel time: {NO_DATA}")?,
    }
    Ok(())
}

fn write_users<W: Write>(out: &mut W, stats: &UserStats) -> Result<()> {
    writeln!(out, "User Types:")?;
    counts(out, &stats.user_types)?;

    writeln!(out, "\nGender Types:")?;
    match &stats.genders {
        Stat::Available(genders) => counts(out, genders)?,
        Stat::Unavailable => writeln!(out, "  {NO_DATA}")?,
    }

    writeln!(out, "\nEarliest Year: {}", stats.earliest_birth_year)?;
    writeln!(out, "Most Recent Year: {}", stats.latest_birth_year)?;
    writeln!(out, "Most Common Year: {}", stats.common_birth_year)?;
    Ok(())
}

/// Writes a section heading, then either the section body or the error that
/// stopped its aggregator.
fn section<W: Write, T>(
    out: &mut W,
    heading: &str,
    result: &Result<T, AnalysisError>,
    took: Duration,
    body: impl FnOnce(&mut W, &T) -> Result<()>,
) -> Result<()> {
    writeln!(out, "\n{heading}\n")?;
    match result {
        Ok(value) => body(out, value)?,
        Err(e) => writeln!(out, "Could not compute these statistics: {e}")?,
    }
    elapsed(out, took)
}

/// Writes the full console report for an [`Analysis`].
pub fn write_analysis<W: Write>(out: &mut W, analysis: &Analysis) -> Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    write_time(out, &analysis.time.value)?;
    elapsed(out, analysis.time.elapsed)?;

    section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &analysis.stations.value,
        analysis.stations.elapsed,
        write_stations,
    )?;
    section(
        out,
        "Calculating Trip Duration...",
        &analysis.durations.value,
        analysis.durations.elapsed,
        write_durations,
    )?;
    section(
        out,
        "Calculating User Stats...",
        &analysis.users.value,
        analysis.users.elapsed,
        write_users,
    )?;
    Ok(())
}

/// Writes one page of raw rows. `first_row` is the zero-based position of
/// `rows[0]` in the dataset and is only used for numbering.
pub fn write_rows<W: Write>(
    out: &mut W,
    schema: &Schema,
    rows: &[TripRecord],
    first_row: usize,
) -> Result<()> {
    for (i, trip) in rows.iter().enumerate() {
        writeln!(out, "\nRow {}", first_row + i + 1)?;
        for column in schema.columns() {
            writeln!(out, "  {column}: {}", trip.value(*column).unwrap_or_default())?;
        }
    }
    Ok(())
}

/// Renders the analysis as pretty-printed JSON.
///
/// Unlike the console report this is all-or-nothing: any aggregator error
/// fails the rendering.
pub fn render_json(city: City, filter: &TripFilter, analysis: &Analysis) -> Result<String> {
    let time = &analysis.time.value;
    let stations = analysis.stations.value.clone().context("station statistics")?;
    let durations = analysis.durations.value.clone().context("trip duration statistics")?;
    let users = analysis.users.value.clone().context("user statistics")?;

    let value = json!({
        "city": city.name(),
        "month": filter.month.to_string(),
        "day": filter.day.to_string(),
        "rows": analysis.rows,
        "time": {
            "month": time.month.as_ref().map(|m| m.name()),
            "day": time.weekday.as_ref().map(|d| weekday_name(*d)),
            "hour": time.hour,
        },
        "stations": stations,
        "durations": {
            "trips": durations.trips,
            "total_seconds": durations.total_seconds,
            "total_days": round_half_even(durations.total_days(), 1),
            "mean_minutes": durations.mean_minutes().map(|m| round_half_even(m, 1)),
        },
        "users": users,
    });

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Writes the dataset's rows to a CSV file, replacing any existing file.
///
/// Only columns present in the dataset's schema are written.
pub fn export_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    debug!(path = %path.display(), rows = dataset.len(), "Exporting CSV");

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let columns = dataset.schema().columns();
    writer.write_record(columns.iter().map(|c| c.header()))?;
    for trip in dataset.iter() {
        writer.write_record(columns.iter().map(|c| trip.value(*c).unwrap_or_default()))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = dataset.len(), "Filtered rows exported");
    Ok(())
}
