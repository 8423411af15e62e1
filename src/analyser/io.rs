//! Loading a city's trip table and deriving its calendar columns.

use super::types::{Capabilities, City};
use crate::error::{BikeshareError, Result};
use polars::prelude::*;
use std::path::Path;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Derived calendar month of the start timestamp (1-12).
pub const MONTH: &str = "Month";
/// Derived weekday of the start timestamp (0 = Monday).
pub const WEEKDAY: &str = "Weekday";

const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];
const DEMOGRAPHIC_COLUMNS: [&str; 2] = [GENDER, BIRTH_YEAR];

/// All trips for one city with `Month` and `Weekday` derived.
///
/// Read-only once built; filtering produces a separate
/// [`FilteredView`](super::filter::FilteredView).
#[derive(Clone, Debug)]
pub struct Dataset {
    city: City,
    capabilities: Capabilities,
    frame: DataFrame,
}

impl Dataset {
    /// Builds a dataset from an already-read frame.
    ///
    /// Checks the columns the city's capabilities promise, parses
    /// `Start Time` if it is still text, then derives `Month` and `Weekday`.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::DataUnavailable`] if a required column is
    /// missing or the start timestamps cannot be parsed.
    pub fn from_frame(city: City, frame: DataFrame) -> Result<Self> {
        let capabilities = city.capabilities();
        check_columns(city, capabilities, &frame)?;

        let frame = parse_start_time(city, frame)?;
        let frame = derive_calendar_columns(frame)?;

        Ok(Self {
            city,
            capabilities,
            frame,
        })
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Loads the trip table for `city` from `data_dir`.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] when the table is missing,
/// unreadable or malformed.
pub fn load_dataset(data_dir: &Path, city: City) -> Result<Dataset> {
    load_dataset_from_path(&data_dir.join(city.file_name()), city)
}

/// Loads a trip table from an explicit path, treating it as `city`'s data.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] when the file is missing,
/// unreadable or malformed.
pub fn load_dataset_from_path(path: &Path, city: City) -> Result<Dataset> {
    if !path.is_file() {
        return Err(BikeshareError::data_unavailable(
            city,
            format!("{} not found", path.display()),
        ));
    }

    log::info!("Loading {} trips from {}", city, path.display());

    let frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .with_try_parse_dates(true)
        .finish()
        .and_then(LazyFrame::collect)
        .map_err(|e| {
            BikeshareError::data_unavailable(
                city,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;

    let dataset = Dataset::from_frame(city, frame)?;
    log::info!("Loaded {} trips for {}", dataset.len(), city);
    Ok(dataset)
}

fn check_columns(city: City, capabilities: Capabilities, frame: &DataFrame) -> Result<()> {
    let demographic: &[&str] = if capabilities.demographics {
        &DEMOGRAPHIC_COLUMNS
    } else {
        &[]
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .chain(demographic)
        .copied()
        .filter(|name| frame.column(name).is_err())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BikeshareError::data_unavailable(
            city,
            format!("missing columns: {}", missing.join(", ")),
        ))
    }
}

fn parse_start_time(city: City, mut frame: DataFrame) -> Result<DataFrame> {
    let column = frame.column(START_TIME)?;
    if matches!(column.dtype(), DataType::Datetime(_, _)) {
        return Ok(frame);
    }

    log::debug!("'{START_TIME}' was read as {}, casting to datetime", column.dtype());

    let series = column.as_materialized_series();
    let raw_nulls = series.null_count();
    let parsed = series
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .map_err(|e| BikeshareError::data_unavailable(city, format!("bad '{START_TIME}': {e}")))?;

    if parsed.null_count() > raw_nulls {
        return Err(BikeshareError::data_unavailable(
            city,
            format!(
                "{} values in '{START_TIME}' are not timestamps",
                parsed.null_count() - raw_nulls
            ),
        ));
    }

    frame.replace(START_TIME, parsed)?;
    Ok(frame)
}

fn derive_calendar_columns(frame: DataFrame) -> Result<DataFrame> {
    let frame = frame
        .lazy()
        .with_columns([
            col(START_TIME)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(MONTH),
            // polars numbers weekdays 1 (Monday) to 7 (Sunday)
            (col(START_TIME).dt().weekday().cast(DataType::Int32) - lit(1)).alias(WEEKDAY),
        ])
        .collect()?;
    Ok(frame)
}
