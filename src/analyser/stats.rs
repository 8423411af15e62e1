//! The four statistic groups computed over a [`FilteredView`].
//!
//! Each routine is independent of the others, takes the view by reference
//! and returns a serializable report. A report's `Display` output is the
//! human-readable statistic lines, one `* `-prefixed line per statistic.
//! An empty view never fails; it produces a "no data" line instead.

pub mod duration;
pub mod station;
pub mod time;
pub mod users;

pub use duration::{DurationStats, MeanTravelTime, duration_stats};
pub use station::{StationStats, Trip, station_stats};
pub use time::{TimeStats, time_stats};
pub use users::{DemographicSummary, Demographics, UserStats, user_stats};

use super::filter::FilteredView;
use super::types::{City, FilterCriteria};
use crate::error::Result;
use polars::prelude::*;
use std::fmt;
use std::time::Duration;

/// Common surface of the statistic reports.
pub trait Report: fmt::Display {
    /// Heading printed before the report lines.
    fn title(&self) -> &'static str;

    /// Time spent computing the report.
    fn elapsed(&self) -> Duration;

    fn lines(&self) -> Vec<String>;
}

pub(crate) fn write_lines(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "* {line}")?;
    }
    Ok(())
}

pub(crate) fn no_data_line(city: City, criteria: FilterCriteria) -> String {
    format!("No trips in {city} match your selection ({criteria}).")
}

/// Non-null values of an integer-like column, as non-negative numbers.
pub(crate) fn int_values(view: &FilteredView, name: &str) -> Result<Vec<u32>> {
    int_values_of(view.frame(), name)
}

pub(crate) fn int_values_of(frame: &DataFrame, name: &str) -> Result<Vec<u32>> {
    let series = frame
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let values = series
        .i32()?
        .into_iter()
        .flatten()
        .filter_map(|v| u32::try_from(v).ok())
        .collect();
    Ok(values)
}

/// A column cast to text, ready for `.str()`.
pub(crate) fn string_series(view: &FilteredView, name: &str) -> Result<Series> {
    Ok(view
        .frame()
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?)
}

/// A column cast to `f64`, ready for `.f64()`.
pub(crate) fn float_series(view: &FilteredView, name: &str) -> Result<Series> {
    Ok(view
        .frame()
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?)
}

pub(crate) mod duration_serde {
    use serde::{Serializer, ser::SerializeStruct as _};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Duration", 2)?;
        state.serialize_field("secs", &duration.as_secs())?;
        state.serialize_field("nanos", &duration.subsec_nanos())?;
        state.end()
    }
}
