use super::{Report, duration_serde, float_series, no_data_line, write_lines};
use crate::analyser::filter::FilteredView;
use crate::analyser::io::TRIP_DURATION;
use crate::analyser::types::{City, FilterCriteria};
use crate::error::Result;
use polars::prelude::ChunkAgg as _;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Average trip length, in minutes up to 59 and in hours above that.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum MeanTravelTime {
    Minutes(f64),
    Hours(f64),
}

impl MeanTravelTime {
    /// Rounds the mean to whole minutes; past 59 minutes the rounded
    /// minutes are re-expressed as hours with one decimal.
    pub fn from_seconds(mean_seconds: f64) -> Self {
        let minutes = (mean_seconds / SECONDS_PER_MINUTE).round();
        if minutes > 59.0 {
            Self::Hours((minutes / 60.0 * 10.0).round() / 10.0)
        } else {
            Self::Minutes(minutes)
        }
    }
}

impl fmt::Display for MeanTravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(m) => write!(f, "{m:.0} minutes"),
            Self::Hours(h) => write!(f, "{h:.1} hours"),
        }
    }
}

/// Total seconds expressed in whole hours.
pub fn total_hours(total_seconds: f64) -> f64 {
    (total_seconds / SECONDS_PER_HOUR).round()
}

/// Total and mean trip duration.
#[derive(Clone, Debug, Serialize)]
pub struct DurationStats {
    pub city: City,
    pub criteria: FilterCriteria,
    pub trip_count: usize,
    pub total_seconds: Option<f64>,
    pub total_hours: Option<f64>,
    pub mean: Option<MeanTravelTime>,
    #[serde(with = "duration_serde", rename = "compute_duration")]
    pub elapsed: Duration,
}

/// Sums and averages `Trip Duration` over the view.
///
/// # Errors
///
/// Returns an error if the duration column cannot be read as numbers.
pub fn duration_stats(view: &FilteredView) -> Result<DurationStats> {
    let start = Instant::now();

    let durations = float_series(view, TRIP_DURATION)?;
    let durations = durations.f64()?;

    let has_values = durations.len() > durations.null_count();
    let total_seconds = if has_values { durations.sum() } else { None };
    let mean_seconds = if has_values { durations.mean() } else { None };

    log::debug!(
        "Duration stats for {}: total={total_seconds:?}s mean={mean_seconds:?}s",
        view.city()
    );

    Ok(DurationStats {
        city: view.city(),
        criteria: view.criteria(),
        trip_count: view.len(),
        total_seconds,
        total_hours: total_seconds.map(total_hours),
        mean: mean_seconds.map(MeanTravelTime::from_seconds),
        elapsed: start.elapsed(),
    })
}

impl Report for DurationStats {
    fn title(&self) -> &'static str {
        "Calculating Trip Duration Statistics..."
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn lines(&self) -> Vec<String> {
        if self.trip_count == 0 {
            return vec![no_data_line(self.city, self.criteria)];
        }
        vec![
            match self.total_hours {
                Some(hours) => {
                    format!("The total travel time for your selection is {hours:.0} hours.")
                }
                None => "The total travel time for your selection is unknown.".to_owned(),
            },
            match self.mean {
                Some(mean) => format!("The mean travel time for your selection is {mean}."),
                None => "The mean travel time for your selection is unknown.".to_owned(),
            },
        ]
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}
