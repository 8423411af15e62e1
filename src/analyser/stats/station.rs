use super::{Report, duration_serde, no_data_line, string_series, write_lines};
use crate::analyser::filter::FilteredView;
use crate::analyser::io::{END_STATION, START_STATION};
use crate::analyser::mode::most_frequent;
use crate::analyser::types::{City, FilterCriteria};
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// A start/end station combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Trip {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (departure) and {} (arrival).", self.start, self.end)
    }
}

/// Most popular stations and trip.
#[derive(Clone, Debug, Serialize)]
pub struct StationStats {
    pub city: City,
    pub criteria: FilterCriteria,
    pub trip_count: usize,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub trip: Option<Trip>,
    #[serde(with = "duration_serde", rename = "compute_duration")]
    pub elapsed: Duration,
}

/// Computes the most common start station, end station and station pair.
///
/// # Errors
///
/// Returns an error if polars fails to read the station columns as text.
pub fn station_stats(view: &FilteredView) -> Result<StationStats> {
    let start = Instant::now();

    let starts = string_series(view, START_STATION)?;
    let ends = string_series(view, END_STATION)?;
    let starts = starts.str()?;
    let ends = ends.str()?;

    let start_station = most_frequent(starts.into_iter().flatten()).map(str::to_owned);
    let end_station = most_frequent(ends.into_iter().flatten()).map(str::to_owned);
    let trip = most_frequent(
        starts
            .into_iter()
            .zip(ends)
            .filter_map(|(s, e)| Some((s?, e?))),
    )
    .map(|(s, e)| Trip {
        start: s.to_owned(),
        end: e.to_owned(),
    });

    log::debug!("Station stats for {}: trip={trip:?}", view.city());

    Ok(StationStats {
        city: view.city(),
        criteria: view.criteria(),
        trip_count: view.len(),
        start_station,
        end_station,
        trip,
        elapsed: start.elapsed(),
    })
}

impl Report for StationStats {
    fn title(&self) -> &'static str {
        "Calculating The Most Popular Stations and Trip..."
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn lines(&self) -> Vec<String> {
        if self.trip_count == 0 {
            return vec![no_data_line(self.city, self.criteria)];
        }
        let or_unknown = |v: Option<&String>| v.map_or("unknown", String::as_str).to_owned();
        vec![
            format!(
                "The frequently chosen start station is: {}",
                or_unknown(self.start_station.as_ref())
            ),
            format!(
                "The commonly chosen end station is: {}",
                or_unknown(self.end_station.as_ref())
            ),
            match &self.trip {
                Some(trip) => format!("The prevalent station combination for trips is: {trip}"),
                None => "The prevalent station combination for trips is unknown.".to_owned(),
            },
        ]
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}
