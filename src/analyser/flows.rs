use super::filter::{FilteredView, apply_filters};
use super::io::load_dataset;
use super::stats::{
    DurationStats, Report, StationStats, TimeStats, UserStats, duration_stats, station_stats,
    time_stats, user_stats,
};
use super::types::{City, FilterCriteria};
use crate::config::Settings;
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;

/// Everything one analysis run produces.
#[derive(Serialize)]
pub struct AnalysisReport {
    pub city: City,
    pub criteria: FilterCriteria,
    pub total_trips: usize,
    pub matching_trips: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
    #[serde(skip)]
    pub view: FilteredView,
}

impl AnalysisReport {
    /// The four statistic groups in presentation order.
    pub fn reports(&self) -> [&dyn Report; 4] {
        [&self.time, &self.stations, &self.durations, &self.users]
    }

    pub fn total_elapsed(&self) -> Duration {
        self.reports().iter().map(|r| r.elapsed()).sum()
    }
}

/// Loads `city`, applies `criteria` and computes every statistic group.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`](crate::error::BikeshareError::DataUnavailable)
/// if the city's table cannot be loaded. Empty selections are not errors.
pub fn run_analysis(
    settings: &Settings,
    city: City,
    criteria: FilterCriteria,
) -> Result<AnalysisReport> {
    let dataset = load_dataset(&settings.data_dir, city)?;
    let view = apply_filters(&dataset, criteria)?;
    analyse_view(view, dataset.len())
}

/// Computes every statistic group over an already-filtered view.
///
/// # Errors
///
/// Returns an error if polars fails while extracting a column.
pub fn analyse_view(view: FilteredView, total_trips: usize) -> Result<AnalysisReport> {
    if view.is_empty() {
        log::warn!(
            "No {} trips match {}; reporting empty statistics",
            view.city(),
            view.criteria()
        );
    }

    Ok(AnalysisReport {
        city: view.city(),
        criteria: view.criteria(),
        total_trips,
        matching_trips: view.len(),
        time: time_stats(&view)?,
        stations: station_stats(&view)?,
        durations: duration_stats(&view)?,
        users: user_stats(&view)?,
        view,
    })
}
