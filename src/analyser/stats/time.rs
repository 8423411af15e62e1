use super::{Report, duration_serde, int_values, int_values_of, no_data_line, write_lines};
use crate::analyser::filter::FilteredView;
use crate::analyser::io::{MONTH, START_TIME, WEEKDAY};
use crate::analyser::mode::most_frequent;
use crate::analyser::types::{City, FilterCriteria, day_name, month_name};
use crate::error::Result;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

const HOUR: &str = "Hour";

/// Most frequent times of travel.
#[derive(Clone, Debug, Serialize)]
pub struct TimeStats {
    pub city: City,
    pub criteria: FilterCriteria,
    pub trip_count: usize,
    /// Calendar month, 1 = January.
    pub most_common_month: Option<u32>,
    /// Days from Monday.
    pub most_common_weekday: Option<u32>,
    /// Hour of day, 0-23.
    pub most_common_hour: Option<u32>,
    #[serde(with = "duration_serde", rename = "compute_duration")]
    pub elapsed: Duration,
}

/// Computes the most common month, weekday and start hour of the view.
///
/// With a month (or weekday) filter active, only trips in that month (or
/// on that weekday) are counted, so the result is the filter value itself.
///
/// # Errors
///
/// Returns an error if polars fails to extract the calendar columns.
pub fn time_stats(view: &FilteredView) -> Result<TimeStats> {
    let start = Instant::now();
    let criteria = view.criteria();

    let months = int_values(view, MONTH)?;
    let most_common_month = most_frequent(
        months
            .into_iter()
            .filter(|m| criteria.month.is_none_or(|want| want.number() == *m)),
    );

    let weekdays = int_values(view, WEEKDAY)?;
    let most_common_weekday = most_frequent(
        weekdays
            .into_iter()
            .filter(|d| criteria.day_index().is_none_or(|want| want == *d)),
    );

    let hours = view
        .frame()
        .clone()
        .lazy()
        .select([col(START_TIME)
            .dt()
            .hour()
            .cast(DataType::Int32)
            .alias(HOUR)])
        .collect()?;
    let most_common_hour = most_frequent(int_values_of(&hours, HOUR)?);

    log::debug!(
        "Time stats for {}: month={most_common_month:?} weekday={most_common_weekday:?} hour={most_common_hour:?}",
        view.city()
    );

    Ok(TimeStats {
        city: view.city(),
        criteria,
        trip_count: view.len(),
        most_common_month,
        most_common_weekday,
        most_common_hour,
        elapsed: start.elapsed(),
    })
}

impl TimeStats {
    fn month_line(&self) -> String {
        let month = self
            .most_common_month
            .map(|m| month_name(m).map_or_else(|| m.to_string(), str::to_owned))
            .unwrap_or_else(|| "unknown".to_owned());
        match self.criteria.month {
            Some(filter) => format!(
                "For your selection in {} and the month of {filter}, the most common month is {month}.",
                self.city
            ),
            None => format!(
                "For your selection in {}, the most common month is {month}.",
                self.city
            ),
        }
    }

    fn day_line(&self) -> String {
        let day = self
            .most_common_weekday
            .and_then(day_name)
            .unwrap_or("unknown");
        match self.criteria.day_index().and_then(day_name) {
            Some(filter) => format!(
                "For your selection in {} and the day of the week {filter}, the most common day is {day}.",
                self.city
            ),
            None => format!(
                "For your selection in {}, the most common day of the week is {day}.",
                self.city
            ),
        }
    }

    fn hour_line(&self) -> String {
        match self.most_common_hour {
            Some(hour) => format!(
                "The most common start hour for your selection in {} is {hour} o'clock.",
                self.city
            ),
            None => format!(
                "The most common start hour for your selection in {} is unknown.",
                self.city
            ),
        }
    }
}

impl Report for TimeStats {
    fn title(&self) -> &'static str {
        "Calculating The Most Frequent Times of Travel..."
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn lines(&self) -> Vec<String> {
        if self.trip_count == 0 {
            return vec![no_data_line(self.city, self.criteria)];
        }
        vec![self.month_line(), self.day_line(), self.hour_line()]
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}
