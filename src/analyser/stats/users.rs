use super::{Report, duration_serde, float_series, no_data_line, string_series, write_lines};
use crate::analyser::filter::FilteredView;
use crate::analyser::io::{BIRTH_YEAR, GENDER, USER_TYPE};
use crate::analyser::mode::{frequency_table, most_frequent};
use crate::analyser::types::{City, FilterCriteria};
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

pub const SUBSCRIBER: &str = "Subscriber";
pub const CUSTOMER: &str = "Customer";
pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";
/// Label for trips whose user type is missing.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

/// Gender and birth-year figures, or why there are none.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Demographics {
    /// The city's table has no gender or birth-year columns.
    NotAvailable,
    Available(DemographicSummary),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DemographicSummary {
    pub male: usize,
    pub female: usize,
    /// Every recorded gender with its count, most frequent first.
    pub genders: Vec<(String, usize)>,
    pub most_recent_birth_year: Option<i32>,
    pub earliest_birth_year: Option<i32>,
    pub most_common_birth_year: Option<i32>,
}

/// User type counts and, where the city records them, demographics.
#[derive(Clone, Debug, Serialize)]
pub struct UserStats {
    pub city: City,
    pub criteria: FilterCriteria,
    pub trip_count: usize,
    pub subscribers: usize,
    pub customers: usize,
    /// Every user type with its count, most frequent first. Missing values
    /// are counted under [`UNKNOWN_USER_TYPE`].
    pub user_types: Vec<(String, usize)>,
    pub demographics: Demographics,
    #[serde(with = "duration_serde", rename = "compute_duration")]
    pub elapsed: Duration,
}

/// Counts user types and summarizes gender and birth year.
///
/// Cities without demographic columns get [`Demographics::NotAvailable`]
/// from their capability flags; those columns are never touched.
///
/// # Errors
///
/// Returns an error if polars fails to read one of the user columns.
pub fn user_stats(view: &FilteredView) -> Result<UserStats> {
    let start = Instant::now();

    let user_types = string_series(view, USER_TYPE)?;
    let user_types = frequency_table(
        user_types
            .str()?
            .into_iter()
            .map(|t| t.unwrap_or(UNKNOWN_USER_TYPE)),
    );
    let subscribers = count_in(&user_types, SUBSCRIBER);
    let customers = count_in(&user_types, CUSTOMER);

    let demographics = if view.capabilities().demographics {
        Demographics::Available(demographic_summary(view)?)
    } else {
        log::debug!("{} has no demographic columns, skipping", view.city());
        Demographics::NotAvailable
    };

    Ok(UserStats {
        city: view.city(),
        criteria: view.criteria(),
        trip_count: view.len(),
        subscribers,
        customers,
        user_types: user_types
            .into_iter()
            .map(|(value, count)| (value.to_owned(), count))
            .collect(),
        demographics,
        elapsed: start.elapsed(),
    })
}

fn count_in(table: &[(&str, usize)], key: &str) -> usize {
    table
        .iter()
        .find(|(value, _)| *value == key)
        .map_or(0, |(_, count)| *count)
}

fn demographic_summary(view: &FilteredView) -> Result<DemographicSummary> {
    let genders = string_series(view, GENDER)?;
    let genders = frequency_table(genders.str()?.into_iter().flatten());
    let male = count_in(&genders, MALE);
    let female = count_in(&genders, FEMALE);

    let birth_years = float_series(view, BIRTH_YEAR)?;
    let birth_years: Vec<i32> = birth_years
        .f64()?
        .into_iter()
        .flatten()
        .filter(|year| year.is_finite())
        .map(|year| year.round() as i32)
        .collect();

    Ok(DemographicSummary {
        male,
        female,
        genders: genders
            .into_iter()
            .map(|(value, count)| (value.to_owned(), count))
            .collect(),
        most_recent_birth_year: birth_years.iter().copied().max(),
        earliest_birth_year: birth_years.iter().copied().min(),
        most_common_birth_year: most_frequent(birth_years.iter().copied()),
    })
}

impl Report for UserStats {
    fn title(&self) -> &'static str {
        "Calculating User Statistics..."
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn lines(&self) -> Vec<String> {
        let city = self.city;
        let mut lines = Vec::new();

        if self.trip_count == 0 {
            lines.push(no_data_line(city, self.criteria));
        } else {
            lines.push(format!(
                "Total number of subscribers in {city}: {}",
                self.subscribers
            ));
            lines.push(format!(
                "Total number of customers in {city}: {}",
                self.customers
            ));
            for (user_type, count) in &self.user_types {
                if user_type != SUBSCRIBER && user_type != CUSTOMER {
                    lines.push(format!(
                        "Total number of users of type '{user_type}' in {city}: {count}"
                    ));
                }
            }
        }

        match &self.demographics {
            Demographics::NotAvailable => lines.push(format!(
                "Gender and birth year information are not available for {city}."
            )),
            Demographics::Available(_) if self.trip_count == 0 => {}
            Demographics::Available(summary) => {
                lines.push(format!(
                    "Total number of male users in {city}: {}",
                    summary.male
                ));
                lines.push(format!(
                    "Total number of female users in {city}: {}",
                    summary.female
                ));
                let year = |y: Option<i32>| y.map_or_else(|| "unknown".to_owned(), |y| y.to_string());
                lines.push(format!(
                    "Most recent birth year of users in {city}: {}",
                    year(summary.most_recent_birth_year)
                ));
                lines.push(format!(
                    "Earliest birth year of users in {city}: {}",
                    year(summary.earliest_birth_year)
                ));
                lines.push(format!(
                    "Most common birth year of users in {city}: {}",
                    year(summary.most_common_birth_year)
                ));
            }
        }

        lines
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}
