//! Unit tests for loading, filtering, statistics and pagination.
//!
//! The fixtures are built in memory. Every mode in the standard fixture
//! has a unique maximum, so no assertion depends on tie-breaking.

use super::io::{
    BIRTH_YEAR, Dataset, END_STATION, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use super::types::City;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

mod paginator;

pub(super) const CANAL: &str = "Canal St & Madison St";
pub(super) const CLINTON: &str = "Clinton St & Washington Blvd";
pub(super) const STREETER: &str = "Streeter Dr & Grand Ave";

pub(super) struct FixtureTrip {
    pub start: NaiveDateTime,
    pub duration: f64,
    pub from: &'static str,
    pub to: &'static str,
    pub user_type: Option<&'static str>,
    pub gender: Option<&'static str>,
    pub birth_year: Option<f64>,
}

pub(super) fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid fixture timestamp")
}

fn trip(
    start: NaiveDateTime,
    duration: f64,
    from: &'static str,
    to: &'static str,
    user_type: Option<&'static str>,
    gender: Option<&'static str>,
    birth_year: Option<f64>,
) -> FixtureTrip {
    FixtureTrip {
        start,
        duration,
        from,
        to,
        user_type,
        gender,
        birth_year,
    }
}

/// Twelve trips, January to June 2017.
///
/// Modes: month January, weekday Monday, hour 8, start station Canal,
/// end station Clinton, trip Canal → Clinton, birth year 1985.
pub(super) fn standard_trips() -> Vec<FixtureTrip> {
    let sub = Some("Subscriber");
    let cus = Some("Customer");
    let male = Some("Male");
    let female = Some("Female");
    vec![
        trip(at(1, 2, 8, 15), 600.0, CANAL, CLINTON, sub, male, Some(1985.0)),
        trip(at(1, 2, 8, 40), 900.0, CANAL, CLINTON, sub, female, Some(1990.0)),
        trip(at(1, 3, 17, 5), 300.0, CANAL, STREETER, cus, male, Some(1985.0)),
        trip(at(1, 9, 8, 30), 1200.0, CLINTON, CANAL, sub, male, Some(1985.0)),
        trip(at(2, 6, 8, 10), 450.0, CANAL, CLINTON, sub, None, None),
        trip(at(2, 7, 12, 0), 800.0, STREETER, CANAL, cus, female, Some(1972.0)),
        trip(at(3, 4, 8, 45), 1500.0, CANAL, CLINTON, sub, male, Some(2000.0)),
        trip(at(3, 5, 19, 20), 2000.0, CLINTON, STREETER, cus, None, None),
        trip(at(4, 12, 8, 5), 700.0, CANAL, STREETER, sub, male, Some(1990.0)),
        trip(at(5, 19, 17, 30), 650.0, STREETER, CLINTON, Some("Dependent"), female, Some(1985.0)),
        trip(at(6, 1, 8, 50), 500.0, CLINTON, CLINTON, sub, male, Some(1999.0)),
        trip(at(6, 16, 13, 15), 1000.0, CANAL, CLINTON, None, male, Some(1968.0)),
    ]
}

pub(super) fn trips_frame(trips: &[FixtureTrip], demographics: bool) -> PolarsResult<DataFrame> {
    let starts: Vec<NaiveDateTime> = trips.iter().map(|t| t.start).collect();
    let durations: Vec<f64> = trips.iter().map(|t| t.duration).collect();
    let froms: Vec<&str> = trips.iter().map(|t| t.from).collect();
    let tos: Vec<&str> = trips.iter().map(|t| t.to).collect();
    let user_types: Vec<Option<&str>> = trips.iter().map(|t| t.user_type).collect();

    let mut columns = vec![
        Column::from(Series::new(START_TIME.into(), &starts)),
        Column::from(Series::new(TRIP_DURATION.into(), &durations)),
        Column::from(Series::new(START_STATION.into(), &froms)),
        Column::from(Series::new(END_STATION.into(), &tos)),
        Column::from(Series::new(USER_TYPE.into(), &user_types)),
    ];

    if demographics {
        let genders: Vec<Option<&str>> = trips.iter().map(|t| t.gender).collect();
        let birth_years: Vec<Option<f64>> = trips.iter().map(|t| t.birth_year).collect();
        columns.push(Column::from(Series::new(GENDER.into(), &genders)));
        columns.push(Column::from(Series::new(BIRTH_YEAR.into(), &birth_years)));
    }

    DataFrame::new(columns)
}

/// Builds a dataset for `city` from fixture trips, with the columns the
/// city's capabilities call for.
pub(super) fn dataset(city: City, trips: &[FixtureTrip]) -> anyhow::Result<Dataset> {
    let frame = trips_frame(trips, city.capabilities().demographics)?;
    Ok(Dataset::from_frame(city, frame)?)
}

pub(super) fn chicago() -> anyhow::Result<Dataset> {
    dataset(City::Chicago, &standard_trips())
}

pub(super) fn washington() -> anyhow::Result<Dataset> {
    dataset(City::Washington, &standard_trips())
}
