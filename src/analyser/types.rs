use crate::error::{BikeshareError, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// LOOKUP TABLES

/// City selector → trip table file name.
pub const CITY_DATA: [(City, &str); 3] = [
    (City::Chicago, "chicago.csv"),
    (City::NewYorkCity, "new_york_city.csv"),
    (City::Washington, "washington.csv"),
];

/// Months covered by the trip tables, in calendar order.
pub const MONTH_NAMES: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Day names indexed by days from Monday.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const ALL: &str = "all";

// CITY

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chicago => "Chicago",
            Self::NewYorkCity => "New York City",
            Self::Washington => "Washington",
        }
    }

    pub fn file_name(self) -> &'static str {
        CITY_DATA
            .iter()
            .find(|(city, _)| *city == self)
            .map_or("", |(_, file)| *file)
    }

    /// Which optional columns this city's table carries.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Chicago | Self::NewYorkCity => Capabilities { demographics: true },
            Self::Washington => Capabilities {
                demographics: false,
            },
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.as_str().to_lowercase() == wanted)
            .ok_or_else(|| {
                BikeshareError::InvalidSelection(format!(
                    "'{}' is not one of Chicago, New York City or Washington",
                    s.trim()
                ))
            })
    }
}

/// Per-city schema flags, fixed at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// `Gender` and `Birth Year` columns are present.
    pub demographics: bool,
}

// MONTH

/// The months a filter may select. Trip tables only cover January to June.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Self; 6] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
    ];

    /// Calendar number, 1 for January.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        month_name(self.number()).unwrap_or("")
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        MONTH_NAMES
            .iter()
            .position(|name| *name == wanted)
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| {
                BikeshareError::InvalidSelection(format!(
                    "'{}' is not a month between January and June",
                    s.trim()
                ))
            })
    }
}

/// English name for any calendar month number (1-12).
pub fn month_name(number: u32) -> Option<&'static str> {
    let month = chrono::Month::try_from(u8::try_from(number).ok()?).ok()?;
    Some(month.name())
}

/// English name for a weekday index (0 = Monday).
pub fn day_name(index: u32) -> Option<&'static str> {
    let weekday = Weekday::try_from(u8::try_from(index).ok()?).ok()?;
    Some(match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    })
}

/// Parses a weekday from its full English name.
pub fn parse_day(s: &str) -> Result<Weekday> {
    let wanted = s.trim().to_lowercase();
    DAY_NAMES
        .iter()
        .position(|name| *name == wanted)
        .and_then(|idx| u8::try_from(idx).ok())
        .and_then(|idx| Weekday::try_from(idx).ok())
        .ok_or_else(|| {
            BikeshareError::InvalidSelection(format!("'{}' is not a day of the week", s.trim()))
        })
}

// FILTER CRITERIA

/// Optional month and weekday restriction. `None` means "all".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterCriteria {
    pub fn new(month: Option<Month>, day: Option<Weekday>) -> Self {
        Self { month, day }
    }

    /// Parses a month answer: a month name or "all".
    pub fn parse_month(s: &str) -> Result<Option<Month>> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    /// Parses a day answer: a day name or "all".
    pub fn parse_day(s: &str) -> Result<Option<Weekday>> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(None)
        } else {
            parse_day(s).map(Some)
        }
    }

    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: Self::parse_month(month)?,
            day: Self::parse_day(day)?,
        })
    }

    /// Weekday filter as an index from Monday.
    pub fn day_index(&self) -> Option<u32> {
        self.day.map(|d| d.num_days_from_monday())
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all months", Month::name);
        let day = self
            .day_index()
            .and_then(day_name)
            .unwrap_or("all days");
        write!(f, "{month}, {day}")
    }
}
