//! # Bikeshare - US Bikeshare Trip Statistics
//!
//! Loads the trip table of one of three cities (Chicago, New York City,
//! Washington), optionally narrows it to a month and/or weekday, and
//! computes descriptive statistics over the remaining trips.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::analyser::{City, FilterCriteria, run_analysis};
//! use bikeshare::config::Settings;
//!
//! # fn example() -> bikeshare::error::Result<()> {
//! let settings = Settings::default();
//! let criteria = FilterCriteria::parse("march", "all")?;
//! let report = run_analysis(&settings, City::Chicago, criteria)?;
//!
//! for group in report.reports() {
//!     println!("{}\n{group}", group.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: loading, filtering, statistics and raw-row pagination
//!   - [`analyser::io`]: trip table loading and calendar derivation
//!   - [`analyser::stats`]: the four statistic groups
//! - [`config`]: user settings (data directory, display options)
//! - [`error`]: error types and handling utilities
//!
//! ## Key Concepts
//!
//! ### Derive Once, Filter Later
//!
//! `Month` and `Weekday` are derived from `Start Time` when the table is
//! loaded. Filtering compares those columns and never recomputes them.
//!
//! ### No Data Is Not an Error
//!
//! A month/day combination that matches no trips yields a valid, empty
//! [`analyser::FilteredView`]. Every statistic group then reports
//! "no data" instead of failing.
//!
//! ### Capabilities Over Probing
//!
//! Washington's table has no `Gender` or `Birth Year` column. That is
//! recorded up front in [`analyser::Capabilities`], and user statistics
//! branch on the flag rather than on a failed column lookup.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
