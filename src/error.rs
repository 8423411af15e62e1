//! Centralized error handling for the bikeshare analyser.
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! [`BikeshareError`]. The variants map onto the ways a run can go wrong:
//!
//! ```
//! use bikeshare::error::BikeshareError;
//!
//! fn describe(err: &BikeshareError) -> &'static str {
//!     match err {
//!         BikeshareError::DataUnavailable { .. } => "pick another city",
//!         BikeshareError::InvalidSelection(_) => "try again",
//!         _ => "something else went wrong",
//!     }
//! }
//! ```
//!
//! Filters that match no trips are not errors. Each statistics routine
//! reports "no data" on its own, so there is no variant for that case.
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`BikeshareError`]:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//!
//! fn read_raw(path: &str) -> bikeshare::error::Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read trip table")
//! }
//! ```

use crate::analyser::types::City;
use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum BikeshareError {
    /// The trip table for a city could not be read or parsed.
    DataUnavailable { city: City, reason: String },

    /// I/O errors outside of dataset loading (settings files, terminals)
    Io(std::io::Error),

    /// Polars failures while deriving, filtering or aggregating
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// A city, month or day answer outside the accepted vocabulary
    InvalidSelection(String),

    /// Generic error with context
    Other(String),
}

impl BikeshareError {
    pub fn data_unavailable(city: City, reason: impl fmt::Display) -> Self {
        Self::DataUnavailable {
            city,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for BikeshareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable { city, reason } => {
                write!(f, "Data for {city} is unavailable: {reason}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidSelection(msg) => write!(f, "Invalid selection: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikeshareError {}

impl From<std::io::Error> for BikeshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for BikeshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for BikeshareError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BikeshareError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", f(), err))
        })
    }
}
