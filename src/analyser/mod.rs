//! Trip loading, filtering and the statistics computed over the result.
//!
//! ```text
//! load_dataset ──> apply_filters ──┬──> time / station / duration / user stats
//!                                  └──> Paginator (raw rows, 5 at a time)
//! ```

pub mod filter;
pub mod flows;
pub mod io;
pub mod mode;
pub mod paginator;
pub mod stats;
pub mod types;

pub use filter::{FilteredView, apply_filters};
pub use flows::{AnalysisReport, analyse_view, run_analysis};
pub use io::{Dataset, load_dataset, load_dataset_from_path};
pub use mode::most_frequent;
pub use paginator::{PAGE_SIZE, Paginator};
pub use stats::{
    DurationStats, Report, StationStats, TimeStats, UserStats, duration_stats, station_stats,
    time_stats, user_stats,
};
pub use types::{Capabilities, City, FilterCriteria, Month};

#[cfg(test)]
mod tests;
