use super::io::{Dataset, MONTH, WEEKDAY};
use super::types::{Capabilities, City, FilterCriteria};
use crate::error::Result;
use polars::prelude::*;

/// The trips of a [`Dataset`] that match a [`FilterCriteria`].
///
/// Owns its own frame; the dataset it came from is left untouched.
#[derive(Clone, Debug)]
pub struct FilteredView {
    city: City,
    capabilities: Capabilities,
    criteria: FilterCriteria,
    frame: DataFrame,
}

impl FilteredView {
    pub fn city(&self) -> City {
        self.city
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Keeps the trips whose derived month and weekday match `criteria`.
///
/// # Errors
///
/// Returns an error only if polars fails to evaluate the predicates.
pub fn apply_filters(dataset: &Dataset, criteria: FilterCriteria) -> Result<FilteredView> {
    let mut lf = dataset.frame().clone().lazy();

    if let Some(month) = criteria.month {
        lf = lf.filter(col(MONTH).eq(lit(month.number() as i32)));
    }
    if let Some(day) = criteria.day_index() {
        lf = lf.filter(col(WEEKDAY).eq(lit(day as i32)));
    }

    let frame = lf.collect()?;
    log::info!(
        "Filter ({criteria}) kept {} of {} {} trips",
        frame.height(),
        dataset.len(),
        dataset.city()
    );

    Ok(FilteredView {
        city: dataset.city(),
        capabilities: dataset.capabilities(),
        criteria,
        frame,
    })
}
