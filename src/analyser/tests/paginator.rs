use super::chicago;
use crate::analyser::filter::apply_filters;
use crate::analyser::io::TRIP_DURATION;
use crate::analyser::paginator::{PAGE_SIZE, Paginator};
use crate::analyser::types::{FilterCriteria, Month};
use anyhow::Result;
use polars::prelude::*;

fn durations(page: &DataFrame) -> Result<Vec<f64>> {
    Ok(page
        .column(TRIP_DURATION)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .flatten()
        .collect())
}

#[test]
fn test_twelve_rows_page_as_five_five_two() -> Result<()> {
    let view = apply_filters(&chicago()?, FilterCriteria::default())?;
    assert_eq!(view.len(), 12);

    let mut pages = Paginator::new(&view);
    let sizes: Vec<usize> = (0..5).map(|_| pages.next_page().height()).collect();
    assert_eq!(sizes, vec![5, 5, 2, 0, 0]);
    assert!(pages.is_exhausted());
    Ok(())
}

#[test]
fn test_pages_follow_row_order() -> Result<()> {
    let view = apply_filters(&chicago()?, FilterCriteria::default())?;
    let mut pages = Paginator::new(&view);

    assert_eq!(
        durations(&pages.next_page())?,
        vec![600.0, 900.0, 300.0, 1200.0, 450.0]
    );
    assert_eq!(pages.offset(), PAGE_SIZE);
    assert_eq!(
        durations(&pages.next_page())?,
        vec![800.0, 1500.0, 2000.0, 700.0, 650.0]
    );
    assert_eq!(durations(&pages.next_page())?, vec![500.0, 1000.0]);
    Ok(())
}

#[test]
fn test_paging_a_filtered_view() -> Result<()> {
    let view = apply_filters(
        &chicago()?,
        FilterCriteria::new(Some(Month::March), None),
    )?;
    let mut pages = Paginator::new(&view);
    assert_eq!(durations(&pages.next_page())?, vec![1500.0, 2000.0]);
    assert_eq!(pages.next_page().height(), 0);
    Ok(())
}

#[test]
fn test_empty_view_is_exhausted_from_the_start() -> Result<()> {
    let view = apply_filters(
        &chicago()?,
        FilterCriteria::parse("june", "monday")?,
    )?;
    let mut pages = Paginator::new(&view);
    assert!(pages.is_exhausted());
    assert_eq!(pages.next_page().height(), 0);
    Ok(())
}
