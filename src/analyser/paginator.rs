use super::filter::FilteredView;
use polars::prelude::DataFrame;

/// Rows per raw-data page.
pub const PAGE_SIZE: usize = 5;

/// Walks a [`FilteredView`] in fixed-size windows, in original row order.
///
/// The offset only moves forward. Once past the end, every request yields
/// an empty page; create a new paginator to start over.
#[derive(Debug)]
pub struct Paginator<'a> {
    view: &'a FilteredView,
    offset: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(view: &'a FilteredView) -> Self {
        Self { view, offset: 0 }
    }

    /// Row index of the next page's first row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.view.len()
    }

    /// Returns the next page, which is shorter than [`PAGE_SIZE`] (or empty)
    /// near the end of the view.
    pub fn next_page(&mut self) -> DataFrame {
        let offset = i64::try_from(self.offset).unwrap_or(i64::MAX);
        let page = self.view.frame().slice(offset, PAGE_SIZE);
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        log::debug!("Raw page at offset {offset}: {} rows", page.height());
        page
    }
}
