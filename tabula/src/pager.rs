//! View-model shared by the rows-per-page and page-number controls.

use crate::query::{PER_PAGE_OPTIONS, PageSpec};

/// Everything both pagination controls need, derived from one window and
/// one filtered total.
///
/// Both controls write back through `QueryState::set_page` and
/// `set_per_page`, so they can never disagree about where the session
/// is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    /// The window the controls render.
    pub page: PageSpec,
    /// Filtered row count, measured before slicing.
    pub total_count: usize,
}

impl PageControls {
    /// Build the control state for the current window and total.
    pub fn new(page: PageSpec, total_count: usize) -> Self {
        Self { page, total_count }
    }

    /// The fixed rows-per-page choices.
    pub fn per_page_options(&self) -> &'static [usize] {
        &PER_PAGE_OPTIONS
    }

    /// Number of pages the filtered result spans.
    pub fn page_count(&self) -> usize {
        if self.page.per_page == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page.per_page)
    }

    /// The page number shown to the user, starting at one.
    pub fn display_page(&self) -> usize {
        self.page.page + 1
    }

    /// Map a user-facing page number back to the internal index.
    pub fn page_from_display(display: usize) -> usize {
        display.saturating_sub(1)
    }

    /// Whether the page-number control is rendered at all. It only
    /// appears when the result does not fit on a single page.
    pub fn show_page_selector(&self) -> bool {
        self.total_count > self.page.per_page
    }

    /// One-based position of the first row on the current page, zero
    /// when the page is empty.
    pub fn from_row(&self) -> usize {
        let start = self.page.page.saturating_mul(self.page.per_page);
        if start >= self.total_count {
            0
        } else {
            start + 1
        }
    }

    /// One-based position of the last row on the current page, zero
    /// when the page is empty.
    pub fn to_row(&self) -> usize {
        if self.from_row() == 0 {
            return 0;
        }
        let end = self
            .page
            .page
            .saturating_add(1)
            .saturating_mul(self.page.per_page);
        end.min(self.total_count)
    }
}
