//! Cross-page row selection keyed by id.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::query::{QueryEvent, QueryState};

/// Aggregate selection flags for the rows of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSelection {
    /// Every row on the page is selected and the page is not empty.
    pub all: bool,
    /// At least one row on the page is selected but not all of them,
    /// the indeterminate checkbox state.
    pub some: bool,
}

/// Row selection independent of the visible page.
///
/// Membership is tracked by row id, so a selection made on page one
/// survives paging away and back. Bind the set to a `QueryState` to
/// clear it whenever the result is reshaped: a keyword, filter, sort or
/// page-size change invalidates what "selected" referred to, while a
/// plain page move does not.
pub struct SelectionSet {
    inner: Arc<RwLock<HashSet<String>>>,
    dirty: Arc<AtomicBool>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashSet::new())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flip membership of one row id.
    pub fn toggle(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write() {
            if !guard.remove(id) {
                guard.insert(id.to_string());
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Select or deselect every row of the current page.
    ///
    /// Touches only the given page ids; rows selected on other pages
    /// stay as they are.
    pub fn set_page_selected(&self, page_ids: &[String], checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            if checked {
                for id in page_ids {
                    guard.insert(id.clone());
                }
            } else {
                for id in page_ids {
                    guard.remove(id);
                }
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Aggregate flags for the given page ids, for the header checkbox.
    pub fn page_flags(&self, page_ids: &[String]) -> PageSelection {
        self.inner
            .read()
            .map(|guard| {
                let selected = page_ids.iter().filter(|id| guard.contains(*id)).count();
                PageSelection {
                    all: !page_ids.is_empty() && selected == page_ids.len(),
                    some: selected > 0 && selected < page_ids.len(),
                }
            })
            .unwrap_or_default()
    }

    /// Whether the row id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.contains(id))
            .unwrap_or(false)
    }

    /// Selected ids, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the whole selection.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.is_empty()
        {
            guard.clear();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Subscribe this selection to the query fields it depends on.
    ///
    /// Keyword, filter, sort field, sort direction and page size all
    /// clear the selection when they change. Page moves are deliberately
    /// left out so a selection survives navigation.
    pub fn bind(&self, query: &QueryState) {
        let selection = self.clone();
        query.subscribe(Arc::new(move |event| match event {
            QueryEvent::Keyword
            | QueryEvent::Filter
            | QueryEvent::SortField
            | QueryEvent::SortDirection
            | QueryEvent::PerPage => {
                log::debug!("query reshaped ({event:?}), clearing selection");
                selection.clear();
            }
            QueryEvent::Page => {}
        }));
    }

    /// Check if the selection changed since the last dirty clear.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for SelectionSet {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSet")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
