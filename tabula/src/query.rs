//! Query state for a browsing session: keyword, filter, sort and
//! pagination behind one shared handle.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Rows-per-page values the store accepts.
pub const PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];

// ============================================================================
// Sort
// ============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending (A to Z, oldest first).
    Asc,
    /// Descending (Z to A, newest first).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// The active sort. Exactly one field sorts at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field selector on the row type.
    pub field: String,
    /// Direction applied to that field.
    pub direction: Direction,
}

impl SortSpec {
    /// Ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

// ============================================================================
// Pagination window
// ============================================================================

/// The pagination window: zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// Zero-based page index. The store never clamps it; a window past
    /// the end of the result simply derives an empty page.
    pub page: usize,
    /// Rows per page, one of `PER_PAGE_OPTIONS`.
    pub per_page: usize,
}

impl PageSpec {
    /// First page with the given page size.
    pub fn first(per_page: usize) -> Self {
        Self { page: 0, per_page }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: PER_PAGE_OPTIONS[0],
        }
    }
}

// ============================================================================
// Query params
// ============================================================================

/// The full query of one browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Keyword matched against each row's search text. `None` keeps
    /// every row.
    pub keyword: Option<String>,
    /// Secondary filter value. Carried and change-tracked like the
    /// keyword but not applied by the derivation; reserved for
    /// caller-defined narrowing.
    pub filter: Option<String>,
    /// The active sort.
    pub sort: SortSpec,
    /// The pagination window.
    pub page: PageSpec,
}

impl QueryParams {
    /// Initial query: descending sort on the given field, first page of
    /// ten, no keyword or filter.
    pub fn new(default_sort_field: impl Into<String>) -> Self {
        Self {
            keyword: None,
            filter: None,
            sort: SortSpec::desc(default_sort_field),
            page: PageSpec::default(),
        }
    }
}

// ============================================================================
// Change events
// ============================================================================

/// Which query field an applied mutation changed.
///
/// Subscribers pick the fields they depend on by matching variants; see
/// `SelectionSet::bind` for the selection-reset contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    /// The keyword changed.
    Keyword,
    /// The secondary filter changed.
    Filter,
    /// The sort moved to a different field.
    SortField,
    /// The sort direction flipped on the same field.
    SortDirection,
    /// Only the page index moved.
    Page,
    /// The page size changed.
    PerPage,
}

/// Listener invoked synchronously after each applied query mutation.
pub type QueryListener = Arc<dyn Fn(&QueryEvent) + Send + Sync>;

// ============================================================================
// Store
// ============================================================================

/// Shared handle to the query state of one browsing session.
///
/// All mutations go through the setters. Each applied change flips the
/// dirty flag and notifies subscribers with the event naming the changed
/// field; mutations that do not change anything stay silent. Setters
/// never touch fields other than the one they name.
pub struct QueryState {
    inner: Arc<RwLock<QueryParams>>,
    listeners: Arc<Mutex<Vec<QueryListener>>>,
    dirty: Arc<AtomicBool>,
}

impl QueryState {
    /// Create query state with the initial descending sort on the given
    /// field.
    pub fn new(default_sort_field: impl Into<String>) -> Self {
        Self::with_params(QueryParams::new(default_sort_field))
    }

    /// Create query state from explicit initial params.
    pub fn with_params(params: QueryParams) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current query.
    pub fn get(&self) -> QueryParams {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Current keyword, if any.
    pub fn keyword(&self) -> Option<String> {
        self.get().keyword
    }

    /// Current secondary filter, if any.
    pub fn filter(&self) -> Option<String> {
        self.get().filter
    }

    /// Current sort.
    pub fn sort(&self) -> SortSpec {
        self.get().sort
    }

    /// Current pagination window.
    pub fn page(&self) -> PageSpec {
        self.get().page
    }

    /// Replace the keyword. Empty text means "no keyword".
    ///
    /// Sort and pagination are left alone; pairing this with a page
    /// reset is the caller's decision.
    pub fn set_keyword(&self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        let keyword = (!keyword.is_empty()).then_some(keyword);
        let changed = if let Ok(mut guard) = self.inner.write() {
            if guard.keyword != keyword {
                guard.keyword = keyword;
                true
            } else {
                false
            }
        } else {
            false
        };
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(QueryEvent::Keyword);
        }
    }

    /// Replace the secondary filter. `None` clears it.
    pub fn set_filter(&self, filter: Option<String>) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            if guard.filter != filter {
                guard.filter = filter;
                true
            } else {
                false
            }
        } else {
            false
        };
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(QueryEvent::Filter);
        }
    }

    /// Sort by a field, toggling on repeat.
    ///
    /// Sorting the field already active flips its direction; sorting a
    /// different field starts ascending. Callers pass sortable column
    /// ids only; the store does not re-validate them.
    pub fn set_sort(&self, field: impl Into<String>) {
        let field = field.into();
        let mut event = None;
        if let Ok(mut guard) = self.inner.write() {
            if guard.sort.field == field {
                guard.sort.direction = guard.sort.direction.flipped();
                event = Some(QueryEvent::SortDirection);
            } else {
                guard.sort = SortSpec::asc(field);
                event = Some(QueryEvent::SortField);
            }
        }
        if let Some(event) = event {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(event);
        }
    }

    /// Replace the pagination window wholesale.
    ///
    /// A `per_page` outside `PER_PAGE_OPTIONS` rejects the whole
    /// mutation: the previous window stays, a warning is logged and
    /// `false` comes back. Callers changing the page size are expected
    /// to hand in `page: 0`; `set_per_page` does that for you.
    pub fn set_pagination(&self, page: PageSpec) -> bool {
        if !PER_PAGE_OPTIONS.contains(&page.per_page) {
            log::warn!(
                "rejected per_page {} (allowed: {:?})",
                page.per_page,
                PER_PAGE_OPTIONS
            );
            return false;
        }
        let mut event = None;
        if let Ok(mut guard) = self.inner.write() {
            if guard.page.per_page != page.per_page {
                event = Some(QueryEvent::PerPage);
            } else if guard.page.page != page.page {
                event = Some(QueryEvent::Page);
            }
            guard.page = page;
        }
        if let Some(event) = event {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(event);
        }
        true
    }

    /// Move to a page, keeping the page size.
    pub fn set_page(&self, page: usize) {
        let per_page = self.page().per_page;
        self.set_pagination(PageSpec { page, per_page });
    }

    /// Change the page size, going back to the first page.
    pub fn set_per_page(&self, per_page: usize) -> bool {
        self.set_pagination(PageSpec::first(per_page))
    }

    /// Register a listener for applied mutations.
    ///
    /// Listeners run synchronously on the mutating call, after the write
    /// lock is released, in registration order.
    pub fn subscribe(&self, listener: QueryListener) {
        if let Ok(mut guard) = self.listeners.lock() {
            guard.push(listener);
        }
    }

    fn notify(&self, event: QueryEvent) {
        log::trace!("query changed: {event:?}");
        let listeners = self
            .listeners
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        for listener in &listeners {
            listener(&event);
        }
    }

    /// Check if the state changed since the last dirty clear.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for QueryState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            listeners: Arc::clone(&self.listeners),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl fmt::Debug for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryState")
            .field("params", &self.get())
            .finish_non_exhaustive()
    }
}
