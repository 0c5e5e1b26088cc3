//! The composed browser: query, derivation, selection, confirmation,
//! debounced search and the fetch lifecycle behind one handle.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::column::Column;
use crate::confirm::ConfirmDialog;
use crate::debounce::{DEFAULT_DELAY, DebouncedInput};
use crate::pager::PageControls;
use crate::query::QueryState;
use crate::row::Row;
use crate::selection::SelectionSet;
use crate::source::{Fetch, RowSource};
use crate::view::{View, derive};

/// Unique identifier for a browser instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrowserId(usize);

impl BrowserId {
    fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__browser_{}", self.0)
    }
}

/// Detail-click dispatcher, called with the clicked row.
pub type DetailHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Bulk-action dispatcher, called with the selected row ids.
pub type BulkHandler = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// Tunables for one browsing session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Field of the initial descending sort.
    pub default_sort_field: String,
    /// Settle delay of the debounced search input.
    pub search_delay: Duration,
}

impl BrowserConfig {
    /// Config with the given default sort field and the standard search
    /// delay.
    pub fn new(default_sort_field: impl Into<String>) -> Self {
        Self {
            default_sort_field: default_sort_field.into(),
            search_delay: DEFAULT_DELAY,
        }
    }

    /// Override the search settle delay.
    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }
}

/// One tabular browsing session over a row type.
///
/// Construction wires the parts together: the debounced search commits
/// into the query keyword, the selection clears itself on every
/// result-reshaping query change, and the confirmation dialog gates the
/// bulk dispatcher. Rendering stays outside; a view layer reads `view`,
/// `pager` and the component handles, and calls the mutators on user
/// gestures.
///
/// Cloning is cheap and every clone drives the same session.
pub struct Browser<T: Row> {
    id: BrowserId,
    config: BrowserConfig,
    columns: Vec<Column<T>>,
    query: QueryState,
    selection: SelectionSet,
    confirm: ConfirmDialog,
    search: DebouncedInput,
    fetch: Fetch<T>,
    detail: Arc<Mutex<Option<DetailHandler<T>>>>,
    bulk: Arc<Mutex<Option<BulkHandler>>>,
    cancel: CancellationToken,
}

impl<T: Row> Browser<T> {
    /// Create a browser over the given columns.
    pub fn new(config: BrowserConfig, columns: Vec<Column<T>>) -> Self {
        let id = BrowserId::next();
        let query = QueryState::new(&config.default_sort_field);

        let selection = SelectionSet::new();
        selection.bind(&query);

        let search = {
            let query = query.clone();
            DebouncedInput::with_delay(config.search_delay, move |keyword| {
                query.set_keyword(keyword);
            })
        };

        let bulk: Arc<Mutex<Option<BulkHandler>>> = Arc::new(Mutex::new(None));
        let confirm = {
            let selection = selection.clone();
            let bulk = Arc::clone(&bulk);
            ConfirmDialog::with_action(move || {
                let ids = selection.ids();
                if ids.is_empty() {
                    log::debug!("bulk action confirmed with nothing selected, skipped");
                    return;
                }
                log::debug!("bulk action confirmed for {} rows", ids.len());
                let handler = bulk.lock().ok().and_then(|guard| guard.clone());
                if let Some(handler) = handler {
                    handler(ids);
                }
                selection.clear();
            })
        };

        log::debug!("{id}: created (default sort {})", config.default_sort_field);

        Self {
            id,
            config,
            columns,
            query,
            selection,
            confirm,
            search,
            fetch: Fetch::new(),
            detail: Arc::new(Mutex::new(None)),
            bulk,
            cancel: CancellationToken::new(),
        }
    }

    /// Install the detail-click dispatcher.
    pub fn on_detail(self, handler: impl Fn(&T) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.detail.lock() {
            *guard = Some(Arc::new(handler));
        }
        self
    }

    /// Install the bulk-action dispatcher.
    pub fn on_bulk_action(self, handler: impl Fn(Vec<String>) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.bulk.lock() {
            *guard = Some(Arc::new(handler));
        }
        self
    }

    // ------------------------------------------------------------------------
    // Fetch lifecycle
    // ------------------------------------------------------------------------

    /// Start the one-shot collection fetch.
    ///
    /// Fire-and-forget: one logical fetch per session, no retry. A
    /// result arriving after `detach` is dropped without touching
    /// state.
    pub fn load(&self, source: Arc<dyn RowSource<T>>) {
        self.fetch.set_loading();
        let id = self.id;
        let fetch = self.fetch.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("{id}: fetch cancelled before delivery");
                    return;
                }
                result = source.fetch() => result,
            };
            match result {
                Ok(rows) => {
                    log::debug!("{id}: {} rows delivered", rows.len());
                    fetch.set_ready(rows);
                }
                Err(error) => {
                    log::warn!("{id}: fetch failed: {error}");
                    fetch.set_failed(error);
                }
            }
        });
    }

    /// Tear the session down: cancel the in-flight fetch and the
    /// pending search notification. Anything still completing becomes
    /// a no-op.
    pub fn detach(&self) {
        log::debug!("{id}: detached", id = self.id);
        self.cancel.cancel();
        self.search.shutdown();
    }

    // ------------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------------

    /// Derive the visible window from the delivered rows and the live
    /// query. Pure, recomputed on every call.
    pub fn view(&self) -> View<T> {
        derive(&self.fetch.rows(), &self.query.get())
    }

    /// Ids of the rows on the current page, in display order.
    pub fn page_ids(&self) -> Vec<String> {
        self.view().page_ids()
    }

    /// Pagination control state for the current window.
    pub fn pager(&self) -> PageControls {
        PageControls::new(self.query.page(), self.view().total_count)
    }

    /// Find a delivered row by id.
    pub fn find_row(&self, id: &str) -> Option<T> {
        self.fetch.rows().into_iter().find(|row| row.id() == id)
    }

    // ------------------------------------------------------------------------
    // User gestures
    // ------------------------------------------------------------------------

    /// Dispatch a detail request for the given row.
    pub fn request_detail(&self, row: &T) {
        let handler = self.detail.lock().ok().and_then(|guard| guard.clone());
        if let Some(handler) = handler {
            handler(row);
        }
    }

    /// Ask to run the bulk action over the current selection. Opens the
    /// confirmation dialog; refused while nothing is selected.
    pub fn request_bulk_action(&self) {
        if self.selection.is_empty() {
            log::debug!("{id}: bulk action requested with empty selection", id = self.id);
            return;
        }
        self.confirm.open();
    }

    /// Confirm the pending bulk action: the selected ids go to the
    /// dispatcher, the selection clears and the dialog closes. No-op
    /// while the dialog is closed.
    pub fn confirm_bulk_action(&self) {
        self.confirm.confirm();
    }

    /// Walk away from the pending bulk action. Nothing is dispatched
    /// and the selection stays.
    pub fn cancel_bulk_action(&self) {
        self.confirm.cancel();
    }

    // ------------------------------------------------------------------------
    // Component handles
    // ------------------------------------------------------------------------

    /// This browser's id.
    pub fn id(&self) -> BrowserId {
        self.id
    }

    /// The session tunables.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// The column set, in display order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// The query store.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The selection set.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The confirmation dialog.
    pub fn confirm(&self) -> &ConfirmDialog {
        &self.confirm
    }

    /// The debounced search input.
    pub fn search(&self) -> &DebouncedInput {
        &self.search
    }

    /// The fetch state.
    pub fn fetch(&self) -> &Fetch<T> {
        &self.fetch
    }
}

impl<T: Row> Clone for Browser<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            config: self.config.clone(),
            columns: self.columns.clone(),
            query: self.query.clone(),
            selection: self.selection.clone(),
            confirm: self.confirm.clone(),
            search: self.search.clone(),
            fetch: self.fetch.clone(),
            detail: Arc::clone(&self.detail),
            bulk: Arc::clone(&self.bulk),
            cancel: self.cancel.clone(),
        }
    }
}

impl<T: Row> fmt::Debug for Browser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("id", &self.id)
            .field("query", &self.query)
            .field("selection", &self.selection)
            .field("confirm", &self.confirm)
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}
