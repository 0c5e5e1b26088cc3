//! Row sources and the state of the one-shot collection fetch.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::SourceError;

/// Provider of the fully materialized row collection.
///
/// The browser asks for the collection once per session and derives
/// every view from the delivered rows; where they came from is the
/// provider's business.
#[async_trait]
pub trait RowSource<T>: Send + Sync {
    /// Materialize the full collection.
    async fn fetch(&self) -> Result<Vec<T>, SourceError>;
}

/// An explicitly owned in-memory source.
///
/// Constructed once with the full collection; `fetch` hands out clones,
/// optionally after a fixed simulated latency. The collection lives in
/// a value the caller owns and initializes, never in module-level
/// statics populated on first touch.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    rows: Vec<T>,
    latency: Duration,
}

impl<T: Clone> MemorySource<T> {
    /// Create a source over an already materialized collection.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a slow provider with a fixed delivery delay.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of rows the source holds.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the source holds nothing.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> RowSource<T> for MemorySource<T> {
    async fn fetch(&self) -> Result<Vec<T>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.rows.clone())
    }
}

/// Where the one-shot collection fetch currently stands.
#[derive(Debug, Clone, Default)]
pub enum FetchState<T> {
    /// Not started.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Collection delivered.
    Ready(Vec<T>),
    /// The provider failed. No retry is attempted.
    Failed(SourceError),
}

impl<T> FetchState<T> {
    /// Check if the fetch has not started.
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    /// Check if the fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Check if the collection arrived.
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    /// Check if the provider failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// The delivered rows, if any.
    pub fn rows(&self) -> Option<&[T]> {
        match self {
            FetchState::Ready(rows) => Some(rows),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&SourceError> {
        match self {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Shared handle to the fetch state of one browsing session.
pub struct Fetch<T> {
    inner: Arc<RwLock<FetchState<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Fetch<T> {
    /// Create an idle fetch.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(FetchState::Idle)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(FetchState::Idle)
    }

    /// Clone of the delivered rows. Empty until ready.
    pub fn rows(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.rows().map(<[T]>::to_vec).unwrap_or_default())
            .unwrap_or_default()
    }

    /// Whether the fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    /// Whether the collection arrived.
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_ready())
            .unwrap_or(false)
    }

    /// Whether the provider failed.
    pub fn is_failed(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_failed())
            .unwrap_or(false)
    }

    /// Mark the fetch as in flight.
    pub fn set_loading(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = FetchState::Loading;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Deliver the collection.
    pub fn set_ready(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = FetchState::Ready(rows);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Record the failure.
    pub fn set_failed(&self, error: SourceError) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = FetchState::Failed(error);
            self.dirty.store(true, Ordering::SeqCst);
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

impl<T> Clone for Fetch<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Fetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .inner
            .read()
            .map(|guard| match &*guard {
                FetchState::Idle => "Idle".to_string(),
                FetchState::Loading => "Loading".to_string(),
                FetchState::Ready(rows) => format!("Ready({} rows)", rows.len()),
                FetchState::Failed(error) => format!("Failed({error})"),
            })
            .unwrap_or_else(|_| "poisoned".to_string());
        f.debug_struct("Fetch").field("state", &state).finish()
    }
}
