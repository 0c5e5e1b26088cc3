//! Trailing-edge debounce for rapidly changing text input.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Callback receiving the settled value.
pub type SettleHandler = Arc<dyn Fn(String) + Send + Sync>;

/// Default settle delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// A debounced text value.
///
/// Edits land in an internal mirror immediately; the settle handler
/// fires once the value has been left alone for the configured delay.
/// Each edit cancels the previous pending timer, so at most one timer
/// is live per controller and only the trailing edit is reported.
///
/// `sync` resynchronizes the mirror to an externally changed value and
/// drops the pending notification; `shutdown` tears the controller down
/// for good. A timer that already reached the executor when either
/// happens checks a closed flag and backs out.
///
/// Timers are tokio tasks, so edits must happen inside a runtime.
pub struct DebouncedInput {
    value: Arc<RwLock<String>>,
    handler: SettleHandler,
    delay: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    closed: Arc<AtomicBool>,
    dirty: Arc<AtomicBool>,
}

impl DebouncedInput {
    /// Create a controller with the default 300 ms delay.
    pub fn new(handler: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self::with_delay(DEFAULT_DELAY, handler)
    }

    /// Create a controller with an explicit settle delay.
    pub fn with_delay(delay: Duration, handler: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            value: Arc::new(RwLock::new(String::new())),
            handler: Arc::new(handler),
            delay,
            pending: Arc::new(Mutex::new(None)),
            closed: Arc::new(AtomicBool::new(false)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The current mirror value. Reflects every edit immediately,
    /// without waiting for the settle delay.
    pub fn text(&self) -> String {
        self.value
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Record an edit: update the mirror now and restart the settle
    /// timer. After `shutdown` the mirror still updates but no timer is
    /// armed.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        if let Ok(mut guard) = self.value.write() {
            *guard = text.clone();
            self.dirty.store(true, Ordering::SeqCst);
        }
        self.restart_timer(text);
    }

    /// Resynchronize the mirror to an externally changed value.
    ///
    /// Takes effect immediately and drops any pending notification;
    /// after a programmatic reset there is nothing left to report.
    pub fn sync(&self, text: impl Into<String>) {
        let text = text.into();
        if let Ok(mut guard) = self.value.write() {
            if *guard != text {
                *guard = text;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
        self.cancel_pending();
    }

    /// Tear the controller down: cancel the pending timer and refuse
    /// any late firing. Permanent.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.cancel_pending();
    }

    /// Check if the mirror changed since the last dirty clear.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn cancel_pending(&self) {
        if let Ok(mut guard) = self.pending.lock()
            && let Some(handle) = guard.take()
        {
            handle.abort();
        }
    }

    fn restart_timer(&self, text: String) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        if let Ok(mut guard) = self.pending.lock() {
            if let Some(previous) = guard.take() {
                previous.abort();
            }
            let handler = Arc::clone(&self.handler);
            let closed = Arc::clone(&self.closed);
            // The deadline is fixed here, not at first poll, so a timer
            // parked behind a busy executor still fires on time.
            let deadline = Instant::now() + self.delay;
            *guard = Some(tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;
                if !closed.load(Ordering::SeqCst) {
                    handler(text);
                }
            }));
        }
    }
}

impl Clone for DebouncedInput {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            handler: Arc::clone(&self.handler),
            delay: self.delay,
            pending: Arc::clone(&self.pending),
            closed: Arc::clone(&self.closed),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl fmt::Debug for DebouncedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedInput")
            .field("value", &self.text())
            .field("delay", &self.delay)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
