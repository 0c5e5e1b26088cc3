//! Guarded confirmation dialog for destructive bulk actions.
//!
//! The dialog has two states, closed and open, and refuses the casual
//! ways out: outside clicks and escape presses are swallowed, so the
//! only exits are an explicit confirm or cancel.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Why a dismissal gesture was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Click or tap outside the dialog surface.
    OutsideClick,
    /// Escape key press.
    EscapeKey,
}

/// Callback run when the dialog is confirmed.
pub type ConfirmAction = Arc<dyn Fn() + Send + Sync>;

/// Two-state confirmation dialog guarding one action.
///
/// `open` is the only way in, `confirm` and `cancel` the only ways out.
/// Only `confirm` runs the gated action, exactly once per confirmation.
pub struct ConfirmDialog {
    open: Arc<AtomicBool>,
    action: Arc<Mutex<Option<ConfirmAction>>>,
    dirty: Arc<AtomicBool>,
}

impl ConfirmDialog {
    /// Create a closed dialog with no gated action yet.
    pub fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(false)),
            action: Arc::new(Mutex::new(None)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a closed dialog with the gated action installed.
    pub fn with_action(action: impl Fn() + Send + Sync + 'static) -> Self {
        let dialog = Self::new();
        dialog.set_action(action);
        dialog
    }

    /// Install or replace the gated action.
    pub fn set_action(&self, action: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut guard) = self.action.lock() {
            *guard = Some(Arc::new(action));
        }
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Closed to open. No-op when already open.
    pub fn open(&self) {
        if !self.open.swap(true, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Open to closed, running the gated action once. No-op when closed.
    ///
    /// The state flips before the action runs, so an action observing
    /// the dialog sees it closed.
    pub fn confirm(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
            let action = self.action.lock().ok().and_then(|guard| guard.clone());
            if let Some(action) = action {
                action();
            }
        }
    }

    /// Open to closed without running the gated action. No-op when
    /// closed.
    pub fn cancel(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Swallow a dismissal gesture. The dialog stays open; destructive
    /// actions get answered deliberately or not at all.
    pub fn dismiss(&self, reason: DismissReason) {
        if self.is_open() {
            log::debug!("ignoring dismissal gesture: {reason:?}");
        }
    }

    /// Check if the dialog state changed since the last dirty clear.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for ConfirmDialog {
    fn clone(&self) -> Self {
        Self {
            open: Arc::clone(&self.open),
            action: Arc::clone(&self.action),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}
