use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tabula::confirm::{ConfirmDialog, DismissReason};

fn counting() -> (Arc<AtomicUsize>, ConfirmDialog) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    let dialog = ConfirmDialog::with_action(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (count, dialog)
}

#[test]
fn test_dismissal_gestures_are_swallowed() {
    let (count, dialog) = counting();
    dialog.open();

    dialog.dismiss(DismissReason::OutsideClick);
    assert!(dialog.is_open());
    dialog.dismiss(DismissReason::EscapeKey);
    assert!(dialog.is_open());

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_confirm_closes_and_runs_the_action_once() {
    let (count, dialog) = counting();
    dialog.open();
    dialog.confirm();

    assert!(!dialog.is_open());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Confirming a closed dialog does nothing.
    dialog.confirm();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cancel_closes_without_running_the_action() {
    let (count, dialog) = counting();
    dialog.open();
    dialog.cancel();

    assert!(!dialog.is_open());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cancel_when_closed_is_a_no_op() {
    let (count, dialog) = counting();
    dialog.cancel();
    assert!(!dialog.is_open());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_reopening_allows_another_confirmation() {
    let (count, dialog) = counting();
    dialog.open();
    dialog.confirm();
    dialog.open();
    dialog.confirm();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_open_is_idempotent() {
    let (count, dialog) = counting();
    assert!(!dialog.is_dirty());

    dialog.open();
    assert!(dialog.is_dirty());

    // A second open is not a state change.
    dialog.clear_dirty();
    dialog.open();
    assert!(dialog.is_open());
    assert!(!dialog.is_dirty());

    dialog.confirm();
    assert!(dialog.is_dirty());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_action_observes_the_dialog_already_closed() {
    let dialog = ConfirmDialog::new();
    let seen_open = Arc::new(AtomicBool::new(true));
    let seen = Arc::clone(&seen_open);
    let observed = dialog.clone();
    dialog.set_action(move || {
        seen.store(observed.is_open(), Ordering::SeqCst);
    });

    dialog.open();
    dialog.confirm();
    assert!(!seen_open.load(Ordering::SeqCst));
}

#[test]
fn test_dialog_without_action_still_cycles() {
    let dialog = ConfirmDialog::new();
    dialog.open();
    dialog.confirm();
    assert!(!dialog.is_open());
}
