use std::sync::{Arc, Mutex};
use std::time::Duration;

use tabula::debounce::DebouncedInput;

fn recording() -> (Arc<Mutex<Vec<String>>>, DebouncedInput) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let input = DebouncedInput::with_delay(Duration::from_millis(300), move |value| {
        sink.lock().unwrap().push(value);
    });
    (calls, input)
}

#[tokio::test(start_paused = true)]
async fn test_only_the_trailing_edit_is_reported() {
    let (calls, input) = recording();

    input.set_text("a");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(100)).await;

    input.set_text("ab");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(100)).await;

    input.set_text("abc");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(299)).await;
    tokio::task::yield_now().await;

    // 499 ms in: the timer restarted on every edit, nothing fired yet,
    // but the mirror already shows the latest text.
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(input.text(), "abc");

    tokio::time::advance(Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert_eq!(*calls.lock().unwrap(), vec!["abc"]);
}

#[tokio::test(start_paused = true)]
async fn test_each_edit_restarts_the_clock() {
    let (calls, input) = recording();

    input.set_text("a");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(250)).await;

    input.set_text("b");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(250)).await;
    tokio::task::yield_now().await;

    // Half a second of wall time, but the second edit reset the countdown.
    assert!(calls.lock().unwrap().is_empty());

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert_eq!(*calls.lock().unwrap(), vec!["b"]);
}

#[tokio::test(start_paused = true)]
async fn test_settled_value_fires_exactly_once() {
    let (calls, input) = recording();

    input.set_text("stable");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(900)).await;
    tokio::task::yield_now().await;

    assert_eq!(*calls.lock().unwrap(), vec!["stable"]);
}

#[tokio::test(start_paused = true)]
async fn test_sync_applies_immediately_and_drops_the_pending_timer() {
    let (calls, input) = recording();

    input.set_text("typed");
    tokio::task::yield_now().await;

    input.sync("reset");
    assert_eq!(input.text(), "reset");

    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_silences_late_timers() {
    let (calls, input) = recording();

    input.set_text("typed");
    tokio::task::yield_now().await;
    input.shutdown();

    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert!(calls.lock().unwrap().is_empty());

    // Edits after teardown still mirror but never notify.
    input.set_text("later");
    assert_eq!(input.text(), "later");
    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert!(calls.lock().unwrap().is_empty());
}
