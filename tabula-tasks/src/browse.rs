//! Wiring of the task browser.

use std::sync::Arc;
use std::time::Duration;

use tabula::browser::{Browser, BrowserConfig};
use tabula::source::MemorySource;

use crate::columns::task_columns;
use crate::model::Task;

/// Build the task browser: newest tasks first, standard search delay,
/// the task columns and the given dispatchers.
pub fn task_browser(
    on_detail: impl Fn(&Task) + Send + Sync + 'static,
    on_bulk: impl Fn(Vec<String>) + Send + Sync + 'static,
) -> Browser<Task> {
    Browser::new(BrowserConfig::new("created_at"), task_columns())
        .on_detail(on_detail)
        .on_bulk_action(on_bulk)
}

/// Wrap a generated collection in a latency-simulating source.
pub fn task_source(tasks: Vec<Task>, latency: Duration) -> Arc<MemorySource<Task>> {
    Arc::new(MemorySource::new(tasks).with_latency(latency))
}
