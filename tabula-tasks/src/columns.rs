//! Column set for the task table.

use tabula::column::Column;

use crate::model::Task;

/// The four task columns. Title and creation date sort; creator and
/// creation date render through formatters, status shows its raw value.
pub fn task_columns() -> Vec<Column<Task>> {
    vec![
        Column::new("title", "Title").sortable(),
        Column::new("status", "Status"),
        Column::new("created_by", "Created by")
            .with_format(|task: &Task| task.created_by.name.clone()),
        Column::new("created_at", "Created at")
            .sortable()
            .with_format(|task: &Task| task.created_at.format("%Y-%m-%d").to_string()),
    ]
}
