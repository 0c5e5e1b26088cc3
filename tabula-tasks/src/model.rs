//! Task domain model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use tabula::row::Row;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Stable identifier, also used as the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// A user tasks are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: User,
}

impl Row for Task {
    fn id(&self) -> String {
        self.id.clone()
    }

    // The keyword search matches titles only.
    fn search_text(&self) -> String {
        self.title.clone()
    }

    fn sort_key(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            "status" => Some(self.status.as_str().to_string()),
            // Fixed-width RFC 3339 so the string order is the
            // chronological order.
            "created_at" => Some(
                self.created_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ),
            "created_by" => Some(self.created_by.name.clone()),
            _ => None,
        }
    }
}
