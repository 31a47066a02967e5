//! Transport-facing representations of tasks.
//!
//! The HTTP gateway lives outside this crate; these types pin the JSON shape
//! it exposes and the input validation it performs before calling the
//! lifecycle service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::domain::{Task, TaskDomainError, TaskId, TaskTitle};

/// Serialisable view of a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Hyphenated task identifier.
    pub task_id: String,
    /// Lowercase status.
    pub status: &'static str,
    /// Task title.
    pub title: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: DateTime<Utc>,
    /// Recorded duration in whole milliseconds.
    pub duration_ms: u64,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().to_string(),
            status: task.status().as_str(),
            title: task.title().as_str().to_owned(),
            created_at: task.created_at(),
            duration_ms: u64::try_from(task.duration().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Body of a task registration request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterTaskRequest {
    /// Requested title; must not be empty.
    #[serde(default)]
    pub title: String,
}

impl RegisterTaskRequest {
    /// Validates the request into a task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// or missing.
    pub fn into_title(self) -> Result<TaskTitle, TaskDomainError> {
        TaskTitle::new(self.title)
    }
}

/// Parses a task identifier taken from a request path.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTaskId`] for empty or malformed values.
pub fn parse_task_id(raw: &str) -> Result<TaskId, TaskDomainError> {
    TaskId::parse_str(raw)
}
