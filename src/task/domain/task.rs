//! Task record and its status types.

use super::{ParseTaskStatusError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been registered and its simulated work has not finished.
    Pending,
    /// Simulated work finished successfully.
    Completed,
    /// Simulated work finished with a failure.
    Failed,
}

impl TaskStatus {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for statuses that never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of a scheduled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// The task completed.
    Completed,
    /// The task failed.
    Failed,
}

impl From<TaskOutcome> for TaskStatus {
    fn from(outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Completed => Self::Completed,
            TaskOutcome::Failed => Self::Failed,
        }
    }
}

/// Tracked unit of simulated asynchronous work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    title: TaskTitle,
    created_at: DateTime<Utc>,
    duration: Duration,
}

impl Task {
    /// Creates a pending task with a fresh identifier.
    #[must_use]
    pub fn new_pending(title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            status: TaskStatus::Pending,
            title,
            created_at: clock.utc(),
            duration: Duration::ZERO,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the caller-supplied title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the recorded duration.
    ///
    /// Zero while pending; afterwards the delay the transition was scheduled
    /// with, not the measured wall-clock time.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Replaces the mutable fields with a terminal outcome.
    ///
    /// Callers hold exclusive access to the record, so status and duration
    /// are always observed together.
    pub const fn record_outcome(&mut self, outcome: TaskOutcome, duration: Duration) {
        self.status = match outcome {
            TaskOutcome::Completed => TaskStatus::Completed,
            TaskOutcome::Failed => TaskStatus::Failed,
        };
        self.duration = duration;
    }
}
