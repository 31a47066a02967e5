//! Diagnostic sink port for background transitions.
//!
//! A scheduled transition has no caller waiting on it, so its result is
//! reported here instead of being returned.

use super::TaskRepositoryError;
use crate::task::domain::{TaskId, TaskOutcome};
use std::time::Duration;

/// Result of a single scheduled transition.
#[derive(Debug, Clone)]
pub enum TransitionEvent {
    /// The outcome was written to the repository.
    Applied {
        /// Transitioned task.
        task_id: TaskId,
        /// Drawn outcome.
        outcome: TaskOutcome,
        /// Scheduled delay recorded as the task duration.
        duration: Duration,
    },
    /// The repository rejected the write.
    Failed {
        /// Task the transition targeted.
        task_id: TaskId,
        /// Repository error, usually [`TaskRepositoryError::NotFound`].
        error: TaskRepositoryError,
    },
    /// The transition was cancelled during shutdown before it fired.
    Abandoned {
        /// Task the transition targeted.
        task_id: TaskId,
    },
}

impl TransitionEvent {
    /// Returns the task the event refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Applied { task_id, .. }
            | Self::Failed { task_id, .. }
            | Self::Abandoned { task_id } => *task_id,
        }
    }
}

/// Receives exactly one event per scheduled transition.
pub trait TransitionDiagnostics: Send + Sync {
    /// Records a transition event.
    fn record(&self, event: TransitionEvent);
}
