//! Service layer for task registration, lookup, and deletion.

use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TransitionDiagnostics, TransitionEvent},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::{
    registry::{ShutdownMode, TransitionRegistry},
    schedule::{OutcomeSampler, TransitionSchedule, WeightedOutcome},
};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Caller input failed validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error("{operation}: {source}")]
    Repository {
        /// Service operation that issued the repository call.
        operation: &'static str,
        /// Unchanged repository error.
        #[source]
        source: TaskRepositoryError,
    },
    /// Registration was attempted after shutdown started.
    #[error("task lifecycle service is shutting down")]
    ShuttingDown,
}

impl TaskLifecycleError {
    const fn repository(operation: &'static str, source: TaskRepositoryError) -> Self {
        Self::Repository { operation, source }
    }

    /// Returns the wrapped repository error, if any.
    #[must_use]
    pub const fn repository_error(&self) -> Option<&TaskRepositoryError> {
        match self {
            Self::Repository { source, .. } => Some(source),
            Self::Domain(_) | Self::ShuttingDown => None,
        }
    }

    /// Returns `true` when the referenced task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Repository {
                source: TaskRepositoryError::NotFound(_),
                ..
            }
        )
    }

    /// Returns `true` when caller input was rejected.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Registration stores a pending task and schedules one background
/// transition that, after [`TransitionSchedule::delay`], writes a drawn
/// terminal outcome. The transition is not awaited by the caller and its
/// result only reaches the diagnostic sink.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C, D>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync,
    D: TransitionDiagnostics + 'static,
{
    repository: Arc<R>,
    clock: Arc<C>,
    diagnostics: Arc<D>,
    schedule: TransitionSchedule,
    sampler: Arc<dyn OutcomeSampler>,
    transitions: Arc<TransitionRegistry>,
}

impl<R, C, D> TaskLifecycleService<R, C, D>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync,
    D: TransitionDiagnostics + 'static,
{
    /// Creates a new task lifecycle service with the default outcome weights.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        diagnostics: Arc<D>,
        schedule: TransitionSchedule,
    ) -> Self {
        Self {
            repository,
            clock,
            diagnostics,
            schedule,
            sampler: Arc::new(WeightedOutcome::default()),
            transitions: Arc::new(TransitionRegistry::new()),
        }
    }

    /// Replaces the outcome sampler.
    #[must_use]
    pub fn with_sampler(mut self, sampler: Arc<dyn OutcomeSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Returns the transition schedule.
    #[must_use]
    pub const fn schedule(&self) -> TransitionSchedule {
        self.schedule
    }

    /// Returns the registry of outstanding transitions.
    #[must_use]
    pub fn transitions(&self) -> &TransitionRegistry {
        &self.transitions
    }

    /// Returns the number of transitions that have not fired yet.
    #[must_use]
    pub fn outstanding_transitions(&self) -> usize {
        self.transitions.outstanding()
    }

    /// Registers a pending task and schedules its terminal transition.
    ///
    /// Returns as soon as the task is stored; the transition runs detached.
    /// A registration admitted before shutdown started always has its
    /// transition spawned before the registry closes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ShuttingDown`] after shutdown started,
    /// or [`TaskLifecycleError::Repository`] when the repository rejects the
    /// task. No transition is scheduled in either case.
    pub async fn register_task(&self, title: TaskTitle) -> TaskLifecycleResult<TaskId> {
        let Some(_admission) = self.transitions.admit().await else {
            return Err(TaskLifecycleError::ShuttingDown);
        };

        let task = Task::new_pending(title, &*self.clock);
        self.repository
            .create(&task)
            .await
            .map_err(|err| TaskLifecycleError::repository("register", err))?;

        let task_id = task.id();
        tracing::debug!(%task_id, "task registered");
        self.schedule_transition(task_id);
        Ok(task_id)
    }

    /// Returns the current record of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn task_info(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .get(task_id)
            .await
            .map_err(|err| TaskLifecycleError::repository("info", err))
    }

    /// Deletes a task regardless of its status.
    ///
    /// A pending transition is left in place; when it fires it reports a
    /// `NotFound` failure to the diagnostic sink.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.repository
            .delete(task_id)
            .await
            .map_err(|err| TaskLifecycleError::repository("delete", err))?;
        tracing::debug!(%task_id, "task deleted");
        Ok(())
    }

    /// Stops accepting registrations and settles outstanding transitions.
    pub async fn shutdown(&self, mode: ShutdownMode) {
        tracing::debug!(
            ?mode,
            outstanding = self.transitions.outstanding(),
            "task lifecycle shutting down"
        );
        self.transitions.shutdown(mode).await;
    }

    fn schedule_transition(&self, task_id: TaskId) {
        let repository = Arc::clone(&self.repository);
        let diagnostics = Arc::clone(&self.diagnostics);
        let sampler = Arc::clone(&self.sampler);
        let delay = self.schedule.delay();
        tracing::debug!(
            %task_id,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "transition scheduled"
        );

        self.transitions.spawn(task_id, move |token| {
            run_transition(Transition {
                task_id,
                delay,
                token,
                repository,
                diagnostics,
                sampler,
            })
        });
    }
}

/// Everything one detached transition needs.
struct Transition<R: ?Sized, D: ?Sized> {
    task_id: TaskId,
    delay: Duration,
    token: CancellationToken,
    repository: Arc<R>,
    diagnostics: Arc<D>,
    sampler: Arc<dyn OutcomeSampler>,
}

async fn run_transition<R, D>(transition: Transition<R, D>)
where
    R: TaskRepository + ?Sized,
    D: TransitionDiagnostics + ?Sized,
{
    let Transition {
        task_id,
        delay,
        token,
        repository,
        diagnostics,
        sampler,
    } = transition;

    tokio::select! {
        () = token.cancelled() => {
            diagnostics.record(TransitionEvent::Abandoned { task_id });
        }
        () = tokio::time::sleep(delay) => {
            let outcome = sampler.draw();
            let event = match repository.update(task_id, outcome, delay).await {
                Ok(()) => TransitionEvent::Applied {
                    task_id,
                    outcome,
                    duration: delay,
                },
                Err(error) => TransitionEvent::Failed { task_id, error },
            };
            diagnostics.record(event);
        }
    }
}
