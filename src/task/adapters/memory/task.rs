//! In-memory task repository guarded by a single lock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::task::{
    domain::{Task, TaskId, TaskOutcome},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Readers share the lock; every write excludes all other access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps a poisoned lock into a persistence error.
pub(super) fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Inserts `task` unless its identifier is already present.
pub(super) fn insert_new(
    tasks: &mut HashMap<TaskId, Task>,
    task: &Task,
) -> TaskRepositoryResult<()> {
    if tasks.contains_key(&task.id()) {
        return Err(TaskRepositoryError::DuplicateTask(task.id()));
    }
    tasks.insert(task.id(), task.clone());
    Ok(())
}

/// Applies a terminal outcome to the stored record.
pub(super) fn apply_outcome(
    tasks: &mut HashMap<TaskId, Task>,
    id: TaskId,
    outcome: TaskOutcome,
    duration: Duration,
) -> TaskRepositoryResult<()> {
    let task = tasks.get_mut(&id).ok_or(TaskRepositoryError::NotFound(id))?;
    task.record_outcome(outcome, duration);
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        insert_new(&mut tasks, task)
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        tasks.get(&id).cloned().ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn update(
        &self,
        id: TaskId,
        outcome: TaskOutcome,
        duration: Duration,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        apply_outcome(&mut tasks, id, outcome, duration)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn count(&self) -> TaskRepositoryResult<usize> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.len())
    }
}
