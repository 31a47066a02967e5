//! Sharded in-memory task repository.
//!
//! Records are spread over independently locked maps selected by a hash of
//! the task identifier. Every record lives in exactly one shard, so the
//! single-record guarantees of [`super::InMemoryTaskRepository`] still hold.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::sync::RwLock;
use std::time::Duration;

use super::task::{apply_outcome, insert_new, poisoned};
use crate::task::{
    domain::{Task, TaskId, TaskOutcome},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<HashMap<TaskId, Task>>;

/// Thread-safe task repository with per-shard locking.
#[derive(Debug)]
pub struct ShardedTaskRepository {
    shards: Vec<Shard>,
    mask: usize,
    hasher: RandomState,
}

impl ShardedTaskRepository {
    /// Creates a repository with the default shard count.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Creates a repository with at least `shards` shards.
    ///
    /// The count is rounded up to the next power of two (minimum one).
    #[must_use]
    pub fn with_shards(shards: usize) -> Self {
        let count = shards.max(1).next_power_of_two();
        Self {
            shards: (0..count).map(|_| Shard::default()).collect(),
            mask: count.saturating_sub(1),
            hasher: RandomState::new(),
        }
    }

    /// Returns the number of shards.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, id: TaskId) -> TaskRepositoryResult<&Shard> {
        let hash = self.hasher.hash_one(id);
        let index = usize::try_from(hash).unwrap_or(usize::MAX) & self.mask;
        self.shards.get(index).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other(format!(
                "shard {index} out of range"
            )))
        })
    }
}

impl Default for ShardedTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for ShardedTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.shard(task.id())?.write().map_err(poisoned)?;
        insert_new(&mut tasks, task)
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let tasks = self.shard(id)?.read().map_err(poisoned)?;
        tasks.get(&id).cloned().ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn update(
        &self,
        id: TaskId,
        outcome: TaskOutcome,
        duration: Duration,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.shard(id)?.write().map_err(poisoned)?;
        apply_outcome(&mut tasks, id, outcome, duration)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.shard(id)?.write().map_err(poisoned)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn count(&self) -> TaskRepositoryResult<usize> {
        let mut total = 0_usize;
        for shard in &self.shards {
            total = total.saturating_add(shard.read().map_err(poisoned)?.len());
        }
        Ok(total)
    }
}
