//! Registry of outstanding scheduled transitions.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::task::domain::TaskId;

/// What shutdown does with transitions that have not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Let every outstanding transition fire, then return.
    Await,
    /// Cancel every outstanding transition without writing, then return.
    Abandon,
}

/// Proof that the registry was open when it was taken.
///
/// Shutdown cannot close the registry while any admission is alive.
#[derive(Debug)]
pub struct Admission<'a> {
    _gate: RwLockReadGuard<'a, ()>,
}

/// Tracks every spawned transition and its cancellation token.
#[derive(Debug, Default)]
pub struct TransitionRegistry {
    gate: RwLock<()>,
    tracker: TaskTracker,
    root: CancellationToken,
    tokens: Mutex<HashMap<TaskId, CancellationToken>>,
}

impl TransitionRegistry {
    /// Creates an empty, open registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits one registration, or returns `None` once shutdown has started.
    ///
    /// Hold the admission until the transition is spawned; shutdown waits
    /// for every live admission before closing.
    pub async fn admit(&self) -> Option<Admission<'_>> {
        let gate = self.gate.read().await;
        if self.tracker.is_closed() {
            return None;
        }
        Some(Admission { _gate: gate })
    }

    /// Spawns the transition for `task_id` on the current runtime.
    ///
    /// `transition` receives the token that is cancelled on abandon or by
    /// [`Self::cancel`]. The registry entry is dropped once the future ends.
    pub fn spawn<F, Fut>(self: &Arc<Self>, task_id: TaskId, transition: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.root.child_token();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(task_id, token.clone());
        }
        let registry = Arc::clone(self);
        let unit = transition(token);
        self.tracker.spawn(async move {
            unit.await;
            registry.forget(task_id);
        });
    }

    /// Cancels the pending transition of one task.
    ///
    /// Returns `false` when no transition is outstanding for it.
    pub fn cancel(&self, task_id: TaskId) -> bool {
        let token = self
            .tokens
            .lock()
            .ok()
            .and_then(|mut tokens| tokens.remove(&task_id));
        let Some(found) = token else {
            return false;
        };
        found.cancel();
        true
    }

    /// Returns `true` when a transition for `task_id` has not finished.
    #[must_use]
    pub fn is_outstanding(&self, task_id: TaskId) -> bool {
        self.tokens
            .lock()
            .is_ok_and(|tokens| tokens.contains_key(&task_id))
    }

    /// Returns the number of transitions that have not finished.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.tokens.lock().map_or(0, |tokens| tokens.len())
    }

    /// Returns `true` once shutdown has started.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Stops accepting work and waits for outstanding transitions.
    pub async fn shutdown(&self, mode: ShutdownMode) {
        {
            let _gate = self.gate.write().await;
            self.tracker.close();
        }
        if mode == ShutdownMode::Abandon {
            self.root.cancel();
        }
        self.tracker.wait().await;
    }

    fn forget(&self, task_id: TaskId) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.remove(&task_id);
        }
    }
}
