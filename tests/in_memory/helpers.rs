//! Shared test helpers for in-memory lifecycle integration tests.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingDiagnostics, ShardedTaskRepository},
    domain::TaskTitle,
    services::{TaskLifecycleService, TransitionSchedule},
};

/// Lifecycle service over the single-lock repository.
pub type SingleLockService =
    TaskLifecycleService<InMemoryTaskRepository, DefaultClock, RecordingDiagnostics>;

/// Lifecycle service over the sharded repository.
pub type ShardedService =
    TaskLifecycleService<ShardedTaskRepository, DefaultClock, RecordingDiagnostics>;

/// Provides a service with the default two-second delay and its sink.
#[fixture]
pub fn single_lock_service() -> (SingleLockService, RecordingDiagnostics) {
    let diagnostics = RecordingDiagnostics::new();
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
        Arc::new(diagnostics.clone()),
        TransitionSchedule::new(Duration::ZERO),
    );
    (service, diagnostics)
}

/// Provides a sharded-store service with a one-second interval and its sink.
#[fixture]
pub fn sharded_service() -> (ShardedService, RecordingDiagnostics) {
    let diagnostics = RecordingDiagnostics::new();
    let service = TaskLifecycleService::new(
        Arc::new(ShardedTaskRepository::new()),
        Arc::new(DefaultClock),
        Arc::new(diagnostics.clone()),
        TransitionSchedule::new(Duration::from_secs(1)),
    );
    (service, diagnostics)
}

/// Builds a title, panicking on empty input.
///
/// # Panics
///
/// Panics when `value` is empty.
#[must_use]
pub fn title(value: &str) -> TaskTitle {
    TaskTitle::new(value).expect("valid title")
}
