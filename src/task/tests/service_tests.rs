//! Service orchestration tests against a mocked repository.

use std::sync::Arc;
use std::time::Duration;

use crate::task::{
    adapters::memory::RecordingDiagnostics,
    adapters::wire::parse_task_id,
    domain::{Task, TaskId, TaskOutcome, TaskStatus, TaskTitle},
    ports::{MockTaskRepository, TaskRepositoryError, TransitionEvent},
    services::{
        FixedOutcome, ShutdownMode, TaskLifecycleError, TaskLifecycleResult,
        TaskLifecycleService, TransitionSchedule,
    },
};
use mockable::DefaultClock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

type MockService = TaskLifecycleService<MockTaskRepository, DefaultClock, RecordingDiagnostics>;

#[fixture]
fn title() -> TaskTitle {
    TaskTitle::new("Test Task").expect("valid title")
}

fn service_with(repo: MockTaskRepository, diagnostics: &RecordingDiagnostics) -> MockService {
    TaskLifecycleService::new(
        Arc::new(repo),
        Arc::new(DefaultClock),
        Arc::new(diagnostics.clone()),
        TransitionSchedule::new(Duration::from_secs(3)),
    )
    .with_sampler(Arc::new(FixedOutcome(TaskOutcome::Completed)))
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn register_stores_pending_task_and_schedules_update(title: TaskTitle) {
    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .times(1)
        .withf(|task: &Task| {
            task.title().as_str() == "Test Task"
                && task.status() == TaskStatus::Pending
                && task.duration() == Duration::ZERO
        })
        .returning(|_| Ok(()));
    repo.expect_update()
        .times(1)
        .withf(|_, outcome, duration| {
            *outcome == TaskOutcome::Completed && *duration == Duration::from_secs(5)
        })
        .returning(|_, _, _| Ok(()));
    let diagnostics = RecordingDiagnostics::new();
    let service = service_with(repo, &diagnostics);

    let task_id = service.register_task(title).await.expect("register should succeed");
    assert_eq!(service.outstanding_transitions(), 1);
    assert!(service.transitions().is_outstanding(task_id));

    service.shutdown(ShutdownMode::Await).await;

    assert_eq!(service.outstanding_transitions(), 0);
    let events = diagnostics.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events.first(),
        Some(TransitionEvent::Applied { task_id: id, outcome: TaskOutcome::Completed, duration })
            if *id == task_id && *duration == Duration::from_secs(5)
    ));
}

#[rstest]
#[tokio::test]
async fn register_propagates_repository_error_without_scheduling(title: TaskTitle) {
    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .times(1)
        .returning(|task| Err(TaskRepositoryError::DuplicateTask(task.id())));
    let diagnostics = RecordingDiagnostics::new();
    let service = service_with(repo, &diagnostics);

    let err = service
        .register_task(title)
        .await
        .expect_err("register should fail");

    assert!(err.repository_error().is_some_and(TaskRepositoryError::is_duplicate));
    assert!(err.to_string().starts_with("register: task with this id already exists"));
    assert_eq!(service.outstanding_transitions(), 0);
    assert!(diagnostics.events().is_empty());
}

#[rstest]
#[tokio::test]
async fn task_info_returns_repository_record(title: TaskTitle) {
    let task = Task::new_pending(title, &DefaultClock);
    let expected = task.clone();
    let mut repo = MockTaskRepository::new();
    repo.expect_get()
        .with(eq(task.id()))
        .times(1)
        .returning(move |_| Ok(task.clone()));
    let service = service_with(repo, &RecordingDiagnostics::new());

    let fetched = service
        .task_info(expected.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, expected);
}

#[rstest]
#[tokio::test]
async fn task_info_wraps_not_found_with_context() {
    let missing = TaskId::new();
    let mut repo = MockTaskRepository::new();
    repo.expect_get()
        .times(1)
        .returning(|id| Err(TaskRepositoryError::NotFound(id)));
    let service = service_with(repo, &RecordingDiagnostics::new());

    let err = service
        .task_info(missing)
        .await
        .expect_err("lookup should fail");

    assert!(err.is_not_found());
    assert!(!err.is_invalid_input());
    assert_eq!(err.to_string(), format!("info: task not found: {missing}"));
}

#[rstest]
#[tokio::test]
async fn delete_task_delegates_to_repository() {
    let id = TaskId::new();
    let mut repo = MockTaskRepository::new();
    repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));
    let service = service_with(repo, &RecordingDiagnostics::new());

    service.delete_task(id).await.expect("delete should succeed");
}

#[rstest]
#[tokio::test]
async fn delete_task_wraps_repository_errors() {
    let mut repo = MockTaskRepository::new();
    repo.expect_delete().times(1).returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "delete failed",
        )))
    });
    let service = service_with(repo, &RecordingDiagnostics::new());

    let err = service
        .delete_task(TaskId::new())
        .await
        .expect_err("delete should fail");

    assert!(!err.is_not_found());
    assert!(matches!(
        err.repository_error(),
        Some(TaskRepositoryError::Persistence(_))
    ));
    assert!(err.to_string().starts_with("delete: persistence error"));
}

#[rstest]
#[tokio::test]
async fn register_after_shutdown_is_rejected(title: TaskTitle) {
    let service = service_with(MockTaskRepository::new(), &RecordingDiagnostics::new());
    service.shutdown(ShutdownMode::Abandon).await;

    let result = service.register_task(title).await;

    assert!(matches!(result, Err(TaskLifecycleError::ShuttingDown)));
}

#[rstest]
fn malformed_id_maps_to_invalid_input() {
    fn lookup(raw: &str) -> TaskLifecycleResult<TaskId> {
        Ok(parse_task_id(raw)?)
    }

    let err = lookup("incorrect-path").expect_err("id should be rejected");

    assert!(err.is_invalid_input());
    assert!(!err.is_not_found());
}
