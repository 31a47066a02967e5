//! In-memory integration tests for the task lifecycle service.

use std::time::Duration;

use rstest::rstest;
use tasktrack::task::{
    adapters::{memory::RecordingDiagnostics, wire::TaskView},
    domain::TaskStatus,
    ports::TransitionEvent,
    services::ShutdownMode,
};

use super::helpers::{
    ShardedService, SingleLockService, sharded_service, single_lock_service, title,
};

#[rstest]
#[tokio::test(start_paused = true)]
async fn register_poll_and_delete_round_trip(
    single_lock_service: (SingleLockService, RecordingDiagnostics),
) {
    let (service, diagnostics) = single_lock_service;

    let task_id = service
        .register_task(title("Dummy Task"))
        .await
        .expect("register should succeed");
    let pending = service.task_info(task_id).await.expect("task should exist");
    assert_eq!(TaskView::from(&pending).status, "pending");
    assert_eq!(TaskView::from(&pending).duration_ms, 0);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let finished = service.task_info(task_id).await.expect("task should exist");
    let view = TaskView::from(&finished);
    assert!(view.status == "completed" || view.status == "failed");
    assert_eq!(view.duration_ms, 2000);
    assert_eq!(view.title, "Dummy Task");

    service.delete_task(task_id).await.expect("delete should succeed");
    assert!(
        service
            .task_info(task_id)
            .await
            .is_err_and(|err| err.is_not_found())
    );
    assert_eq!(diagnostics.not_found_count(), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn sharded_store_applies_configured_interval(
    sharded_service: (ShardedService, RecordingDiagnostics),
) {
    let (service, diagnostics) = sharded_service;
    let mut ids = Vec::new();
    for index in 0..50 {
        ids.push(
            service
                .register_task(title(&format!("sharded {index}")))
                .await
                .expect("register should succeed"),
        );
    }

    service.shutdown(ShutdownMode::Await).await;

    for id in ids {
        let task = service.task_info(id).await.expect("task should exist");
        assert!(task.status().is_terminal());
        assert_eq!(task.duration(), Duration::from_secs(3));
    }
    let events = diagnostics.events();
    assert_eq!(events.len(), 50);
    assert!(
        events
            .iter()
            .all(|event| matches!(event, TransitionEvent::Applied { .. }))
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn deleting_pending_task_is_reported_once_to_sink(
    single_lock_service: (SingleLockService, RecordingDiagnostics),
) {
    let (service, diagnostics) = single_lock_service;
    let kept = service
        .register_task(title("kept"))
        .await
        .expect("register should succeed");
    let dropped = service
        .register_task(title("dropped"))
        .await
        .expect("register should succeed");

    service.delete_task(dropped).await.expect("delete should succeed");
    service.shutdown(ShutdownMode::Await).await;

    assert_eq!(diagnostics.not_found_count(), 1);
    assert_ne!(
        service.task_info(kept).await.expect("task should exist").status(),
        TaskStatus::Pending
    );
}
