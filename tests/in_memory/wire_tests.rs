//! Wire-format tests for the gateway-facing task representation.

use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;
use tasktrack::task::{
    adapters::wire::{RegisterTaskRequest, TaskView, parse_task_id},
    domain::{Task, TaskDomainError, TaskOutcome},
};

use super::helpers::title;

#[rstest]
fn task_view_serializes_expected_fields() {
    let mut task = Task::new_pending(title("dummy-title"), &DefaultClock);
    task.record_outcome(TaskOutcome::Completed, Duration::from_secs(3));

    let value = serde_json::to_value(TaskView::from(&task)).expect("view serializes");

    assert_eq!(value["task_id"], json!(task.id().to_string()));
    assert_eq!(value["status"], json!("completed"));
    assert_eq!(value["title"], json!("dummy-title"));
    assert_eq!(value["duration_ms"], json!(3000));
    let created_at = value["created_at"].as_str().expect("timestamp is a string");
    assert_eq!(
        chrono::DateTime::parse_from_rfc3339(created_at)
            .expect("timestamp is RFC 3339")
            .to_utc(),
        task.created_at()
    );
}

#[rstest]
fn register_request_requires_non_empty_title() {
    let missing: RegisterTaskRequest =
        serde_json::from_value(json!({ "field": "test" })).expect("body decodes");
    let empty: RegisterTaskRequest =
        serde_json::from_value(json!({ "title": "" })).expect("body decodes");
    let spaces: RegisterTaskRequest =
        serde_json::from_value(json!({ "title": "  " })).expect("body decodes");
    let valid: RegisterTaskRequest =
        serde_json::from_value(json!({ "title": "Dummy Task" })).expect("body decodes");

    assert_eq!(missing.into_title(), Err(TaskDomainError::EmptyTitle));
    assert_eq!(empty.into_title(), Err(TaskDomainError::EmptyTitle));
    assert_eq!(
        spaces.into_title().map(|parsed| parsed.as_str().to_owned()),
        Ok("  ".to_owned())
    );
    assert_eq!(
        valid.into_title().map(|parsed| parsed.as_str().to_owned()),
        Ok("Dummy Task".to_owned())
    );
}

#[rstest]
#[case("ca545e27-4e9b-4c95-b38b-d72069e33975", true)]
#[case("incorrect-path", false)]
#[case("", false)]
fn parse_task_id_validates_uuid_text(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(parse_task_id(raw).is_ok(), valid);
}
