use super::*;

#[test]
fn new_execution_starts_pending_with_empty_output() {
    let now = Utc::now();
    let record = ExecutionRecord::new(
        ExecutionId::new("e1"),
        FlowId::new("f1"),
        serde_json::json!({"a": 1}),
        now,
    );
    assert_eq!(record.status, ExecutionStatus::Pending);
    assert_eq!(record.output_data, serde_json::json!({}));
    assert!(record.completed_at.is_none());
    assert!(!record.is_terminal());
}

#[test]
fn completed_and_failed_are_terminal() {
    let mut record = ExecutionRecord::new(
        ExecutionId::new("e1"),
        FlowId::new("f1"),
        serde_json::json!({}),
        Utc::now(),
    );
    record.status = ExecutionStatus::Completed;
    assert!(record.is_terminal());
    record.status = ExecutionStatus::Failed;
    assert!(record.is_terminal());
    record.status = ExecutionStatus::Running;
    assert!(!record.is_terminal());
}
