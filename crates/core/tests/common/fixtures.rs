//! Test fixtures for building runs, executions and snapshots.

use chrono::{DateTime, Utc};
use rb_protocol::progress_models::ProgressSnapshot;
use rb_protocol::run_models::{ExecutionStatus, PipelineRun, StepExecution};
use uuid::Uuid;

/// Timestamp `secs` seconds after the epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Create a step execution started at `started` seconds.
pub fn create_execution(
    id: u128,
    step_number: u32,
    step_name: &str,
    status: &str,
    started: i64,
) -> StepExecution {
    StepExecution {
        id: Uuid::from_u128(id),
        step_number,
        step_name: step_name.to_string(),
        status: ExecutionStatus::from(status),
        progress_percent: 0,
        items_processed: None,
        items_total: None,
        created_at: None,
        started_at: Some(at(started)),
        completed_at: None,
        error_message: None,
    }
}

/// Create a run created at `created` seconds with the given executions.
pub fn create_run(
    id: u128,
    status: &str,
    created: i64,
    step_executions: Vec<StepExecution>,
) -> PipelineRun {
    PipelineRun {
        id: Uuid::from_u128(id),
        project_id: None,
        status: ExecutionStatus::from(status),
        created_at: at(created),
        started_at: Some(at(created)),
        step_executions,
    }
}

/// Create a live snapshot with only a status and an overall percentage.
pub fn create_snapshot(status: &str, overall_progress: Option<i32>) -> ProgressSnapshot {
    ProgressSnapshot {
        status: ExecutionStatus::from(status),
        steps: None,
        current_step_name: None,
        overall_progress,
    }
}
