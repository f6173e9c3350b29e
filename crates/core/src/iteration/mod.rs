//! Decomposition of a run's execution log into loop iterations.
//!
//! Looping pipelines re-execute earlier step numbers on every pass. The
//! backend does not tag attempts with an iteration, so passes are recovered
//! from the log: attempts are put in temporal order and a new iteration
//! starts whenever a step number does not exceed one already seen in the
//! current pass.
//!
//! This is a heuristic. A non-looping run whose retries arrive out of order
//! can be split into more iterations than it really had.

use rb_protocol::run_models::{ExecutionStatus, StepExecution};
use rb_protocol::view_models::IterationGroup;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Temporal ordering of attempts.
///
/// Compares [`StepExecution::order_timestamp`] first and falls back to the
/// attempt id so ties and missing timestamps still order deterministically.
pub fn compare_chronological(a: &StepExecution, b: &StepExecution) -> Ordering {
    a.order_timestamp()
        .cmp(&b.order_timestamp())
        .then_with(|| a.id.cmp(&b.id))
}

/// Clone and sort attempts into temporal order.
pub fn chronological(executions: &[StepExecution]) -> Vec<StepExecution> {
    let mut ordered = executions.to_vec();
    ordered.sort_by(compare_chronological);
    ordered
}

/// Split one run's attempts into ordered iteration groups.
///
/// The input may be in any order. A run that never loops yields a single
/// group; an empty log yields no groups.
pub fn group_into_iterations(executions: &[StepExecution]) -> Vec<IterationGroup> {
    let mut passes: Vec<Vec<StepExecution>> = Vec::new();
    let mut max_step_in_pass: Option<u32> = None;

    for exec in chronological(executions) {
        let restarts = match max_step_in_pass {
            Some(max) => exec.step_number <= max,
            None => true,
        };

        if restarts {
            max_step_in_pass = Some(exec.step_number);
            passes.push(vec![exec]);
        } else {
            max_step_in_pass = Some(exec.step_number);
            if let Some(current) = passes.last_mut() {
                current.push(exec);
            }
        }
    }

    passes
        .into_iter()
        .enumerate()
        .map(|(iteration_index, executions)| IterationGroup {
            iteration_index,
            is_active: executions.iter().any(|e| e.status.is_active()),
            is_failed: has_unrecovered_failure(&executions),
            executions,
        })
        .collect()
}

/// Whether the latest attempt of any step number failed.
///
/// Scans newest to oldest and only looks at the first attempt seen per step
/// number, so a failure followed by a successful retry does not count.
fn has_unrecovered_failure(executions: &[StepExecution]) -> bool {
    let mut latest: HashMap<u32, &ExecutionStatus> = HashMap::new();
    for exec in executions.iter().rev() {
        latest.entry(exec.step_number).or_insert(&exec.status);
    }
    latest.values().any(|status| status.is_failed())
}

/// The iteration that is currently executing.
///
/// Only defined while the run itself is active: it is then the last group.
pub fn current_iteration(groups: &[IterationGroup], run_status: &ExecutionStatus) -> Option<usize> {
    if run_status.is_active() {
        groups.last().map(|g| g.iteration_index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn exec(id: u128, step: u32, status: &str, at: Option<i64>) -> StepExecution {
        StepExecution {
            id: Uuid::from_u128(id),
            step_number: step,
            step_name: format!("step_{step}"),
            status: ExecutionStatus::from(status),
            progress_percent: 0,
            items_processed: None,
            items_total: None,
            created_at: None,
            started_at: at.and_then(|s| DateTime::<Utc>::from_timestamp(s, 0)),
            completed_at: None,
            error_message: None,
        }
    }

    fn steps(group: &IterationGroup) -> Vec<(u32, String)> {
        group
            .executions
            .iter()
            .map(|e| (e.step_number, e.status.to_string()))
            .collect()
    }

    #[test]
    fn test_looping_run_splits_into_iterations() {
        // Input deliberately shuffled.
        let executions = vec![
            exec(3, 1, "running", Some(30)),
            exec(1, 1, "succeeded", Some(10)),
            exec(4, 2, "queued", Some(40)),
            exec(2, 2, "succeeded", Some(20)),
        ];

        let groups = group_into_iterations(&executions);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].iteration_index, 0);
        assert_eq!(
            steps(&groups[0]),
            vec![(1, "succeeded".to_string()), (2, "succeeded".to_string())]
        );
        assert!(!groups[0].is_active);
        assert!(!groups[0].is_failed);

        assert_eq!(groups[1].iteration_index, 1);
        assert_eq!(
            steps(&groups[1]),
            vec![(1, "running".to_string()), (2, "queued".to_string())]
        );
        assert!(groups[1].is_active);
    }

    #[test]
    fn test_non_looping_run_is_single_group() {
        let executions = vec![
            exec(1, 1, "succeeded", Some(1)),
            exec(2, 2, "succeeded", Some(2)),
            exec(3, 3, "running", Some(3)),
        ];
        let groups = group_into_iterations(&executions);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].executions.len(), 3);
    }

    #[test]
    fn test_empty_log_has_no_groups() {
        assert!(group_into_iterations(&[]).is_empty());
    }

    #[test]
    fn test_equal_step_number_starts_new_iteration() {
        let executions = vec![
            exec(1, 1, "succeeded", Some(1)),
            exec(2, 2, "failed", Some(2)),
            exec(3, 2, "succeeded", Some(3)),
        ];
        let groups = group_into_iterations(&executions);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_failed);
        assert!(!groups[1].is_failed);
    }

    #[test]
    fn test_step_numbers_strictly_increase_within_groups() {
        let executions = vec![
            exec(1, 1, "succeeded", Some(1)),
            exec(2, 3, "succeeded", Some(2)),
            exec(3, 2, "succeeded", Some(3)),
            exec(4, 5, "succeeded", Some(4)),
            exec(5, 5, "succeeded", Some(5)),
            exec(6, 1, "succeeded", Some(6)),
        ];
        let groups = group_into_iterations(&executions);
        for group in &groups {
            for pair in group.executions.windows(2) {
                assert!(pair[0].step_number < pair[1].step_number);
            }
        }
        for pair in groups.windows(2) {
            let last = pair[0].executions.last().map(|e| e.step_number);
            let first = pair[1].executions.first().map(|e| e.step_number);
            assert!(first <= last, "boundary must be a non-increasing transition");
        }
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_missing_timestamps_order_by_id() {
        let executions = vec![
            exec(2, 2, "succeeded", None),
            exec(1, 1, "succeeded", None),
        ];
        let groups = group_into_iterations(&executions);
        assert_eq!(groups.len(), 1);
        assert_eq!(steps(&groups[0])[0].0, 1);
    }

    #[test]
    fn test_latest_attempt_decides_failure() {
        let failed = exec(1, 1, "error", Some(1));
        let retried = exec(2, 1, "succeeded", Some(2));
        assert!(has_unrecovered_failure(&[failed.clone()]));
        assert!(!has_unrecovered_failure(&[failed.clone(), retried.clone()]));
        assert!(has_unrecovered_failure(&[retried, failed]));
    }

    #[test]
    fn test_current_iteration_only_while_active() {
        let executions = vec![
            exec(1, 1, "succeeded", Some(1)),
            exec(2, 1, "running", Some(2)),
        ];
        let groups = group_into_iterations(&executions);
        assert_eq!(
            current_iteration(&groups, &ExecutionStatus::from("running")),
            Some(1)
        );
        assert_eq!(
            current_iteration(&groups, &ExecutionStatus::from("completed")),
            None
        );
    }
}
