//! Selection of the step a run view focuses on.

use crate::iteration::chronological;
use rb_protocol::run_models::StepExecution;
use rb_protocol::view_models::IterationGroup;

/// Pick the attempt a view should highlight.
///
/// Precedence, first match wins:
/// 1. `explicit_focus`: the latest attempt with that step number
/// 2. the earliest attempt that is queued or running
/// 3. the latest attempt that failed
/// 4. the latest attempt overall
///
/// Returns `None` only for an empty log.
pub fn resolve_highlight(
    executions: &[StepExecution],
    explicit_focus: Option<u32>,
) -> Option<StepExecution> {
    let ordered = chronological(executions);
    resolve_in_order(&ordered, explicit_focus).cloned()
}

/// [`resolve_highlight`] over attempts already in chronological order.
fn resolve_in_order(
    ordered: &[StepExecution],
    explicit_focus: Option<u32>,
) -> Option<&StepExecution> {
    if let Some(step) = explicit_focus {
        if let Some(focused) = ordered.iter().rev().find(|e| e.step_number == step) {
            return Some(focused);
        }
    }

    ordered
        .iter()
        .find(|e| e.status.is_active())
        .or_else(|| ordered.iter().rev().find(|e| e.status.is_failed()))
        .or_else(|| ordered.last())
}

/// Index of the iteration to expand by default.
///
/// Applies the highlight precedence across every iteration's attempts and
/// reports which iteration holds the resolved attempt.
pub fn resolve_iteration_focus(
    groups: &[IterationGroup],
    explicit_focus: Option<u32>,
) -> Option<usize> {
    // Groups are already chronological, and so is each group's content.
    let all: Vec<&StepExecution> = groups.iter().flat_map(|g| g.executions.iter()).collect();

    let resolved = explicit_focus
        .and_then(|step| all.iter().rev().find(|e| e.step_number == step))
        .or_else(|| all.iter().find(|e| e.status.is_active()))
        .or_else(|| all.iter().rev().find(|e| e.status.is_failed()))
        .or_else(|| all.last())?;

    groups
        .iter()
        .find(|g| g.executions.iter().any(|e| e.id == resolved.id))
        .map(|g| g.iteration_index)
}
