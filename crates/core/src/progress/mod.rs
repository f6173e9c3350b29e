//! Overall progress and the precedence between stored and live data.
//!
//! A run's persisted record and a freshly polled [`ProgressSnapshot`] are two
//! complete sources. When a live snapshot exists it replaces the stored one
//! for display; the two are never merged element by element.

use rb_protocol::progress_models::ProgressSnapshot;
use rb_protocol::run_models::{ExecutionStatus, PipelineRun, StepExecution};
use rb_protocol::view_models::ProgressSource;

/// Mean step progress, rounded, in `0..=100`.
///
/// Every attempt counts once, across all iterations of a looping run.
/// Out-of-range step values are clamped before averaging.
pub fn overall_progress(steps: &[StepExecution]) -> u8 {
    if steps.is_empty() {
        return 0;
    }

    let total: i64 = steps
        .iter()
        .map(|s| i64::from(s.progress_percent.clamp(0, 100)))
        .sum();
    let mean = total as f64 / steps.len() as f64;

    clamp_percent(mean.round() as i64)
}

fn clamp_percent(value: i64) -> u8 {
    // In range after the clamp, so the cast cannot truncate.
    value.clamp(0, 100) as u8
}

/// Status to act on: the live status if a snapshot exists, else the stored
/// one.
pub fn effective_status<'a>(
    run: &'a PipelineRun,
    live: Option<&'a ProgressSnapshot>,
) -> &'a ExecutionStatus {
    match live {
        Some(snapshot) => &snapshot.status,
        None => &run.status,
    }
}

/// Step attempts to display: live steps if the snapshot carries them, else
/// the run's persisted log.
pub fn effective_steps<'a>(
    run: &'a PipelineRun,
    live: Option<&'a ProgressSnapshot>,
) -> &'a [StepExecution] {
    match live.and_then(|snapshot| snapshot.steps.as_deref()) {
        Some(steps) => steps,
        None => &run.step_executions,
    }
}

/// Overall progress to display and the layer it came from.
///
/// Precedence:
/// 1. live `overall_progress`, used verbatim
/// 2. recomputed from live `steps`
/// 3. recomputed from the run's persisted `step_executions`
pub fn effective_progress(
    run: &PipelineRun,
    live: Option<&ProgressSnapshot>,
) -> (u8, ProgressSource) {
    if let Some(snapshot) = live {
        if let Some(overall) = snapshot.overall_progress {
            return (clamp_percent(i64::from(overall)), ProgressSource::LiveOverall);
        }
        if let Some(steps) = &snapshot.steps {
            return (overall_progress(steps), ProgressSource::LiveSteps);
        }
    }

    (overall_progress(&run.step_executions), ProgressSource::Stored)
}
