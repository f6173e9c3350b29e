//! Composition of every derivation into one display-ready value.
//!
//! A run view hands in the stored run, the latest live snapshot (if any)
//! and an optional step the user focused; it gets back a [`RunDisplay`].
//! Status, steps and progress each come from the live snapshot when it
//! carries them and from the stored run otherwise.

use crate::classify::PhaseSignatures;
use crate::highlight::{resolve_highlight, resolve_iteration_focus};
use crate::iteration::{current_iteration, group_into_iterations};
use crate::progress::{effective_progress, effective_status, effective_steps};
use rb_protocol::progress_models::ProgressSnapshot;
use rb_protocol::run_models::PipelineRun;
use rb_protocol::view_models::RunDisplay;

/// Build the display state of one run.
///
/// The phase is always derived from the run's persisted step names, since a
/// run's phase does not change between polls; everything else follows the
/// effective (live or stored) data.
pub fn build_run_display(
    run: &PipelineRun,
    live: Option<&ProgressSnapshot>,
    explicit_focus: Option<u32>,
    signatures: &PhaseSignatures,
) -> RunDisplay {
    let status = effective_status(run, live).clone();
    let steps = effective_steps(run, live);

    let iterations = group_into_iterations(steps);
    let highlighted = resolve_highlight(steps, explicit_focus);
    let focused_iteration = resolve_iteration_focus(&iterations, explicit_focus);
    let current = current_iteration(&iterations, &status);
    let (overall_progress, progress_source) = effective_progress(run, live);

    let current_step_name = match live {
        Some(snapshot) => snapshot.current_step_name.clone(),
        None => highlighted.as_ref().map(|e| e.step_name.clone()),
    };

    RunDisplay {
        run_id: run.id,
        phase: signatures.classify(run),
        status_bucket: status.bucket(),
        status,
        iterations,
        highlighted,
        focused_iteration,
        current_iteration: current,
        overall_progress,
        progress_source,
        current_step_name,
    }
}
