//! Selection of the run a module view should display.
//!
//! Given every run the backend returned, this module decides which one is
//! canonical for a phase or module and whether the caller should stay on the
//! run it is currently routed to. It never navigates; it only computes the
//! target.

use crate::classify::PhaseSignatures;
use rb_protocol::phase_models::{Module, RunPhase};
use rb_protocol::run_models::PipelineRun;
use rb_protocol::view_models::RouteDecision;
use std::cmp::Ordering;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while selecting a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested run is not among the candidates. Not retried.
    #[error("Run {0} not found")]
    RunNotFound(Uuid),
}

/// Explicit selection scope.
///
/// The project a view is scoped to is passed in by the caller instead of
/// being read from ambient session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionContext {
    /// Only runs of this project are candidates. `None` means every run.
    pub project_id: Option<Uuid>,
}

impl SelectionContext {
    pub fn for_project(project_id: Uuid) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }

    fn admits(&self, run: &PipelineRun) -> bool {
        match self.project_id {
            Some(project_id) => run.project_id == Some(project_id),
            None => true,
        }
    }
}

/// Newest-first ordering: `created_at` desc, `started_at` desc, `id` asc.
///
/// A run without `started_at` sorts after one that has it.
pub fn compare_newest_first(a: &PipelineRun, b: &PipelineRun) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.started_at.cmp(&a.started_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort runs newest first. See [`compare_newest_first`].
pub fn sort_runs_newest_first(runs: &mut [PipelineRun]) {
    runs.sort_by(compare_newest_first);
}

/// Newest run matching `predicate` within the context.
fn pick_latest<'a>(
    runs: &'a [PipelineRun],
    ctx: &SelectionContext,
    predicate: impl Fn(&PipelineRun) -> bool,
) -> Option<&'a PipelineRun> {
    runs.iter()
        .filter(|run| ctx.admits(run) && predicate(*run))
        .min_by(|a, b| compare_newest_first(a, b))
}

/// Newest run within the context, regardless of phase.
pub fn pick_latest_run<'a>(
    runs: &'a [PipelineRun],
    ctx: &SelectionContext,
) -> Option<&'a PipelineRun> {
    pick_latest(runs, ctx, |_| true)
}

/// Newest run whose four-way phase equals `phase`.
pub fn pick_latest_run_for_phase<'a>(
    runs: &'a [PipelineRun],
    phase: RunPhase,
    ctx: &SelectionContext,
    signatures: &PhaseSignatures,
) -> Option<&'a PipelineRun> {
    pick_latest(runs, ctx, |run| signatures.classify(run) == phase)
}

/// Newest run that is a member of `module`.
pub fn pick_latest_run_for_module<'a>(
    runs: &'a [PipelineRun],
    module: Module,
    ctx: &SelectionContext,
    signatures: &PhaseSignatures,
) -> Option<&'a PipelineRun> {
    pick_latest(runs, ctx, |run| signatures.is_run_in_module(run, module))
}

/// Look up a run by id among the candidates admitted by `ctx`.
///
/// # Errors
///
/// Returns [`SelectionError::RunNotFound`] if no candidate has that id.
pub fn find_run<'a>(
    runs: &'a [PipelineRun],
    run_id: Uuid,
    ctx: &SelectionContext,
) -> Result<&'a PipelineRun, SelectionError> {
    runs.iter()
        .find(|run| run.id == run_id && ctx.admits(run))
        .ok_or(SelectionError::RunNotFound(run_id))
}

/// Decide where a module view should be routed.
///
/// - The routed run belongs to the module: stay on it, even if newer runs
///   exist.
/// - Otherwise redirect to the newest run of the module, or report that the
///   module has not been started yet.
///
/// Module membership is the routing criterion; the four-way phase is only
/// a display label.
///
/// # Errors
///
/// Returns [`SelectionError::RunNotFound`] if `current` names a run that is
/// not among the candidates.
pub fn resolve_route(
    runs: &[PipelineRun],
    module: Module,
    current: Option<Uuid>,
    ctx: &SelectionContext,
    signatures: &PhaseSignatures,
) -> Result<RouteDecision, SelectionError> {
    if let Some(current_id) = current {
        let run = find_run(runs, current_id, ctx)?;
        if signatures.is_run_in_module(run, module) {
            tracing::debug!(run_id = %current_id, %module, "routed run matches module");
            return Ok(RouteDecision::Stay { run_id: current_id });
        }
    }

    let decision = match pick_latest_run_for_module(runs, module, ctx, signatures) {
        Some(run) => RouteDecision::Redirect { run_id: run.id },
        None => RouteDecision::NotStarted,
    };
    tracing::debug!(%module, ?decision, "resolved module route");

    Ok(decision)
}
