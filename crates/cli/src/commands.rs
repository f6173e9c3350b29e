//! Subcommand implementations.

use crate::cli::{InspectArgs, WatchArgs};
use crate::fetcher::FileSnapshotFetcher;
use crate::render::{render_display, render_progress_line};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use rb_core::classify::PhaseSignatures;
use rb_core::polling::PollingController;
use rb_core::select::{find_run, pick_latest_run, resolve_route, SelectionContext};
use rb_core::view::build_run_display;
use rb_protocol::config_models::DashboardConfig;
use rb_protocol::ipc::{PollEvent, PollerState};
use rb_protocol::run_models::PipelineRun;
use rb_protocol::view_models::RouteDecision;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

/// Resolve which run an `inspect` invocation is about.
///
/// Returns `None` when a module was requested and it has no runs yet.
fn select_run<'a>(
    runs: &'a [PipelineRun],
    args: &InspectArgs,
    ctx: &SelectionContext,
    signatures: &PhaseSignatures,
) -> Result<Option<&'a PipelineRun>> {
    if let Some(module) = args.module {
        let run_id = match resolve_route(runs, module, args.run, ctx, signatures)? {
            RouteDecision::Stay { run_id } => run_id,
            RouteDecision::Redirect { run_id } => {
                if args.run.is_some() {
                    eprintln!("{} run is not a {module} run, showing {run_id}", "note:".yellow());
                }
                run_id
            }
            RouteDecision::NotStarted => return Ok(None),
        };
        return Ok(Some(find_run(runs, run_id, ctx)?));
    }

    match args.run {
        Some(run_id) => Ok(Some(find_run(runs, run_id, ctx)?)),
        None => Ok(pick_latest_run(runs, ctx)),
    }
}

pub async fn inspect(args: InspectArgs, config: &DashboardConfig) -> Result<()> {
    let runs: Vec<PipelineRun> = read_json(&args.runs).await?;
    let signatures = PhaseSignatures::from_config(&config.signatures);
    let ctx = args
        .project
        .map(SelectionContext::for_project)
        .unwrap_or_default();

    let Some(run) = select_run(&runs, &args, &ctx, &signatures)? else {
        match args.module {
            Some(module) => println!("The {module} module has not been started yet."),
            None => println!("No runs found."),
        }
        return Ok(());
    };

    let display = build_run_display(run, None, args.focus, &signatures);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&display)?);
    } else {
        print!("{}", render_display(&display));
    }

    Ok(())
}

pub async fn watch(args: WatchArgs, config: &DashboardConfig) -> Result<()> {
    let run: PipelineRun = read_json(&args.run).await?;
    let signatures = PhaseSignatures::from_config(&config.signatures);
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(config.poll_interval_ms));
    if interval.is_zero() {
        return Err(eyre!("--interval-ms must be greater than zero"));
    }

    let (events_tx, mut events_rx) = mpsc::channel(100);
    let fetcher = Arc::new(FileSnapshotFetcher::new(&args.progress));
    let controller = PollingController::new(run.id, fetcher, interval, events_tx);

    if controller.observe(&run.status).await != PollerState::Polling {
        println!("Run {} is not active ({}), nothing to watch.", run.id, run.status);
        print!("{}", render_display(&build_run_display(&run, None, None, &signatures)));
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    PollEvent::PollingStarted { run_id } => {
                        println!("Watching run {run_id} every {} ms", interval.as_millis());
                    }
                    PollEvent::SnapshotUpdated { snapshot, .. } => {
                        let display = build_run_display(&run, Some(&snapshot), None, &signatures);
                        println!("{}", render_progress_line(&display));
                    }
                    PollEvent::RefreshFailed { error, .. } => {
                        eprintln!("{} {error}", "refresh failed:".red());
                    }
                    PollEvent::PollingStopped { state, .. } => {
                        tracing::debug!(?state, "polling stopped");
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!(run_id = %run.id, "interrupted");
                controller.stop().await;
                return Ok(());
            }
        }
    }

    let latest = controller.latest_snapshot().await;
    print!(
        "{}",
        render_display(&build_run_display(&run, latest.as_ref(), None, &signatures))
    );

    Ok(())
}
