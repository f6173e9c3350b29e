//! Text rendering of run display state.

use colored::{ColoredString, Colorize};
use rb_protocol::run_models::{ExecutionStatus, StatusBucket, StepExecution};
use rb_protocol::view_models::{IterationGroup, ProgressSource, RunDisplay};
use std::fmt::Write;

fn paint_status(status: &ExecutionStatus) -> ColoredString {
    let text = status.as_str();
    match status.bucket() {
        StatusBucket::Active => text.yellow(),
        StatusBucket::Failed => text.red(),
        StatusBucket::Succeeded => text.green(),
        StatusBucket::Other => text.dimmed(),
    }
}

fn marker(exec: &StepExecution, highlighted: Option<&StepExecution>) -> &'static str {
    match highlighted {
        Some(h) if h.id == exec.id => ">",
        _ => " ",
    }
}

fn iteration_label(group: &IterationGroup, display: &RunDisplay) -> String {
    let mut tags = Vec::new();
    if display.current_iteration == Some(group.iteration_index) {
        tags.push("current");
    }
    if display.focused_iteration == Some(group.iteration_index) {
        tags.push("focused");
    }
    if group.is_failed {
        tags.push("failed");
    }

    let title = format!("Iteration {}", group.iteration_index + 1);
    if tags.is_empty() {
        title
    } else {
        format!("{title} ({})", tags.join(", "))
    }
}

fn source_label(source: ProgressSource) -> &'static str {
    match source {
        ProgressSource::LiveOverall => "live",
        ProgressSource::LiveSteps => "live steps",
        ProgressSource::Stored => "stored",
    }
}

/// Multi-line summary of a run: header, current step, then every
/// iteration with its attempts in chronological order.
pub fn render_display(display: &RunDisplay) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}  [{}]  {}  {}% ({})",
        "Run".bold(),
        display.run_id,
        display.phase.to_string().cyan(),
        paint_status(&display.status),
        display.overall_progress,
        source_label(display.progress_source),
    );

    if let Some(name) = &display.current_step_name {
        let _ = writeln!(out, "Current step: {}", name.bold());
    }

    if display.iterations.is_empty() {
        let _ = writeln!(out, "{}", "No step executions yet".dimmed());
        return out;
    }

    let highlighted = display.highlighted.as_ref();
    for group in &display.iterations {
        let _ = writeln!(out, "{}", iteration_label(group, display));
        for exec in &group.executions {
            let _ = write!(
                out,
                "  {} {:>2}. {:<28} {:<12} {:>3}%",
                marker(exec, highlighted),
                exec.step_number,
                exec.step_name,
                paint_status(&exec.status),
                exec.progress_percent.clamp(0, 100),
            );
            if let (Some(done), Some(total)) = (exec.items_processed, exec.items_total) {
                let _ = write!(out, "  {done}/{total} items");
            }
            if let Some(error) = &exec.error_message {
                let _ = write!(out, "  {}", error.red());
            }
            out.push('\n');
        }
    }

    out
}

/// One-line progress summary, printed on every live update.
pub fn render_progress_line(display: &RunDisplay) -> String {
    let step = display.current_step_name.as_deref().unwrap_or("-");
    format!(
        "{} {:>3}%  {}",
        paint_status(&display.status),
        display.overall_progress,
        step
    )
}
