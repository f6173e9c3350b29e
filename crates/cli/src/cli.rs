//! Command-line arguments.

use clap::{Parser, Subcommand};
use rb_protocol::phase_models::Module;
use std::path::PathBuf;
use uuid::Uuid;

/// Inspect and watch content pipeline runs.
#[derive(Parser, Debug)]
#[command(name = "runboard", version, about)]
pub struct Cli {
    /// Project root containing `.runboard/config.toml`.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the derived display state of one run from a runs listing.
    Inspect(InspectArgs),

    /// Poll a run's live progress until it stops being active.
    Watch(WatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// JSON file holding an array of runs, as returned by the backend.
    pub runs: PathBuf,

    /// Run the view is currently routed to.
    #[arg(long)]
    pub run: Option<Uuid>,

    /// Module view to resolve (`discovery` or `creation`).
    #[arg(long)]
    pub module: Option<Module>,

    /// Only consider runs of this project.
    #[arg(long)]
    pub project: Option<Uuid>,

    /// Step number the user focused.
    #[arg(long)]
    pub focus: Option<u32>,

    /// Print the display state as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// JSON file holding the stored run.
    pub run: PathBuf,

    /// JSON file re-read on every refresh as the live progress snapshot.
    #[arg(long)]
    pub progress: PathBuf,

    /// Refresh interval, overriding the configured one.
    #[arg(long)]
    pub interval_ms: Option<u64>,
}
