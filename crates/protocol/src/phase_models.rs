//! Phase and module tags derived from a run's step names.
//!
//! Two tagging schemes coexist: the four-way [`RunPhase`] used as a display
//! label, and the two [`Module`]s a run can be a member of. A run can be a
//! member of a module while its phase is `Mixed`, so the two are not
//! required to agree.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::run_models::PipelineRun;

/// Four-way classification of a run by the step names it contains.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Only keyword/topic discovery steps were seen.
    Discovery,

    /// Only content creation steps were seen.
    Creation,

    /// Both discovery and creation steps were seen.
    Mixed,

    /// No recognised step names, including runs with no executions.
    Unknown,
}

/// A dashboard module a run can be shown under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Discovery,
    Creation,
}

impl Module {
    /// The single-module phase that corresponds to this module.
    pub fn phase(self) -> RunPhase {
        match self {
            Module::Discovery => RunPhase::Discovery,
            Module::Creation => RunPhase::Creation,
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RunPhase::Discovery => "discovery",
            RunPhase::Creation => "creation",
            RunPhase::Mixed => "mixed",
            RunPhase::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.phase())
    }
}

impl std::str::FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discovery" => Ok(Module::Discovery),
            "creation" => Ok(Module::Creation),
            other => Err(format!(
                "unknown module '{other}', expected 'discovery' or 'creation'"
            )),
        }
    }
}

/// A run together with its derived phase.
///
/// Recomputed whenever it is needed; never persisted.
#[derive(Serialize, Debug, Clone, PartialEq, TS)]
pub struct ClassifiedRun {
    #[serde(flatten)]
    pub run: PipelineRun,

    pub phase: RunPhase,
}
