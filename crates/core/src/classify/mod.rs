//! Phase classification of pipeline runs.
//!
//! A run is classified purely from the step names in its execution log. Two
//! disjoint signature sets decide whether a name looks like discovery work
//! (seed generation, SERP analysis, clustering, ...) or creation work
//! (outlines, briefs, articles, ...).
//!
//! Two predicates are offered and they are allowed to disagree:
//! - [`PhaseSignatures::classify`]: four-way phase used as a display label
//! - [`PhaseSignatures::is_run_in_module`]: yes/no module membership

use rb_protocol::config_models::SignatureConfig;
use rb_protocol::phase_models::{ClassifiedRun, Module, RunPhase};
use rb_protocol::run_models::PipelineRun;
use std::collections::BTreeSet;

/// Lower-case a name and drop separator characters.
///
/// `"Seed-Generation"`, `"seed_generation"` and `"seed generation"` all
/// normalize to `"seedgeneration"`.
pub fn normalize_step_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(*c, '_' | '-' | ' ' | '.' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized discovery and creation signature sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSignatures {
    discovery: Vec<String>,
    creation: Vec<String>,
}

impl Default for PhaseSignatures {
    fn default() -> Self {
        Self::from_config(&SignatureConfig::default())
    }
}

impl PhaseSignatures {
    /// Build signature sets from configuration.
    ///
    /// Entries that normalize to an empty string are ignored, since they
    /// would match every step name.
    pub fn from_config(config: &SignatureConfig) -> Self {
        Self {
            discovery: normalize_all(&config.discovery),
            creation: normalize_all(&config.creation),
        }
    }

    /// Whether a step name carries a signature of the given module.
    pub fn matches(&self, module: Module, step_name: &str) -> bool {
        let normalized = normalize_step_name(step_name);
        let signatures = match module {
            Module::Discovery => &self.discovery,
            Module::Creation => &self.creation,
        };
        signatures.iter().any(|sig| normalized.contains(sig.as_str()))
    }

    /// Classify a run into a phase from its distinct step names.
    pub fn classify(&self, run: &PipelineRun) -> RunPhase {
        let names = distinct_step_names(run);
        let discovery = names.iter().any(|n| self.matches(Module::Discovery, n));
        let creation = names.iter().any(|n| self.matches(Module::Creation, n));

        match (discovery, creation) {
            (true, true) => RunPhase::Mixed,
            (true, false) => RunPhase::Discovery,
            (false, true) => RunPhase::Creation,
            (false, false) => RunPhase::Unknown,
        }
    }

    /// Whether any step of the run carries the module's signature.
    ///
    /// This does not consult [`classify`](Self::classify): a `Mixed` run is
    /// a member of both modules.
    pub fn is_run_in_module(&self, run: &PipelineRun, module: Module) -> bool {
        run.step_executions
            .iter()
            .any(|exec| self.matches(module, &exec.step_name))
    }

    /// Attach a phase to every run, preserving input order.
    pub fn classify_runs(&self, runs: &[PipelineRun]) -> Vec<ClassifiedRun> {
        runs.iter()
            .map(|run| ClassifiedRun {
                phase: self.classify(run),
                run: run.clone(),
            })
            .collect()
    }

    /// Signatures present in both sets after normalization.
    pub fn overlap(&self) -> Vec<String> {
        self.discovery
            .iter()
            .filter(|sig| self.creation.contains(sig))
            .cloned()
            .collect()
    }
}

fn normalize_all(signatures: &[String]) -> Vec<String> {
    signatures
        .iter()
        .map(|s| normalize_step_name(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn distinct_step_names(run: &PipelineRun) -> BTreeSet<&str> {
    run.step_executions
        .iter()
        .map(|exec| exec.step_name.as_str())
        .collect()
}

/// Classify a run with the built-in signatures.
pub fn classify(run: &PipelineRun) -> RunPhase {
    PhaseSignatures::default().classify(run)
}

/// Module membership with the built-in signatures.
pub fn is_run_in_module(run: &PipelineRun, module: Module) -> bool {
    PhaseSignatures::default().is_run_in_module(run, module)
}
