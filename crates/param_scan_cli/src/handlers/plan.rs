use std::fs;
use std::path::Path;

use anyhow::Context;
use param_scan_core::{
    BuilderConfig, CompositeDocument, DocumentEngine, ParameterScanBuilder, ParameterScanSpec,
    ScanError, StateMap, StepTemplate,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::document_store::DocumentStore;

pub const DEFAULT_DOCUMENT_NAME: &str = "input.pbif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSpec {
    pub name: String,
    pub input_path: Vec<String>,
}

/// Everything one builder run consumes, in registration order:
/// baseline entries, fixed steps, parameter scans, then comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanPlan {
    #[serde(default)]
    pub config: BuilderConfig,
    #[serde(default)]
    pub baseline: StateMap,
    #[serde(default)]
    pub steps: Vec<StepTemplate>,
    #[serde(default)]
    pub scans: Vec<ParameterScanSpec>,
    #[serde(default)]
    pub comparisons: Vec<ComparisonSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub document: CompositeDocument,
    pub scan_instances: usize,
    pub fingerprint: String,
}

pub fn build_document(plan: ScanPlan) -> Result<PlanOutcome, ScanError> {
    let mut builder = ParameterScanBuilder::with_config(DocumentEngine, plan.config);

    for (key, value) in plan.baseline {
        builder.add_to_state(key, value)?;
    }
    for step in plan.steps {
        builder.add_step(step)?;
    }

    let mut scan_instances = 0usize;
    for scan in &plan.scans {
        scan_instances += builder.add_scan(scan)?;
    }

    for comparison in plan.comparisons {
        builder.add_comparison_step(&comparison.name, comparison.input_path)?;
    }

    let fingerprint = builder.registry().fingerprint();
    let document = match builder.build() {
        Ok(document) => document,
        Err(never) => match never {},
    };

    Ok(PlanOutcome {
        document,
        scan_instances,
        fingerprint,
    })
}

/// Reads a JSON plan. `max_combinations` overrides the plan's own bound when given.
pub fn load_plan(input: &Path, max_combinations: Option<usize>) -> anyhow::Result<ScanPlan> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read scan plan {}", input.display()))?;
    let mut plan: ScanPlan = serde_json::from_str(&raw)
        .with_context(|| format!("malformed scan plan {}", input.display()))?;
    if max_combinations.is_some() {
        plan.config.max_combinations = max_combinations;
    }
    Ok(plan)
}

/// Loads a plan, builds its document and writes it through `store`.
pub fn handle_plan_file(
    input: &Path,
    document_name: &str,
    max_combinations: Option<usize>,
    store: &dyn DocumentStore,
) -> anyhow::Result<PlanOutcome> {
    let plan = load_plan(input, max_combinations)?;
    let outcome = build_document(plan)?;
    let body = serde_json::to_vec_pretty(&outcome.document)?;
    let path = store.write_document(document_name, &body)?;

    info!(
        path = %path.display(),
        entries = outcome.document.state.len(),
        scan_instances = outcome.scan_instances,
        fingerprint = %outcome.fingerprint,
        "wrote composite document"
    );
    Ok(outcome)
}
