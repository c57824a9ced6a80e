//! Example: scan initial species concentrations of one steady-state step.
//!
//! Builds the 2x2x2 concentration grid, adds a baseline species count entry
//! and prints the resulting composite document.

use param_scan_core::{Bindings, DocumentEngine, ParameterScanBuilder, StateMap};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ParameterScanBuilder::new(DocumentEngine);

    let step_config = json!({"model_source": "BIOMD0000000012_url.xml"});
    let state_values = json!({
        "species_concentrations": {"PX": [1, 30000], "PY": [1, 2000], "PZ": [1, 5000]}
    })
    .as_object()
    .cloned()
    .unwrap_or_default();
    let inputs = Bindings::from([
        (
            "species_concentrations".to_string(),
            vec!["species_concentrations".to_string()],
        ),
        ("counts".to_string(), vec!["species_counts".to_string()]),
    ]);

    builder.add_to_state("species_counts", json!({}))?;
    let registered = builder.add_parameter_scan(
        "steady_state",
        step_config.as_object().cloned().unwrap_or_default(),
        &StateMap::new(),
        &state_values,
        inputs,
    )?;
    println!("Registered {registered} scan instances");
    println!("Registry fingerprint: {}", builder.registry().fingerprint());

    let document = builder.build()?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
