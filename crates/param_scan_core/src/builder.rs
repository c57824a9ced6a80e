//! Composition root: discovery, expansion and registration behind one builder.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::contract::{
    combination_count, AxisKind, Bindings, BuilderConfig, ParameterScanSpec, StateMap,
    StepTemplate, COMPARISON_RESULTS_KEY,
};
use crate::discovery::discover;
use crate::engine::CompositeEngine;
use crate::error::{ScanError, ScanResult};
use crate::expansion::CombinationExpander;
use crate::keys::KeyAllocator;
use crate::registry::ScanRegistry;

/// Accumulates scanned and fixed steps into one registry and hands it to an engine.
///
/// A builder is driven by one caller at a time; wrap it in a mutex to share it.
pub struct ParameterScanBuilder<E> {
    engine: E,
    config: BuilderConfig,
    keys: KeyAllocator,
    registry: ScanRegistry,
}

impl<E: CompositeEngine> ParameterScanBuilder<E> {
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, BuilderConfig::default())
    }

    pub fn with_config(engine: E, config: BuilderConfig) -> Self {
        Self::with_parts(engine, config, KeyAllocator::new())
    }

    pub fn with_parts(engine: E, config: BuilderConfig, keys: KeyAllocator) -> Self {
        Self {
            engine,
            config,
            keys,
            registry: ScanRegistry::new(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn registry(&self) -> &ScanRegistry {
        &self.registry
    }

    pub fn keys(&self) -> &KeyAllocator {
        &self.keys
    }

    /// Registers one instance of `step_name` per combination of the list leaves in
    /// `state_values` and `config_values`, returning how many were added.
    ///
    /// State axes precede config axes in the combined list. When neither map
    /// holds a list leaf the call is a no-op and returns `Ok(0)`. A failure during
    /// expansion leaves already registered instances in place.
    pub fn add_parameter_scan(
        &mut self,
        step_name: &str,
        step_config: StateMap,
        config_values: &StateMap,
        state_values: &StateMap,
        input_mappings: Bindings,
    ) -> ScanResult<usize> {
        let mut axes = discover(Vec::new(), state_values, AxisKind::State)?;
        axes.extend(discover(Vec::new(), config_values, AxisKind::Config)?);

        if axes.is_empty() {
            info!(step = step_name, "no scan axes discovered; nothing registered");
            return Ok(0);
        }

        let combinations = combination_count(&axes);
        if let Some(limit) = self.config.max_combinations {
            if combinations > limit {
                return Err(ScanError::TooManyCombinations {
                    step: step_name.to_string(),
                    combinations,
                    limit,
                });
            }
        }

        let template = StepTemplate::for_scan(step_name, step_config, input_mappings, &self.config);
        let seed = template.seed(&self.config.results_key);
        let key_prefix = self.config.scan_key_prefix(step_name);

        let registered =
            CombinationExpander::new(step_name, &key_prefix, &mut self.keys, &mut self.registry)
                .expand(&seed, &axes)?;

        info!(
            step = step_name,
            axes = axes.len(),
            registered,
            total = self.registry.len(),
            "registered parameter scan"
        );
        Ok(registered)
    }

    pub fn add_scan(&mut self, spec: &ParameterScanSpec) -> ScanResult<usize> {
        self.add_parameter_scan(
            &spec.step_name,
            spec.step_config.clone(),
            &spec.config_values,
            &spec.state_values,
            spec.input_mappings.clone(),
        )
    }

    /// Registers a single, unscanned step node under `<name>_<n>`.
    pub fn add_step(&mut self, template: StepTemplate) -> ScanResult<String> {
        let key = self.keys.allocate(&template.name);
        debug!(key = %key, address = %template.address, "registering step");
        self.registry.insert(key.clone(), template.node())?;
        Ok(key)
    }

    /// Registers a comparison step reading `input_path` and writing to
    /// `comparison_results.<comparison_name>`.
    pub fn add_comparison_step(
        &mut self,
        comparison_name: &str,
        input_path: Vec<String>,
    ) -> ScanResult<String> {
        let template = comparison_template(&self.config, comparison_name, input_path);
        self.add_step(template)
    }

    /// Inserts a baseline entry alongside the generated instances.
    pub fn add_to_state(&mut self, key: impl Into<String>, value: Value) -> ScanResult<()> {
        self.registry.insert(key.into(), value)
    }

    /// Hands the accumulated state to the engine. Consumes the builder.
    pub fn build(self) -> Result<E::Composite, E::Error> {
        info!(
            entries = self.registry.len(),
            fingerprint = %self.registry.fingerprint(),
            "composing scan registry"
        );
        self.engine.compose(self.registry.into_state())
    }
}

fn comparison_template(
    config: &BuilderConfig,
    comparison_name: &str,
    input_path: Vec<String>,
) -> StepTemplate {
    let mut step_config = StateMap::new();
    step_config.insert("ignore_nans".to_string(), json!(false));
    StepTemplate {
        name: format!("comparison_{comparison_name}"),
        address: config.comparison_address.clone(),
        config: step_config,
        inputs: Bindings::from([(config.results_key.clone(), input_path)]),
        outputs: Bindings::from([(
            "comparison_result".to_string(),
            vec![
                COMPARISON_RESULTS_KEY.to_string(),
                comparison_name.to_string(),
            ],
        )]),
    }
}
