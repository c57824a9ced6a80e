use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ScanError, ScanResult};

pub const STEP_TYPE: &str = "step";
pub const DEFAULT_KEY_PREFIX: &str = "param_scan";
pub const DEFAULT_ADDRESS_SCHEME: &str = "local";
pub const DEFAULT_RESULTS_KEY: &str = "results";
pub const DEFAULT_RESULT_PORT: &str = "result";
pub const DEFAULT_COMPARISON_ADDRESS: &str = "local:comparison";
pub const COMPARISON_RESULTS_KEY: &str = "comparison_results";

/// Nested, insertion-ordered mapping used for configs, state and instances.
pub type StateMap = Map<String, Value>;

/// Port name to store path, e.g. `{"concentrations": ["species_concentrations"]}`.
pub type Bindings = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Written under the step's `config`; intermediate keys must already exist.
    Config,
    /// Written from the top level of the instance; missing levels are created.
    State,
}

impl AxisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::State => "state",
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dimension of a scan: where to write, and which values to write there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanAxis {
    path: Vec<String>,
    values: Vec<Value>,
    kind: AxisKind,
}

impl ScanAxis {
    pub fn new(path: Vec<String>, values: Vec<Value>, kind: AxisKind) -> ScanResult<Self> {
        if path.is_empty() {
            return Err(ScanError::EmptyAxisPath);
        }
        if values.is_empty() {
            return Err(ScanError::EmptyAxisValues { path });
        }
        Ok(Self { path, values, kind })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }
}

/// Number of combinations spanned by `axes`, saturating at `usize::MAX`.
///
/// An empty axis list spans zero combinations: nothing is expanded for it.
pub fn combination_count(axes: &[ScanAxis]) -> usize {
    if axes.is_empty() {
        return 0;
    }
    axes.iter()
        .fold(1usize, |total, axis| total.saturating_mul(axis.values.len()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub key_prefix: String,
    pub address_scheme: String,
    pub results_key: String,
    pub result_port: String,
    pub comparison_address: String,
    pub max_combinations: Option<usize>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            address_scheme: DEFAULT_ADDRESS_SCHEME.to_string(),
            results_key: DEFAULT_RESULTS_KEY.to_string(),
            result_port: DEFAULT_RESULT_PORT.to_string(),
            comparison_address: DEFAULT_COMPARISON_ADDRESS.to_string(),
            max_combinations: None,
        }
    }
}

impl BuilderConfig {
    pub fn step_address(&self, step_name: &str) -> String {
        format!("{}:{step_name}", self.address_scheme)
    }

    pub fn scan_key_prefix(&self, step_name: &str) -> String {
        format!("{}_{step_name}", self.key_prefix)
    }
}

/// Fixed shape of a single step. Never mutated by expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTemplate {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub config: StateMap,
    #[serde(default)]
    pub inputs: Bindings,
    #[serde(default)]
    pub outputs: Bindings,
}

impl StepTemplate {
    /// Template for a scanned step: local address, single result port wired to the results store.
    pub fn for_scan(
        name: impl Into<String>,
        config: StateMap,
        inputs: Bindings,
        builder_config: &BuilderConfig,
    ) -> Self {
        let name = name.into();
        let outputs = Bindings::from([(
            builder_config.result_port.clone(),
            vec![builder_config.results_key.clone()],
        )]);
        Self {
            address: builder_config.step_address(&name),
            name,
            config,
            inputs,
            outputs,
        }
    }

    /// The step node as the execution engine expects it.
    pub fn node(&self) -> Value {
        json!({
            "_type": STEP_TYPE,
            "address": self.address,
            "config": self.config,
            "inputs": bindings_value(&self.inputs),
            "outputs": bindings_value(&self.outputs),
        })
    }

    /// Wrapper instance `{<results_key>: {}, <name>: <node>}` that expansion starts from.
    pub fn seed(&self, results_key: &str) -> StateMap {
        let mut seed = StateMap::new();
        seed.insert(results_key.to_string(), Value::Object(StateMap::new()));
        seed.insert(self.name.clone(), self.node());
        seed
    }
}

/// Arguments of one `add_parameter_scan` call in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterScanSpec {
    pub step_name: String,
    #[serde(default)]
    pub step_config: StateMap,
    #[serde(default)]
    pub config_values: StateMap,
    #[serde(default)]
    pub state_values: StateMap,
    #[serde(default)]
    pub input_mappings: Bindings,
}

pub fn bindings_value(bindings: &Bindings) -> Value {
    Value::Object(
        bindings
            .iter()
            .map(|(port, path)| (port.clone(), Value::from(path.clone())))
            .collect(),
    )
}

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn stable_contract_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of contract value should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_axis_rejects_empty_values() {
        let error = ScanAxis::new(vec!["PX".to_string()], Vec::new(), AxisKind::State)
            .expect_err("empty axis should fail");
        assert_eq!(
            error,
            ScanError::EmptyAxisValues {
                path: vec!["PX".to_string()]
            }
        );
    }

    #[test]
    fn combination_count_multiplies_value_counts() {
        let axes = vec![
            ScanAxis::new(vec!["a".into()], vec![json!(1), json!(2)], AxisKind::State).unwrap(),
            ScanAxis::new(vec!["b".into()], vec![json!(1), json!(2), json!(3)], AxisKind::Config)
                .unwrap(),
        ];
        assert_eq!(combination_count(&axes), 6);
        assert_eq!(combination_count(&[]), 0);
    }

    #[test]
    fn scan_template_seed_has_expected_shape() {
        let config = json!({"model_source": "model.xml"})
            .as_object()
            .cloned()
            .unwrap();
        let inputs = Bindings::from([(
            "species_concentrations".to_string(),
            vec!["species_concentrations".to_string()],
        )]);
        let template =
            StepTemplate::for_scan("steady_state", config, inputs, &BuilderConfig::default());

        assert_eq!(
            Value::Object(template.seed("results")),
            json!({
                "results": {},
                "steady_state": {
                    "_type": "step",
                    "address": "local:steady_state",
                    "config": {"model_source": "model.xml"},
                    "inputs": {"species_concentrations": ["species_concentrations"]},
                    "outputs": {"result": ["results"]},
                }
            })
        );
    }

    #[test]
    fn builder_config_deserializes_partial_overrides() {
        let config: BuilderConfig =
            serde_json::from_value(json!({"key_prefix": "sweep", "max_combinations": 16}))
                .expect("config should parse");
        assert_eq!(config.key_prefix, "sweep");
        assert_eq!(config.max_combinations, Some(16));
        assert_eq!(config.address_scheme, DEFAULT_ADDRESS_SCHEME);
        assert_eq!(config.scan_key_prefix("tellurium"), "sweep_tellurium");
    }
}
