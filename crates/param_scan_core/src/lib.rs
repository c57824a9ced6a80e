//! Parameter scan builder for process-bigraph style step graphs.
//!
//! Given one step template and nested maps whose leaves are value lists, the
//! builder discovers every scan axis, expands the Cartesian product of their
//! values and registers one specialized step instance per combination under a
//! unique key. The resulting state map is handed to an execution engine; this
//! crate never runs or validates the steps it assembles.
//!
//! # Quick Start
//!
//! ```
//! use param_scan_core::{Bindings, DocumentEngine, ParameterScanBuilder, StateMap};
//! use serde_json::json;
//!
//! let mut builder = ParameterScanBuilder::new(DocumentEngine);
//! let state_values = json!({"species_concentrations": {"PX": [1, 30000], "PY": [1, 2000]}});
//!
//! let registered = builder
//!     .add_parameter_scan(
//!         "steady_state",
//!         StateMap::new(),
//!         &StateMap::new(),
//!         state_values.as_object().unwrap(),
//!         Bindings::new(),
//!     )
//!     .unwrap();
//! assert_eq!(registered, 4);
//!
//! let document = builder.build().unwrap();
//! assert!(document.state.contains_key("param_scan_steady_state_3"));
//! ```
//!
//! # Architecture
//!
//! - [`discovery`]: turns variable-value maps into ordered [`ScanAxis`] lists
//! - [`expansion`]: recursive Cartesian expansion over a single working instance
//! - [`keys`]: monotonic `<prefix>_<n>` key allocation
//! - [`registry`]: insertion-ordered world state handed to the engine
//! - [`engine`]: execution-engine seam and the built-in document engine
//! - [`builder`]: the composition root tying the pieces together

pub mod builder;
pub mod contract;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod keys;
pub mod registry;

pub use builder::ParameterScanBuilder;
pub use contract::{
    combination_count, AxisKind, Bindings, BuilderConfig, ParameterScanSpec, ScanAxis, StateMap,
    StepTemplate,
};
pub use discovery::discover;
pub use engine::{ComposedGraph, CompositeDocument, CompositeEngine, DocumentEngine};
pub use error::{ScanError, ScanResult};
pub use expansion::CombinationExpander;
pub use keys::KeyAllocator;
pub use registry::ScanRegistry;
