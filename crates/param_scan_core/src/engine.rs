use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::contract::StateMap;

/// A composed step graph as returned by an execution engine.
pub trait ComposedGraph {
    fn state(&self) -> &StateMap;
}

/// Execution-engine collaborator that turns the builder's world state into a graph.
///
/// The builder only hands over structure; resolving step addresses and running
/// the graph is entirely the engine's business.
pub trait CompositeEngine {
    type Composite: ComposedGraph;
    type Error: std::error::Error + Send + Sync + 'static;

    fn compose(&self, state: StateMap) -> Result<Self::Composite, Self::Error>;
}

/// Serializable `{"state": {...}}` document accepted by process-bigraph style runners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeDocument {
    pub state: StateMap,
}

impl ComposedGraph for CompositeDocument {
    fn state(&self) -> &StateMap {
        &self.state
    }
}

/// Engine that performs no resolution and wraps the state as a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentEngine;

impl CompositeEngine for DocumentEngine {
    type Composite = CompositeDocument;
    type Error = Infallible;

    fn compose(&self, state: StateMap) -> Result<Self::Composite, Self::Error> {
        Ok(CompositeDocument { state })
    }
}
