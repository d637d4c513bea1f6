//! Route finding between named locations.

use crate::graph::{Graph, GraphState};

/// Locations joined by undirected, weighted paths.
#[derive(Debug, Clone, Default)]
pub struct NavigationMap {
    graph: Graph<String>,
}

impl NavigationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location, returning its index. Adding a known name is a no-op.
    pub fn add_location(&mut self, name: impl Into<String>) -> usize {
        self.graph.add_node(name.into())
    }

    /// Connects two known locations both ways.
    ///
    /// Returns `false` if either name is unknown.
    pub fn connect(&mut self, a: &str, b: &str, cost: f64) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => {
                self.graph.add_edge(a, b, cost);
                true
            }
            _ => false,
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.graph.index_of(&name.to_owned())
    }

    /// Search state for the location called `name`.
    pub fn state(&self, name: &str) -> Option<GraphState<'_, String>> {
        self.index_of(name).map(|index| GraphState::of(&self.graph, index))
    }

    pub fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
