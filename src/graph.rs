//! Explicit weighted graphs and their state view.
//!
//! Domains whose successors come from a table (named locations, a sampled
//! roadmap) build a [`Graph`] once and search over [`GraphState`] handles
//! borrowed from it. The graph is never mutated while a search borrows it.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::state::State;

/// Outgoing edge in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub cost: f64,
}

/// Undirected weighted graph with value-deduplicated nodes.
///
/// Adjacency lists keep insertion order so successor order, and with it
/// every search trace, is reproducible.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    adjacency: Vec<Vec<Edge>>,
    index: FxHashMap<N, usize>,
}

impl<N: Clone + Eq + Hash> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Adds `value` and returns its index, or the existing index if an equal
    /// value is already present.
    pub fn add_node(&mut self, value: N) -> usize {
        if let Some(&existing) = self.index.get(&value) {
            return existing;
        }
        let index = self.nodes.len();
        self.index.insert(value.clone(), index);
        self.nodes.push(value);
        self.adjacency.push(Vec::new());
        index
    }

    /// Connects `a` and `b` both ways. Re-adding an edge overwrites its cost.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize, cost: f64) {
        self.set_directed(a, b, cost);
        if a != b {
            self.set_directed(b, a, cost);
        }
    }

    fn set_directed(&mut self, from: usize, to: usize, cost: f64) {
        let edges = &mut self.adjacency[from];
        match edges.iter_mut().find(|edge| edge.to == to) {
            Some(edge) => edge.cost = cost,
            None => edges.push(Edge { to, cost }),
        }
    }

    pub fn index_of(&self, value: &N) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Search state for the node equal to `value`.
    pub fn state_of(&self, value: &N) -> Option<GraphState<'_, N>> {
        self.index_of(value).map(|index| GraphState { graph: self, index })
    }
}

impl<N> Graph<N> {
    /// Search state for node `index`, if it exists.
    pub fn state(&self, index: usize) -> Option<GraphState<'_, N>> {
        (index < self.nodes.len()).then_some(GraphState { graph: self, index })
    }

    pub fn node(&self, index: usize) -> &N {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn edges(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges (self-loops count once).
    pub fn edge_count(&self) -> usize {
        let self_loops = self
            .adjacency
            .iter()
            .enumerate()
            .filter(|(from, edges)| edges.iter().any(|edge| edge.to == *from))
            .count();
        let directed: usize = self.adjacency.iter().map(Vec::len).sum();
        (directed + self_loops) / 2
    }
}

impl<N: Clone + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of a borrowed [`Graph`], usable as a search state.
///
/// Two handles are equal iff they name the same node of the same graph.
pub struct GraphState<'g, N> {
    graph: &'g Graph<N>,
    index: usize,
}

impl<'g, N> GraphState<'g, N> {
    /// Handle for a node index the caller knows to be in range.
    pub(crate) fn of(graph: &'g Graph<N>, index: usize) -> Self {
        debug_assert!(index < graph.nodes.len());
        Self { graph, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &'g N {
        &self.graph.nodes[self.index]
    }

    pub fn graph(&self) -> &'g Graph<N> {
        self.graph
    }
}

impl<N> Clone for GraphState<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for GraphState<'_, N> {}

impl<N> PartialEq for GraphState<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && std::ptr::eq(self.graph, other.graph)
    }
}

impl<N> Eq for GraphState<'_, N> {}

impl<N> Hash for GraphState<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<N: fmt::Debug> fmt::Debug for GraphState<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value(), f)
    }
}

impl<N: fmt::Display> fmt::Display for GraphState<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value(), f)
    }
}

impl<N: fmt::Debug> State for GraphState<'_, N> {
    fn successors(&self) -> Vec<Self> {
        self.graph
            .edges(self.index)
            .iter()
            .map(|edge| GraphState {
                graph: self.graph,
                index: edge.to,
            })
            .collect()
    }

    fn cost(&self, successor: &Self) -> Option<f64> {
        if !std::ptr::eq(self.graph, successor.graph) {
            return None;
        }
        self.graph
            .edges(self.index)
            .iter()
            .find(|edge| edge.to == successor.index)
            .map(|edge| edge.cost)
    }
}
