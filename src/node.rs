//! Search nodes and the arena that owns them.
//!
//! Nodes point at their parent through a [`NodeId`] handle rather than a
//! reference, so the tree built during one search has a single owner and
//! no reference cycles even when the state graph has them.

use std::fmt;

/// Dense handle into a [`NodeArena`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state together with how the search reached it.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub state: S,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// Number of edges from the root.
    pub depth: u32,
    /// Sum of edge costs from the root.
    pub path_cost: f64,
}

/// Append-only node storage for a single search invocation.
#[derive(Debug, Clone)]
pub struct NodeArena<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> NodeArena<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocates the root node (depth 0, cost 0).
    pub fn root(&mut self, state: S) -> NodeId {
        self.push(SearchNode {
            state,
            parent: None,
            depth: 0,
            path_cost: 0.0,
        })
    }

    /// Allocates a child reached over an edge of `edge_cost`.
    ///
    /// Depth and path cost are derived from the parent, never supplied.
    pub fn child(&mut self, parent: NodeId, state: S, edge_cost: f64) -> NodeId {
        let (depth, path_cost) = {
            let p = &self.nodes[parent.index()];
            (p.depth + 1, p.path_cost + edge_cost)
        };
        self.push(SearchNode {
            state,
            parent: Some(parent),
            depth,
            path_cost,
        })
    }

    fn push(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node, keeping the allocation for the next pass.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<S: Clone> NodeArena<S> {
    /// Rebuilds the root-to-`id` state sequence by walking parent handles.
    pub fn path_to(&self, id: NodeId) -> Vec<S> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current);
            path.push(node.state.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

impl<S> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_depth_zero_and_no_cost() {
        let mut arena = NodeArena::new();
        let root = arena.root("a");
        let node = arena.get(root);
        assert_eq!(node.depth, 0);
        assert_eq!(node.path_cost, 0.0);
        assert!(node.parent.is_none());
    }

    #[test]
    fn child_accumulates_depth_and_cost() {
        let mut arena = NodeArena::new();
        let root = arena.root("a");
        let b = arena.child(root, "b", 2.0);
        let c = arena.child(b, "c", 3.5);

        let node = arena.get(c);
        assert_eq!(node.depth, 2);
        assert_eq!(node.path_cost, 5.5);
        assert_eq!(node.parent, Some(b));
    }

    #[test]
    fn path_runs_from_root_to_node() {
        let mut arena = NodeArena::new();
        let root = arena.root('a');
        let b = arena.child(root, 'b', 1.0);
        let _sibling = arena.child(root, 'x', 1.0);
        let c = arena.child(b, 'c', 1.0);

        assert_eq!(arena.path_to(c), vec!['a', 'b', 'c']);
        assert_eq!(arena.path_to(root), vec!['a']);
    }

    #[test]
    fn clear_empties_the_arena() {
        let mut arena = NodeArena::new();
        arena.root(1);
        assert_eq!(arena.len(), 1);
        arena.clear();
        assert!(arena.is_empty());
    }
}
