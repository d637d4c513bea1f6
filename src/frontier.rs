//! Frontier disciplines: which discovered node gets expanded next.
//!
//! The frontier stores [`NodeId`] handles only; node data lives in the
//! [`crate::node::NodeArena`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::node::NodeId;

/// Ordering key for the priority frontier: lower `f_cost` first, ties
/// broken by insertion order so equal-priority nodes pop first-in first-out.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub insertion: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.insertion.cmp(&other.insertion))
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityEntry {
    key: FrontierKey,
    node: NodeId,
}

#[derive(Debug)]
enum Discipline {
    Stack(Vec<NodeId>),
    Queue(VecDeque<NodeId>),
    /// `BinaryHeap` is a max-heap; `Reverse` turns it into a min-heap.
    Priority(BinaryHeap<Reverse<PriorityEntry>>),
}

/// Not-yet-expanded nodes, ordered by one of three disciplines.
#[derive(Debug)]
pub struct Frontier {
    discipline: Discipline,
    insertions: u64,
    high_water: usize,
}

impl Frontier {
    /// Last in, first out.
    pub fn stack() -> Self {
        Self::with(Discipline::Stack(Vec::new()))
    }

    /// First in, first out.
    pub fn queue() -> Self {
        Self::with(Discipline::Queue(VecDeque::new()))
    }

    /// Lowest priority first, stable among equal priorities.
    pub fn priority() -> Self {
        Self::with(Discipline::Priority(BinaryHeap::new()))
    }

    fn with(discipline: Discipline) -> Self {
        Self {
            discipline,
            insertions: 0,
            high_water: 0,
        }
    }

    /// Adds a node. `priority` is only consulted by the priority discipline.
    pub fn push(&mut self, node: NodeId, priority: f64) {
        let insertion = self.insertions;
        self.insertions += 1;
        match &mut self.discipline {
            Discipline::Stack(stack) => stack.push(node),
            Discipline::Queue(queue) => queue.push_back(node),
            Discipline::Priority(heap) => heap.push(Reverse(PriorityEntry {
                key: FrontierKey {
                    f_cost: priority,
                    insertion,
                },
                node,
            })),
        }
        self.high_water = self.high_water.max(self.len());
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        match &mut self.discipline {
            Discipline::Stack(stack) => stack.pop(),
            Discipline::Queue(queue) => queue.pop_front(),
            Discipline::Priority(heap) => heap.pop().map(|Reverse(entry)| entry.node),
        }
    }

    pub fn len(&self) -> usize {
        match &self.discipline {
            Discipline::Stack(stack) => stack.len(),
            Discipline::Queue(queue) => queue.len(),
            Discipline::Priority(heap) => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the most recently pushed node is popped first.
    pub fn is_lifo(&self) -> bool {
        matches!(self.discipline, Discipline::Stack(_))
    }

    /// Largest size the frontier has reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
