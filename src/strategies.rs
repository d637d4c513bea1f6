//! Traversal loops for each strategy.
//!
//! All loops share the bookkeeping in [`Expansion`]: the node arena,
//! expansion counters, edge pricing and progress reporting. Each loop owns
//! its frontier and visited set for exactly one pass.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::node::{NodeArena, NodeId};
use crate::search::{Progress, SearchStats};
use crate::state::State;

/// How a single pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    Found(NodeId),
    /// Every reachable state within the bound was expanded.
    Exhausted,
    /// At least one node at the depth bound still had unexplored successors.
    Cutoff,
}

/// Shared state for one search invocation.
pub(crate) struct Expansion<'a, S, P> {
    pub goal: &'a S,
    pub arena: NodeArena<S>,
    pub stats: SearchStats,
    progress: P,
}

impl<'a, S, P> Expansion<'a, S, P>
where
    S: State,
    P: FnMut(&Progress<'_, S>),
{
    pub fn new(goal: &'a S, progress: P) -> Self {
        Self {
            goal,
            arena: NodeArena::new(),
            stats: SearchStats::default(),
            progress,
        }
    }

    /// Generates the successors of `id` with the price of each edge.
    fn expand(&mut self, id: NodeId, frontier_len: usize) -> Result<Vec<(S, f64)>, SearchError> {
        self.stats.expanded += 1;
        let node = self.arena.get(id);

        tracing::debug!(
            expanded = self.stats.expanded,
            frontier = frontier_len,
            depth = node.depth,
            cost = node.path_cost,
            state = ?node.state,
            "expanding"
        );
        (self.progress)(&Progress {
            expanded: self.stats.expanded,
            frontier_len,
            state: &node.state,
            depth: node.depth,
            path_cost: node.path_cost,
        });

        let successors = node.state.successors();
        self.stats.generated += successors.len() as u64;

        successors
            .into_iter()
            .map(|successor| match node.state.cost(&successor) {
                Some(cost) => Ok((successor, cost)),
                None => Err(SearchError::MissingEdge {
                    from: format!("{:?}", node.state),
                    to: format!("{successor:?}"),
                }),
            })
            .collect()
    }
}

/// Uninformed graph search over a stack or a queue.
///
/// States are marked visited when expanded and never expanded twice in a
/// pass, so under a `limit` a state first reached along a deep path is not
/// expanded again when a shallower copy turns up later. Nodes at the limit
/// are goal-tested but not expanded.
///
/// Over a queue the goal is also tested as successors are generated; the
/// first generated copy of the goal is already at its shallowest depth.
pub(crate) fn blind<S, P>(
    run: &mut Expansion<'_, S, P>,
    initial: &S,
    mut frontier: Frontier,
    limit: Option<u32>,
) -> Result<Pass, SearchError>
where
    S: State,
    P: FnMut(&Progress<'_, S>),
{
    let lifo = frontier.is_lifo();
    let mut visited: FxHashSet<S> = FxHashSet::default();
    let mut cut_off = false;

    let root = run.arena.root(initial.clone());
    frontier.push(root, 0.0);

    while let Some(id) = frontier.pop() {
        let node = run.arena.get(id);
        if visited.contains(&node.state) {
            continue;
        }
        if node.state == *run.goal {
            run.stats.record_frontier(&frontier);
            return Ok(Pass::Found(id));
        }
        if limit.is_some_and(|limit| node.depth >= limit) {
            // a cutoff only matters if something new lies beyond it
            if node
                .state
                .successors()
                .iter()
                .any(|successor| !visited.contains(successor))
            {
                cut_off = true;
            }
            continue;
        }
        visited.insert(node.state.clone());

        let mut successors = run.expand(id, frontier.len())?;
        successors.retain(|(successor, _)| !visited.contains(successor));
        if lifo {
            // reversed so the first successor is the next one popped
            successors.reverse();
        }
        for (successor, cost) in successors {
            let reached_goal = !lifo && successor == *run.goal;
            let child = run.arena.child(id, successor, cost);
            if reached_goal {
                run.stats.record_frontier(&frontier);
                return Ok(Pass::Found(child));
            }
            frontier.push(child, 0.0);
        }
    }

    run.stats.record_frontier(&frontier);
    Ok(if cut_off { Pass::Cutoff } else { Pass::Exhausted })
}

/// Depth-limited passes with bounds `0, 1, ..., cap`.
///
/// Each pass starts from an empty arena and visited set. Stops early when a
/// pass finds the goal or exhausts the space without hitting its bound.
pub(crate) fn iterative_deepening<S, P>(
    run: &mut Expansion<'_, S, P>,
    initial: &S,
    cap: u32,
) -> Result<Pass, SearchError>
where
    S: State,
    P: FnMut(&Progress<'_, S>),
{
    for limit in 0..=cap {
        run.arena.clear();
        run.stats.passes += 1;
        tracing::debug!(limit, "starting depth-limited pass");
        match blind(run, initial, Frontier::stack(), Some(limit))? {
            Pass::Cutoff => continue,
            done => return Ok(done),
        }
    }
    Ok(Pass::Cutoff)
}

/// A* ordering on `path cost + estimate`.
///
/// Keeps the cheapest known path cost per state. A state reached again with
/// a strictly lower cost is pushed again, re-opening it if it was already
/// expanded; superseded frontier entries are skipped when popped.
pub(crate) fn best_first<S, H, P>(
    run: &mut Expansion<'_, S, P>,
    initial: &S,
    heuristic: &H,
) -> Result<Pass, SearchError>
where
    S: State,
    H: Heuristic<S>,
    P: FnMut(&Progress<'_, S>),
{
    let mut frontier = Frontier::priority();
    let mut best_cost: FxHashMap<S, f64> = FxHashMap::default();
    let mut closed: FxHashSet<S> = FxHashSet::default();

    let root = run.arena.root(initial.clone());
    best_cost.insert(initial.clone(), 0.0);
    frontier.push(root, heuristic.estimate(initial));

    while let Some(id) = frontier.pop() {
        let node = run.arena.get(id);
        let path_cost = node.path_cost;
        if best_cost
            .get(&node.state)
            .is_some_and(|&known| path_cost > known)
        {
            continue;
        }
        if node.state == *run.goal {
            run.stats.record_frontier(&frontier);
            return Ok(Pass::Found(id));
        }
        if !closed.insert(node.state.clone()) {
            run.stats.reopened += 1;
        }

        for (successor, cost) in run.expand(id, frontier.len())? {
            let successor_cost = path_cost + cost;
            if best_cost
                .get(&successor)
                .is_some_and(|&known| successor_cost >= known)
            {
                continue;
            }
            best_cost.insert(successor.clone(), successor_cost);
            let priority = successor_cost + heuristic.estimate(&successor);
            let child = run.arena.child(id, successor, cost);
            frontier.push(child, priority);
        }
    }

    run.stats.record_frontier(&frontier);
    Ok(Pass::Exhausted)
}
