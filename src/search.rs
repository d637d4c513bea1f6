//! Search entry point and result contract.
//!
//! A [`Search`] pairs an initial and a goal state with a [`Strategy`] and,
//! for best-first search, a [`Heuristic`]. Running it records a
//! [`Termination`], the goal path when one was found, and [`SearchStats`].
//! Nothing outlives the call except that result.

use std::fmt;

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::{Heuristic, ZeroHeuristic};
use crate::state::State;
use crate::strategies::{self, Expansion, Pass};

/// Depth cap used by iterative deepening when the caller does not pick one.
pub const DEFAULT_DEPTH_CAP: u32 = 64;

/// Traversal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// LIFO frontier, no re-expansion. Not cost-optimal.
    DepthFirst,
    /// Depth-first, but nodes at `limit` edges from the start are not expanded.
    ///
    /// A state is expanded at most once per pass, at the depth it was first
    /// popped. If that copy was reached along a longer path, a shallower copy
    /// met later is skipped, so a goal exactly `limit` edges away can still be
    /// reported as a cutoff.
    DepthLimited { limit: u32 },
    /// Depth-limited passes with bounds `0..=max_depth`.
    IterativeDeepening { max_depth: u32 },
    /// FIFO frontier. Fewest edges, so optimal under uniform edge costs.
    BreadthFirst,
    /// A*: priority on path cost plus heuristic estimate, re-opening states
    /// reached again more cheaply. Optimal with an admissible heuristic.
    BestFirst,
}

impl Strategy {
    /// Iterative deepening with [`DEFAULT_DEPTH_CAP`].
    pub const fn iterative_deepening() -> Self {
        Self::IterativeDeepening {
            max_depth: DEFAULT_DEPTH_CAP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DepthFirst => "depth-first",
            Self::DepthLimited { .. } => "depth-limited",
            Self::IterativeDeepening { .. } => "iterative-deepening",
            Self::BreadthFirst => "breadth-first",
            Self::BestFirst => "best-first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthLimited { limit } => write!(f, "{} (limit {limit})", self.name()),
            Self::IterativeDeepening { max_depth } => {
                write!(f, "{} (cap {max_depth})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// How a completed search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    GoalFound,
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The depth bound (or the iterative-deepening cap) stopped the search
    /// while unexplored states remained.
    DepthCutoff,
}

/// Counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated. Goal nodes are tested, not expanded.
    pub expanded: u64,
    /// Successors generated across all expansions.
    pub generated: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: usize,
    /// Best-first only: expansions of a state that had been expanded before.
    pub reopened: u64,
    /// Depth-limited passes run by iterative deepening.
    pub passes: u32,
}

impl SearchStats {
    pub(crate) fn record_frontier(&mut self, frontier: &Frontier) {
        self.frontier_high_water = self.frontier_high_water.max(frontier.high_water());
    }
}

/// One expansion, as seen by a progress observer.
#[derive(Debug)]
pub struct Progress<'a, S> {
    /// Expansions so far, this one included.
    pub expanded: u64,
    pub frontier_len: usize,
    pub state: &'a S,
    pub depth: u32,
    pub path_cost: f64,
}

#[derive(Debug, Clone)]
struct Outcome<S> {
    termination: Termination,
    path: Vec<S>,
    path_cost: f64,
    stats: SearchStats,
}

/// A configured search problem and, once run, its result.
#[derive(Debug, Clone)]
pub struct Search<S, H = ZeroHeuristic> {
    initial: S,
    goal: S,
    strategy: Strategy,
    heuristic: H,
    outcome: Option<Outcome<S>>,
}

impl<S: State> Search<S, ZeroHeuristic> {
    pub fn new(initial: S, goal: S, strategy: Strategy) -> Self {
        Self {
            initial,
            goal,
            strategy,
            heuristic: ZeroHeuristic,
            outcome: None,
        }
    }
}

impl<S: State, H: Heuristic<S>> Search<S, H> {
    /// Replaces the heuristic. Only best-first search consults it.
    pub fn with_heuristic<H2: Heuristic<S>>(self, heuristic: H2) -> Search<S, H2> {
        Search {
            initial: self.initial,
            goal: self.goal,
            strategy: self.strategy,
            heuristic,
            outcome: None,
        }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn goal(&self) -> &S {
        &self.goal
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs the search to completion, replacing any previous result.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingEdge`] if a state cannot price an edge
    /// to one of its own successors. No result is kept in that case.
    pub fn run(&mut self) -> Result<Termination, SearchError> {
        self.run_with_progress(|_| {})
    }

    /// Runs the search, logging every expansion at `info` level.
    ///
    /// # Errors
    ///
    /// Same as [`Search::run`].
    pub fn verbose_search(&mut self) -> Result<Termination, SearchError> {
        let strategy = self.strategy;
        self.run_with_progress(|progress| {
            tracing::info!(
                %strategy,
                expanded = progress.expanded,
                frontier = progress.frontier_len,
                depth = progress.depth,
                cost = progress.path_cost,
                state = ?progress.state,
                "expanding"
            );
        })
    }

    /// Runs the search, handing every expansion to `progress`.
    ///
    /// The observer is the hook for external limits: it sees the running
    /// expansion count and frontier size before each expansion.
    ///
    /// # Errors
    ///
    /// Same as [`Search::run`].
    pub fn run_with_progress<P>(&mut self, progress: P) -> Result<Termination, SearchError>
    where
        P: FnMut(&Progress<'_, S>),
    {
        self.outcome = None;
        let mut run = Expansion::new(&self.goal, progress);

        let pass = match self.strategy {
            Strategy::DepthFirst => {
                strategies::blind(&mut run, &self.initial, Frontier::stack(), None)?
            }
            Strategy::DepthLimited { limit } => {
                strategies::blind(&mut run, &self.initial, Frontier::stack(), Some(limit))?
            }
            Strategy::IterativeDeepening { max_depth } => {
                strategies::iterative_deepening(&mut run, &self.initial, max_depth)?
            }
            Strategy::BreadthFirst => {
                strategies::blind(&mut run, &self.initial, Frontier::queue(), None)?
            }
            Strategy::BestFirst => strategies::best_first(&mut run, &self.initial, &self.heuristic)?,
        };

        let outcome = match pass {
            Pass::Found(goal_node) => Outcome {
                termination: Termination::GoalFound,
                path: run.arena.path_to(goal_node),
                path_cost: run.arena.get(goal_node).path_cost,
                stats: run.stats,
            },
            Pass::Exhausted => Outcome {
                termination: Termination::Exhausted,
                path: Vec::new(),
                path_cost: 0.0,
                stats: run.stats,
            },
            Pass::Cutoff => Outcome {
                termination: Termination::DepthCutoff,
                path: Vec::new(),
                path_cost: 0.0,
                stats: run.stats,
            },
        };

        tracing::info!(
            strategy = %self.strategy,
            termination = ?outcome.termination,
            expanded = outcome.stats.expanded,
            path_len = outcome.path.len(),
            cost = outcome.path_cost,
            "search finished"
        );
        let termination = outcome.termination;
        self.outcome = Some(outcome);
        Ok(termination)
    }

    /// `None` until the search has run.
    pub fn termination(&self) -> Option<Termination> {
        self.outcome.as_ref().map(|outcome| outcome.termination)
    }

    pub fn goal_found(&self) -> bool {
        self.termination() == Some(Termination::GoalFound)
    }

    /// States from the initial state to the goal, both included.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoGoalPath`] unless the last run found the goal.
    pub fn goal_path(&self) -> Result<&[S], SearchError> {
        match &self.outcome {
            Some(outcome) if outcome.termination == Termination::GoalFound => Ok(&outcome.path),
            _ => Err(SearchError::NoGoalPath),
        }
    }

    /// Sum of edge costs along [`Search::goal_path`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoGoalPath`] unless the last run found the goal.
    pub fn path_cost(&self) -> Result<f64, SearchError> {
        match &self.outcome {
            Some(outcome) if outcome.termination == Termination::GoalFound => Ok(outcome.path_cost),
            _ => Err(SearchError::NoGoalPath),
        }
    }

    /// Counters from the last run, if any.
    pub fn stats(&self) -> Option<&SearchStats> {
        self.outcome.as_ref().map(|outcome| &outcome.stats)
    }

    /// Expansions performed by the last run (0 before any run).
    pub fn nodes_expanded(&self) -> u64 {
        self.stats().map_or(0, |stats| stats.expanded)
    }
}
