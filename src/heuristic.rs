//! Cost-to-goal estimates for informed search.

/// Maps a state to an estimate of its remaining cost to the goal.
///
/// Estimates must be non-negative. Best-first search only returns an
/// optimal path when the estimate never exceeds the true remaining cost;
/// the engine does not check this.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;
}

/// Always estimates zero, turning best-first search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    #[inline]
    fn estimate(&self, _state: &S) -> f64 {
        0.0
    }
}

/// Closures work as heuristics, which keeps one-off estimates out of the
/// type namespace.
impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    #[inline]
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}
