//! The contract every problem domain implements.

use std::fmt::Debug;
use std::hash::Hash;

/// A node of a search problem's state space.
///
/// Equality decides both the goal test and visited-set membership, so
/// `Eq` and `Hash` must agree with each other. Domains with continuous
/// coordinates must fold their tolerance into both (see
/// [`crate::arm::ArmConfig`]).
pub trait State: Clone + Eq + Hash + Debug {
    /// States reachable from `self` in one edge.
    ///
    /// The order must be deterministic: it fixes the traversal order of
    /// every strategy and therefore the path each one returns.
    fn successors(&self) -> Vec<Self>;

    /// Non-negative cost of the edge from `self` to `successor`.
    ///
    /// Returns `None` when `successor` is not an immediate successor.
    fn cost(&self, successor: &Self) -> Option<f64>;
}
