//! Two-link robot arm: configurations, workspace validity, lattice search
//! states and the angle-delta heuristic.
//!
//! Angles are stored in radians. Costs and heuristic estimates are in
//! degrees, matching the problem and solution file formats.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geometry::{Point, Rect};
use crate::graph::GraphState;
use crate::heuristic::Heuristic;
use crate::state::State;

/// Angles closer than this (radians) identify the same configuration.
pub const ANGLE_TOLERANCE: f64 = 1e-6;

/// Interpolation steps per radian of joint motion when checking a path.
const CHECKS_PER_RADIAN: f64 = 10.0;

/// An axis-aligned obstacle in the workspace.
pub type Obstacle = Rect;

/// Joint angles of the arm.
///
/// `angle1` is the base joint, measured from the x axis; `angle2` is the
/// elbow, measured from the first link. Equality and hashing both go
/// through [`ArmConfig::key`], which snaps each angle to a multiple of
/// [`ANGLE_TOLERANCE`], so accumulated rounding error does not create
/// near-duplicate states.
#[derive(Debug, Clone, Copy)]
pub struct ArmConfig {
    pub angle1: f64,
    pub angle2: f64,
}

impl ArmConfig {
    pub const fn new(angle1: f64, angle2: f64) -> Self {
        Self { angle1, angle2 }
    }

    pub fn from_degrees(angle1: f64, angle2: f64) -> Self {
        Self::new(angle1.to_radians(), angle2.to_radians())
    }

    pub fn degrees(&self) -> (f64, f64) {
        (self.angle1.to_degrees(), self.angle2.to_degrees())
    }

    /// Identity of the configuration on the tolerance grid.
    pub fn key(&self) -> (i64, i64) {
        (
            (self.angle1 / ANGLE_TOLERANCE).round() as i64,
            (self.angle2 / ANGLE_TOLERANCE).round() as i64,
        )
    }

    /// Both joints moved a fraction `t` of the way towards `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.angle1 + (other.angle1 - self.angle1) * t,
            self.angle2 + (other.angle2 - self.angle2) * t,
        )
    }
}

impl PartialEq for ArmConfig {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ArmConfig {}

impl Hash for ArmConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ArmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a1, a2) = self.degrees();
        write!(f, "({a1:.1}°, {a2:.1}°)")
    }
}

/// Degrees swept by the joints when moving straight from `a` to `b`.
///
/// This is the edge cost between configurations: the arm interpolates each
/// joint linearly, so no wraparound applies.
pub fn total_angle_delta(a: &ArmConfig, b: &ArmConfig) -> f64 {
    ((a.angle1 - b.angle1).abs() + (a.angle2 - b.angle2).abs()).to_degrees()
}

/// Smallest rotation (radians, in `[0, pi]`) taking angle `a` to angle `b`.
pub fn shortest_arc(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs().rem_euclid(TAU);
    delta.min(TAU - delta)
}

/// Rod lengths and obstacles: everything needed to judge a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub length1: f64,
    pub length2: f64,
    pub obstacles: Vec<Obstacle>,
}

impl Workspace {
    pub fn new(length1: f64, length2: f64, obstacles: Vec<Obstacle>) -> Self {
        Self {
            length1,
            length2,
            obstacles,
        }
    }

    /// Base, elbow and tip positions.
    pub fn joints(&self, config: &ArmConfig) -> [Point; 3] {
        let elbow = Point::ORIGIN.offset(self.length1, config.angle1);
        let tip = elbow.offset(self.length2, config.angle1 + config.angle2);
        [Point::ORIGIN, elbow, tip]
    }

    /// Whether either link touches `obstacle`.
    pub fn collides(&self, config: &ArmConfig, obstacle: &Obstacle) -> bool {
        let [base, elbow, tip] = self.joints(config);
        obstacle.intersects_segment(base, elbow) || obstacle.intersects_segment(elbow, tip)
    }

    /// Whether the joint limits hold and both links stay in the free part of
    /// the unit square.
    pub fn is_valid(&self, config: &ArmConfig) -> bool {
        if !(0.0..=FRAC_PI_2).contains(&config.angle1) || !(-PI..=PI).contains(&config.angle2) {
            return false;
        }
        if !self.joints(config).iter().all(|p| p.in_unit_square()) {
            return false;
        }
        !self
            .obstacles
            .iter()
            .any(|obstacle| self.collides(config, obstacle))
    }

    /// Whether every intermediate configuration of the straight joint-space
    /// motion from `from` to `to` is valid. The endpoints are not checked.
    pub fn has_direct_path(&self, from: &ArmConfig, to: &ArmConfig) -> bool {
        let max_delta = (to.angle1 - from.angle1)
            .abs()
            .max((to.angle2 - from.angle2).abs());
        let steps = (max_delta * CHECKS_PER_RADIAN).ceil() as usize;
        (1..steps).all(|i| self.is_valid(&from.lerp(to, i as f64 / steps as f64)))
    }
}

/// A configuration on a lattice: each successor turns one joint by `step`
/// radians in either direction.
#[derive(Clone)]
pub struct ArmState<'w> {
    workspace: &'w Workspace,
    config: ArmConfig,
    step: f64,
}

impl<'w> ArmState<'w> {
    pub fn new(workspace: &'w Workspace, config: ArmConfig, step: f64) -> Self {
        Self {
            workspace,
            config,
            step,
        }
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    fn moved(&self, d_angle1: f64, d_angle2: f64) -> Self {
        Self {
            config: ArmConfig::new(self.config.angle1 + d_angle1, self.config.angle2 + d_angle2),
            ..self.clone()
        }
    }
}

impl PartialEq for ArmState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Eq for ArmState<'_> {}

impl Hash for ArmState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.hash(state);
    }
}

impl fmt::Debug for ArmState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArmState{}", self.config)
    }
}

impl State for ArmState<'_> {
    fn successors(&self) -> Vec<Self> {
        let step = self.step;
        [(step, 0.0), (-step, 0.0), (0.0, step), (0.0, -step)]
            .into_iter()
            .map(|(d1, d2)| self.moved(d1, d2))
            .filter(|next| {
                self.workspace.is_valid(&next.config)
                    && self.workspace.has_direct_path(&self.config, &next.config)
            })
            .collect()
    }

    fn cost(&self, successor: &Self) -> Option<f64> {
        self.successors()
            .contains(successor)
            .then(|| total_angle_delta(&self.config, &successor.config))
    }
}

/// Estimates remaining cost as the summed shortest-arc joint differences to
/// the goal, in degrees. Never exceeds [`total_angle_delta`], so it is
/// admissible for both the lattice and roadmap domains.
#[derive(Debug, Clone, Copy)]
pub struct TotalAngleDelta {
    goal: ArmConfig,
}

impl TotalAngleDelta {
    pub fn new(goal: ArmConfig) -> Self {
        Self { goal }
    }

    pub fn to_goal(&self, config: &ArmConfig) -> f64 {
        (shortest_arc(config.angle1, self.goal.angle1) + shortest_arc(config.angle2, self.goal.angle2))
            .to_degrees()
    }
}

impl Heuristic<ArmState<'_>> for TotalAngleDelta {
    fn estimate(&self, state: &ArmState<'_>) -> f64 {
        self.to_goal(state.config())
    }
}

impl Heuristic<GraphState<'_, ArmConfig>> for TotalAngleDelta {
    fn estimate(&self, state: &GraphState<'_, ArmConfig>) -> f64 {
        self.to_goal(state.value())
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::search::{Search, Strategy, Termination};

    fn open_workspace() -> Workspace {
        Workspace::new(0.3, 0.3, Vec::new())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rounding_noise_does_not_split_configurations() {
        let summed = ArmConfig::new(0.1 + 0.2, 0.5);
        let direct = ArmConfig::new(0.3, 0.5);
        assert_ne!(summed.angle1, direct.angle1);
        assert_eq!(summed, direct);

        let mut visited = FxHashSet::default();
        visited.insert(summed);
        assert!(visited.contains(&direct), "hash must agree with equality");
    }

    #[test]
    fn distinct_configurations_stay_distinct() {
        assert_ne!(ArmConfig::new(0.3, 0.5), ArmConfig::new(0.3 + 1e-4, 0.5));
    }

    #[test]
    fn shortest_arc_wraps_around() {
        let near_plus = 179.0_f64.to_radians();
        let near_minus = (-179.0_f64).to_radians();
        assert!(close(shortest_arc(near_plus, near_minus).to_degrees(), 2.0));
        assert!(close(shortest_arc(near_minus, near_plus).to_degrees(), 2.0));
        assert!(close(shortest_arc(0.0, PI).to_degrees(), 180.0));
        assert!(close(shortest_arc(10.0_f64.to_radians(), 30.0_f64.to_radians()).to_degrees(), 20.0));
    }

    #[test]
    fn heuristic_reports_the_shorter_arc_across_the_boundary() {
        let heuristic = TotalAngleDelta::new(ArmConfig::from_degrees(45.0, 178.0));
        let across = ArmConfig::from_degrees(40.0, -178.0);
        assert!(close(heuristic.to_goal(&across), 5.0 + 4.0));
        // the naive difference would be 5 + 356
        assert!(close(total_angle_delta(&across, &ArmConfig::from_degrees(45.0, 178.0)), 361.0));
    }

    #[test]
    fn joints_follow_the_link_angles() {
        let workspace = Workspace::new(0.5, 0.25, Vec::new());
        let [base, elbow, tip] = workspace.joints(&ArmConfig::from_degrees(90.0, -90.0));
        assert_eq!(base, Point::ORIGIN);
        assert!(close(elbow.x, 0.0) && close(elbow.y, 0.5));
        assert!(close(tip.x, 0.25) && close(tip.y, 0.5));
    }

    #[test]
    fn validity_checks_limits_bounds_and_obstacles() {
        let blocked = Workspace::new(
            0.3,
            0.3,
            vec![Rect::from_corners(Point::new(0.1, 0.2), Point::new(0.2, 0.3))],
        );
        let open = open_workspace();

        assert!(open.is_valid(&ArmConfig::from_degrees(45.0, 0.0)));
        assert!(!open.is_valid(&ArmConfig::from_degrees(-5.0, 0.0)), "joint limit");
        assert!(!open.is_valid(&ArmConfig::from_degrees(0.0, -90.0)), "tip below the floor");
        assert!(!blocked.is_valid(&ArmConfig::from_degrees(60.0, 0.0)), "first link hits");
        assert!(blocked.is_valid(&ArmConfig::from_degrees(10.0, 0.0)));
    }

    #[test]
    fn direct_path_is_blocked_by_an_obstacle_in_between() {
        // a small block on the 45 degree line, between the two poses
        let wall = Workspace::new(
            0.3,
            0.3,
            vec![Rect::from_corners(Point::new(0.19, 0.19), Point::new(0.22, 0.22))],
        );
        let low = ArmConfig::from_degrees(10.0, 0.0);
        let high = ArmConfig::from_degrees(80.0, 0.0);
        assert!(wall.is_valid(&low) && wall.is_valid(&high));
        assert!(!wall.has_direct_path(&low, &high));
        assert!(open_workspace().has_direct_path(&low, &high));
    }

    #[test]
    fn lattice_search_recognises_the_goal_despite_rounding() {
        let workspace = open_workspace();
        let step = 10.0_f64.to_radians();
        let start = ArmState::new(&workspace, ArmConfig::from_degrees(10.0, 0.0), step);
        let goal = ArmState::new(&workspace, ArmConfig::from_degrees(40.0, 30.0), step);

        let mut search = Search::new(start, goal.clone(), Strategy::BestFirst)
            .with_heuristic(TotalAngleDelta::new(*goal.config()));
        assert_eq!(search.run(), Ok(Termination::GoalFound));

        let path = search.goal_path().unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.last(), Some(&goal));
        assert!(close(search.path_cost().unwrap(), 60.0));
    }

    #[test]
    fn lattice_cost_rejects_non_neighbours() {
        let workspace = open_workspace();
        let step = 10.0_f64.to_radians();
        let a = ArmState::new(&workspace, ArmConfig::from_degrees(10.0, 0.0), step);
        let far = ArmState::new(&workspace, ArmConfig::from_degrees(50.0, 0.0), step);
        assert_eq!(a.cost(&far), None);
        assert!(close(a.cost(&a.successors()[0]).unwrap(), 10.0));
    }
}
