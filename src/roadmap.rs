//! Sampled roadmaps for arm motion planning.
//!
//! A roadmap is a [`Graph`] of valid arm configurations where two
//! configurations are connected when they are close in joint space and the
//! straight motion between them is collision-free. It is built once, then
//! searched through [`GraphState`] handles.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::arm::{total_angle_delta, ArmConfig, Workspace};
use crate::error::RoadmapError;
use crate::graph::{Graph, GraphState};

/// Sampling and connection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapConfig {
    /// Valid configurations to sample, besides the initial and goal ones.
    pub samples: usize,
    /// Largest total angle delta (degrees) between connected configurations.
    pub max_angle_delta: f64,
    /// Draws allowed per sample before giving up on it.
    pub attempts_per_sample: usize,
    pub seed: u64,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            max_angle_delta: 10.0,
            attempts_per_sample: 1_000,
            seed: 0,
        }
    }
}

/// A connected sample of the arm's configuration space.
#[derive(Debug, Clone)]
pub struct Roadmap {
    graph: Graph<ArmConfig>,
    initial: usize,
    goal: usize,
}

impl Roadmap {
    /// Samples and connects a roadmap containing `initial` and `goal`.
    ///
    /// The same workspace, endpoints and config always produce the same
    /// roadmap.
    ///
    /// # Errors
    ///
    /// Returns [`RoadmapError::InvalidEndpoint`] if `initial` or `goal` is
    /// not a valid configuration in `workspace`.
    pub fn build(
        workspace: &Workspace,
        initial: ArmConfig,
        goal: ArmConfig,
        config: &RoadmapConfig,
    ) -> Result<Self, RoadmapError> {
        for (name, endpoint) in [("initial", &initial), ("goal", &goal)] {
            if !workspace.is_valid(endpoint) {
                return Err(RoadmapError::InvalidEndpoint {
                    endpoint: name,
                    config: endpoint.to_string(),
                });
            }
        }

        let mut graph = Graph::new();
        let initial = graph.add_node(initial);
        let goal = graph.add_node(goal);

        let mut rng = Pcg64::seed_from_u64(config.seed);
        let mut abandoned = 0usize;
        for _ in 0..config.samples {
            match sample_valid(workspace, &mut rng, config.attempts_per_sample) {
                Some(sample) => {
                    graph.add_node(sample);
                }
                None => abandoned += 1,
            }
        }
        if abandoned > 0 {
            tracing::warn!(
                abandoned,
                attempts = config.attempts_per_sample,
                "gave up on samples that found no valid configuration"
            );
        }

        connect(&mut graph, workspace, config.max_angle_delta);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "roadmap built"
        );

        Ok(Self {
            graph,
            initial,
            goal,
        })
    }

    pub fn graph(&self) -> &Graph<ArmConfig> {
        &self.graph
    }

    pub fn initial_state(&self) -> GraphState<'_, ArmConfig> {
        GraphState::of(&self.graph, self.initial)
    }

    pub fn goal_state(&self) -> GraphState<'_, ArmConfig> {
        GraphState::of(&self.graph, self.goal)
    }
}

/// Draws uniform configurations until one is valid.
fn sample_valid(workspace: &Workspace, rng: &mut Pcg64, attempts: usize) -> Option<ArmConfig> {
    (0..attempts)
        .map(|_| {
            let angle1 = rng.gen::<f64>() * FRAC_PI_2;
            let angle2 = (rng.gen::<f64>() - 0.5) * TAU;
            ArmConfig::new(angle1, angle2)
        })
        .find(|config| workspace.is_valid(config))
}

/// Connects every pair within `max_angle_delta` degrees whose straight
/// motion is collision-free, weighted by that delta.
fn connect(graph: &mut Graph<ArmConfig>, workspace: &Workspace, max_angle_delta: f64) {
    let nodes = graph.nodes().to_vec();
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            let delta = total_angle_delta(a, b);
            if delta > max_angle_delta || !workspace.has_direct_path(a, b) {
                continue;
            }
            graph.add_edge(i, j, delta);
        }
    }
}
