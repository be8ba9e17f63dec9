//! Layered random graph generator.
//!
//! Produces [`Graph`] instances with a spanning backbone, forward mesh
//! edges and optional back edges, so the same seed yields the same graph on
//! every run.

pub mod topology;

use graphkit_core::{Constraints, Graph};
use rand::SeedableRng;
use rand::rngs::StdRng;

use topology::build_layered_graph;

/// Configuration for the graph generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Constraints of the generated graph.
    pub constraints: Constraints,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Number of layers the nodes are spread over.
    pub depth: usize,
    /// Extra forward edges per node, on top of the backbone (0.0-3.0).
    pub mesh_density: f64,
    /// Fraction of edges created undirected when the constraints allow both
    /// kinds (0.0-1.0).
    pub undirected_fraction: f64,
    /// Smallest non-negative edge weight.
    pub min_weight: f64,
    /// Largest edge weight.
    pub max_weight: f64,
    /// Fraction of forward directed edges given a negative weight (0.0-1.0).
    pub negative_fraction: f64,
    /// Whether to add back edges that close cycles.
    pub inject_cycles: bool,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 50 nodes, ~100 edges
    Small,
    /// 500 nodes, ~1200 edges
    Medium,
    /// 2000 nodes, ~5000 edges
    Large,
    /// 5000 nodes, ~15000 edges
    XLarge,
}

impl SizeTier {
    /// Every tier, smallest first, with its short benchmark label.
    pub const ALL: [(&'static str, SizeTier); 4] = [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
        ("XL", SizeTier::XLarge),
    ];

    /// Returns the default `GeneratorConfig` for this size tier: a simple,
    /// directed, weighted DAG.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (num_nodes, depth, mesh_density) = match self {
            SizeTier::Small => (50, 4, 1.0),
            SizeTier::Medium => (500, 6, 1.4),
            SizeTier::Large => (2000, 8, 1.5),
            SizeTier::XLarge => (5000, 10, 2.0),
        };
        GeneratorConfig {
            seed,
            constraints: Constraints::SIMPLE | Constraints::DIRECTED | Constraints::WEIGHTED,
            num_nodes,
            depth,
            mesh_density,
            undirected_fraction: 0.3,
            min_weight: 1.0,
            max_weight: 20.0,
            negative_fraction: 0.0,
            inject_cycles: false,
        }
    }
}

impl GeneratorConfig {
    /// Same configuration with different constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Generates a graph from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_graph(config: &GeneratorConfig) -> Graph {
    let mut rng = StdRng::seed_from_u64(config.seed);
    build_layered_graph(config, &mut rng)
}
