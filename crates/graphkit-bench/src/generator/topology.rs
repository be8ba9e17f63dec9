//! Topology strategies: layered backbone, forward mesh overlay, and
//! optional back-edge injection.
//!
//! Node `n0` is the only node of layer 0 and every other node is reachable
//! from it along the backbone. Mesh edges always point from a shallower
//! layer to a deeper one, so without injected back edges a directed-only
//! graph is acyclic. Negative weights are only given to forward edges of
//! directed-only graphs and therefore never form a negative cycle there.

use std::cmp::min;

use graphkit_core::{Constraints, Edge, Graph, IdGenerator, NodeId};
use rand::Rng;
use rand::rngs::StdRng;

use super::GeneratorConfig;

/// Builds a complete layered graph from the generator configuration.
pub fn build_layered_graph(config: &GeneratorConfig, rng: &mut StdRng) -> Graph {
    let mut ids = IdGenerator::new();
    let nodes: Vec<NodeId> = (0..config.num_nodes).map(|_| ids.next_node()).collect();
    let mut graph = Graph::with_nodes(config.constraints, nodes.iter().copied());
    if nodes.is_empty() {
        return graph;
    }

    let layers = split_layers(rng, nodes.len(), config.depth);
    let mut builder = EdgeBuilder {
        graph: &mut graph,
        ids: &mut ids,
        config,
    };

    let parents = build_backbone(rng, &nodes, &layers, &mut builder);
    build_mesh_overlay(rng, &nodes, &layers, &mut builder);
    if config.inject_cycles && nodes.len() >= 2 {
        inject_back_edges(rng, &nodes, &parents, &mut builder);
    }

    graph
}

/// Splits node indices `1..count` into at most `depth` consecutive layers,
/// with index `0` alone in the first layer.
fn split_layers(rng: &mut StdRng, count: usize, depth: usize) -> Vec<Vec<usize>> {
    let mut layers = vec![vec![0]];
    let remaining = count.saturating_sub(1);
    if remaining == 0 {
        return layers;
    }

    let depth = depth.max(1);
    let per_layer = (remaining / depth).max(1);
    let mut next = 1;
    for _ in 0..depth {
        let size = min(per_layer + rng.gen_range(0..=1), count - next);
        if size == 0 {
            break;
        }
        layers.push((next..next + size).collect());
        next += size;
    }

    if next < count {
        let rest: Vec<usize> = (next..count).collect();
        if let Some(last) = layers.last_mut() {
            last.extend(rest);
        }
    }
    layers
}

/// Adds edges to the graph under construction, choosing direction and
/// weight from the configuration.
struct EdgeBuilder<'a> {
    graph: &'a mut Graph,
    ids: &'a mut IdGenerator,
    config: &'a GeneratorConfig,
}

impl EdgeBuilder<'_> {
    /// Adds an edge from `from` to `to`. Returns `false` if the graph's
    /// constraints rejected it.
    fn connect(&mut self, rng: &mut StdRng, from: NodeId, to: NodeId, forward: bool) -> bool {
        let constraints = self.graph.constraints();
        let directed = if constraints.contains(Constraints::MIXED) {
            !rng.gen_bool(self.config.undirected_fraction.clamp(0.0, 1.0))
        } else {
            constraints.allows_directed()
        };

        let mut edge = Edge::new(self.ids.next_edge(), from, to, directed);
        if constraints.is_weighted() {
            let (low, high) = (self.config.min_weight, self.config.max_weight);
            let mut weight = if high > low {
                rng.gen_range(low..=high).round()
            } else {
                low
            };
            if forward
                && !constraints.allows_undirected()
                && rng.gen_bool(self.config.negative_fraction.clamp(0.0, 1.0))
            {
                weight = -weight;
            }
            edge = edge.with_weight(weight);
        }
        self.graph.add_edge(edge)
    }
}

/// Connects every node of layer `k` to a random node of layer `k - 1`.
///
/// Returns each node's backbone parent; the root is its own parent.
fn build_backbone(
    rng: &mut StdRng,
    nodes: &[NodeId],
    layers: &[Vec<usize>],
    builder: &mut EdgeBuilder<'_>,
) -> Vec<usize> {
    let mut parents: Vec<usize> = (0..nodes.len()).collect();
    for pair in layers.windows(2) {
        let [previous, current] = pair else {
            continue;
        };
        for &child in current {
            let parent = previous[rng.gen_range(0..previous.len())];
            builder.connect(rng, nodes[parent], nodes[child], true);
            parents[child] = parent;
        }
    }
    parents
}

/// Adds `mesh_density * num_nodes` forward edges between random nodes of a
/// shallower and a strictly deeper layer.
fn build_mesh_overlay(
    rng: &mut StdRng,
    nodes: &[NodeId],
    layers: &[Vec<usize>],
    builder: &mut EdgeBuilder<'_>,
) {
    if layers.len() < 2 {
        return;
    }

    let mesh_count = (builder.config.mesh_density * nodes.len() as f64).round() as usize;
    for _ in 0..mesh_count {
        let (from, to) = pick_forward_pair(rng, layers);
        builder.connect(rng, nodes[from], nodes[to], true);
    }
}

/// Adds 1-3 edges from a node back to one of its backbone ancestors, each
/// closing a cycle with the backbone path between them.
fn inject_back_edges(
    rng: &mut StdRng,
    nodes: &[NodeId],
    parents: &[usize],
    builder: &mut EdgeBuilder<'_>,
) {
    let num_cycles = rng.gen_range(1..=3);
    let mut added = 0;
    // Rejected candidates (parallel edges in simple graphs) are retried a
    // bounded number of times.
    for _ in 0..num_cycles * 8 {
        if added == num_cycles {
            break;
        }
        let deep = rng.gen_range(1..nodes.len());
        let mut ancestor = parents[deep];
        for _ in 0..rng.gen_range(0..builder.config.depth.max(1)) {
            ancestor = parents[ancestor];
        }
        if builder.connect(rng, nodes[deep], nodes[ancestor], false) {
            added += 1;
        }
    }
}

/// Picks node indices from two distinct layers, shallower one first.
fn pick_forward_pair(rng: &mut StdRng, layers: &[Vec<usize>]) -> (usize, usize) {
    let a = rng.gen_range(0..layers.len() - 1);
    let b = rng.gen_range(a + 1..layers.len());
    let from = layers[a][rng.gen_range(0..layers[a].len())];
    let to = layers[b][rng.gen_range(0..layers[b].len())];
    (from, to)
}
