//! Post-operation invariant checkers for correctness validation.

use std::collections::BTreeSet;

use graphkit_core::{Cycle, Edge, Graph, NodeId, Path, UnionFind, cycles};

/// Verifies that the container's indexes agree: every edge is registered
/// with both endpoints, edge groups cover exactly the edge set, and the
/// graph's constraints hold for every edge.
pub fn check_graph_invariants(graph: &Graph) -> Result<(), String> {
    let constraints = graph.constraints();
    for edge in graph.iter_edges() {
        for endpoint in [edge.first(), edge.second()] {
            let adj = graph
                .adj_list_of(endpoint)
                .map_err(|err| format!("edge {}: {err}", edge.id()))?;
            if !adj.has_edge(edge) {
                return Err(format!(
                    "edge {} not registered with endpoint {endpoint}",
                    edge.id()
                ));
            }
        }
        if edge.is_self_edge() && !constraints.is_multigraph() {
            return Err(format!("self-edge {} in a simple graph", edge.id()));
        }
        if edge.is_directed() && !constraints.allows_directed() {
            return Err(format!("directed edge {} not allowed", edge.id()));
        }
        if !edge.is_directed() && !constraints.allows_undirected() {
            return Err(format!("undirected edge {} not allowed", edge.id()));
        }
    }

    let grouped: usize = graph.edges().values().map(Vec::len).sum();
    if grouped != graph.edge_count() {
        return Err(format!(
            "edge count mismatch: groups={grouped}, edges={}",
            graph.edge_count()
        ));
    }
    for (key, ids) in graph.edges() {
        if ids.is_empty() {
            return Err(format!("empty edge group {key:?}"));
        }
        for id in ids {
            match graph.edge(*id) {
                Some(edge) if edge.key() == *key => {}
                Some(_) => return Err(format!("edge {id} filed under the wrong group")),
                None => return Err(format!("group {key:?} names unknown edge {id}")),
            }
        }
    }
    Ok(())
}

/// Verifies an `explore` result: it contains `start`, and no followable
/// neighbor of a reached node lies outside it.
pub fn check_explore_closed(
    graph: &Graph,
    start: NodeId,
    reached: &BTreeSet<NodeId>,
    follow_directed: bool,
) -> Result<(), String> {
    if !reached.contains(&start) {
        return Err(format!("reached set does not contain start node {start}"));
    }
    if reached.len() > graph.node_count() {
        return Err("reached set larger than total graph nodes".to_owned());
    }
    for &node in reached {
        let neighbors = graph
            .neighbors(node, follow_directed)
            .map_err(|err| err.to_string())?;
        if let Some(missed) = neighbors.iter().find(|n| !reached.contains(n)) {
            return Err(format!("{missed} is adjacent to reached node {node} but missing"));
        }
    }
    Ok(())
}

/// Verifies a path result:
/// - starts at `from`, ends at `to`
/// - every edge is a member of the graph
/// - each edge is crossed in a direction it allows
pub fn check_path(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    path: &Path,
    follow_directed: bool,
) -> Result<(), String> {
    if path.start() != from {
        return Err(format!("path starts at {}, expected {from}", path.start()));
    }
    if path.end() != to {
        return Err(format!("path ends at {}, expected {to}", path.end()));
    }
    for (i, edge) in path.edges().iter().enumerate() {
        let (a, b) = (path.nodes()[i], path.nodes()[i + 1]);
        if graph.edge(edge.id()) != Some(edge) {
            return Err(format!("hop {i} uses unknown edge {}", edge.id()));
        }
        let usable = if follow_directed {
            edge.traversable_from(a) == Some(b)
        } else {
            edge.connects(a, b)
        };
        if !usable {
            return Err(format!("hop {i} cannot cross {} from {a} to {b}", edge.id()));
        }
    }
    Ok(())
}

/// Verifies that a path's length matches a reference distance.
pub fn check_path_length(path: &Path, expected: f64) -> Result<(), String> {
    if (path.length() - expected).abs() > 1e-9 {
        return Err(format!(
            "path length {} differs from reference {expected}",
            path.length()
        ));
    }
    Ok(())
}

/// Verifies a cycle result: closed, every edge a member and crossed in an
/// allowed direction, no edge repeated.
pub fn check_cycle(graph: &Graph, cycle: &Cycle) -> Result<(), String> {
    let path = cycle.as_path();
    if cycle.is_empty() || !path.is_closed() {
        return Err("cycle is not closed".to_owned());
    }
    let start = path.start();
    check_path(graph, start, start, path, true)?;
    let distinct: BTreeSet<_> = cycle.edges().iter().map(Edge::id).collect();
    if distinct.len() != cycle.len() {
        return Err("cycle repeats an edge".to_owned());
    }
    Ok(())
}

/// Verifies spanning forest invariants:
/// - same nodes as the source graph
/// - every edge copied unchanged from the source graph
/// - acyclic, with one tree per connected component
pub fn check_spanning_forest(graph: &Graph, forest: &Graph) -> Result<(), String> {
    if !graph.nodes().eq(forest.nodes()) {
        return Err("forest nodes differ from graph nodes".to_owned());
    }
    for edge in forest.iter_edges() {
        if graph.edge(edge.id()) != Some(edge) {
            return Err(format!("forest edge {} not in graph", edge.id()));
        }
    }
    if !cycles::is_acyclic(forest).map_err(|err| err.to_string())? {
        return Err("forest contains a cycle".to_owned());
    }

    let mut components = UnionFind::new(graph.nodes());
    for edge in graph.iter_edges() {
        components.union(&edge.first(), &edge.second());
    }
    let expected = graph.node_count() - components.set_count();
    if forest.edge_count() != expected {
        return Err(format!(
            "forest has {} edges, expected {expected}",
            forest.edge_count()
        ));
    }
    Ok(())
}
